//! Matrix construction and space conversions.
//!
//! Conventions: left-handed view space with `+z` forward, clip-space `w` equal to view depth
//! for perspective projections, NDC in `[-1, 1]` on all three axes, and screen space in pixels
//! with `y` growing upward from the bottom row of the frame buffer.

pub(crate) mod model;
pub(crate) mod projection;
pub(crate) mod space;
pub(crate) mod view;
