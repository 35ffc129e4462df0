pub(crate) mod buffer;
pub mod primitives;
pub(crate) mod vertex;
