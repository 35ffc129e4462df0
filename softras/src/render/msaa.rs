use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::foundation::error::SoftrasError;

/// Multi-sample anti-aliasing level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MsaaMode {
    /// One sample at the pixel position.
    #[default]
    None,
    /// Two samples on a diagonal.
    X2,
    /// Four samples on a rotated grid.
    X4,
    /// Eight samples.
    X8,
}

// Standard rotated-grid patterns, in pixels relative to the sampled pixel position.
const OFFSETS_X1: [Vec2; 1] = [Vec2::ZERO];
const OFFSETS_X2: [Vec2; 2] = [Vec2::new(0.25, 0.25), Vec2::new(-0.25, -0.25)];
const OFFSETS_X4: [Vec2; 4] = [
    Vec2::new(-0.125, -0.375),
    Vec2::new(0.375, -0.125),
    Vec2::new(-0.375, 0.125),
    Vec2::new(0.125, 0.375),
];
const OFFSETS_X8: [Vec2; 8] = [
    Vec2::new(0.0625, -0.1875),
    Vec2::new(-0.0625, 0.1875),
    Vec2::new(0.3125, 0.0625),
    Vec2::new(-0.1875, -0.3125),
    Vec2::new(-0.3125, 0.3125),
    Vec2::new(-0.4375, -0.0625),
    Vec2::new(0.1875, 0.4375),
    Vec2::new(0.4375, -0.4375),
];

impl MsaaMode {
    /// Sub-samples per pixel: 1, 2, 4 or 8.
    pub fn sample_count(self) -> usize {
        self.offsets().len()
    }

    /// Whether more than one sample is taken per pixel.
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }

    /// Sub-sample positions, one per sample.
    pub fn offsets(self) -> &'static [Vec2] {
        match self {
            Self::None => &OFFSETS_X1,
            Self::X2 => &OFFSETS_X2,
            Self::X4 => &OFFSETS_X4,
            Self::X8 => &OFFSETS_X8,
        }
    }
}

impl FromStr for MsaaMode {
    type Err = SoftrasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "x1" | "1" => Ok(Self::None),
            "x2" | "2" => Ok(Self::X2),
            "x4" | "4" => Ok(Self::X4),
            "x8" | "8" => Ok(Self::X8),
            other => Err(SoftrasError::validation(format!(
                "unknown msaa mode '{other}' (expected none, x2, x4 or x8)"
            ))),
        }
    }
}

impl fmt::Display for MsaaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::X2 => "x2",
            Self::X4 => "x4",
            Self::X8 => "x8",
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/msaa.rs"]
mod tests;
