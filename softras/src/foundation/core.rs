use crate::foundation::error::{SoftrasError, SoftrasResult};
use crate::foundation::math::safe_div;

pub use glam::{Mat4, Vec2, Vec3, Vec4};

/// Linear RGBA color, one `f32` per channel.
///
/// Channels are nominally in `[0, 1]`. The pipeline keeps full float precision while blending
/// and only clamps when a frame is exported to RGBA8.
pub type Color = Vec4;

/// Opaque black.
pub const BLACK: Color = Vec4::new(0.0, 0.0, 0.0, 1.0);
/// Opaque white. Also the value sampled from an absent texture.
pub const WHITE: Color = Vec4::new(1.0, 1.0, 1.0, 1.0);
/// Fully transparent black.
pub const TRANSPARENT: Color = Vec4::new(0.0, 0.0, 0.0, 0.0);
/// Opaque red.
pub const RED: Color = Vec4::new(1.0, 0.0, 0.0, 1.0);
/// Opaque green.
pub const GREEN: Color = Vec4::new(0.0, 1.0, 0.0, 1.0);
/// Opaque blue.
pub const BLUE: Color = Vec4::new(0.0, 0.0, 1.0, 1.0);

/// Quantize a float color to straight-alpha RGBA8.
pub fn color_to_rgba8(c: Color) -> [u8; 4] {
    fn q(v: f32) -> u8 {
        // NaN saturates to 0 in the cast.
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }
    [q(c.x), q(c.y), q(c.z), q(c.w)]
}

/// Expand straight-alpha RGBA8 to a float color.
pub fn rgba8_to_color(px: [u8; 4]) -> Color {
    Vec4::new(
        f32::from(px[0]),
        f32::from(px[1]),
        f32::from(px[2]),
        f32::from(px[3]),
    ) / 255.0
}

/// Render target extents in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Fails when either extent is zero.
    pub fn new(width: u32, height: u32) -> SoftrasResult<Self> {
        if width == 0 || height == 0 {
            return Err(SoftrasError::validation(format!(
                "viewport must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// `width * height`.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Width over height.
    pub fn aspect(self) -> f32 {
        safe_div(self.width as f32, self.height as f32, 1.0)
    }

    /// Extents as a float vector.
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
