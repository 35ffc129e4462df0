use std::path::Path;
use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::foundation::core::{Color, WHITE, rgba8_to_color};
use crate::foundation::error::{SoftrasError, SoftrasResult};

/// RGBA float texture with bottom-up rows, so `uv (0, 0)` addresses the bottom-left texel.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Color>,
}

impl Texture {
    /// Texels are stored row by row, bottom row first.
    pub fn new(width: u32, height: u32, texels: Vec<Color>) -> SoftrasResult<Self> {
        if width == 0 || height == 0 {
            return Err(SoftrasError::asset("texture dimensions must be non-zero"));
        }
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(SoftrasError::asset(format!(
                "texture {width}x{height} needs {expected} texels, got {}",
                texels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Build from tightly packed RGBA8 bytes stored top row first, as image files are.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> SoftrasResult<Self> {
        let row_bytes = width as usize * 4;
        if data.len() != row_bytes * height as usize {
            return Err(SoftrasError::asset(format!(
                "rgba8 buffer length {} does not match {width}x{height}",
                data.len()
            )));
        }
        let texels = data
            .chunks_exact(row_bytes.max(1))
            .rev()
            .flat_map(|row| row.chunks_exact(4))
            .map(|px| rgba8_to_color([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::new(width, height, texels)
    }

    /// Decode an image file into linear float texels.
    pub fn from_path(path: impl AsRef<Path>) -> SoftrasResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| SoftrasError::asset(format!("decode texture '{}': {e}", path.display())))?
            .to_rgba8();
        let (w, h) = img.dimensions();
        Self::from_rgba8(w, h, img.as_raw())
    }

    /// `size x size` texels alternating `a` and `b` in `cells x cells` squares.
    pub fn checkerboard(size: u32, cells: u32, a: Color, b: Color) -> SoftrasResult<Self> {
        if cells == 0 {
            return Err(SoftrasError::asset("checkerboard needs at least one cell"));
        }
        let cell = (size / cells).max(1);
        let texels = (0..size)
            .flat_map(|y| (0..size).map(move |x| ((x / cell) + (y / cell)) % 2 == 0))
            .map(|even| if even { a } else { b })
            .collect();
        Self::new(size, size, texels)
    }

    /// Single-texel texture.
    pub fn solid(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at column `x`, row `y` counted from the bottom.
    pub fn texel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.texels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Nearest-texel lookup with repeat wrapping.
    pub fn sample(&self, uv: Vec2) -> Color {
        let x = wrap_coord(uv.x, self.width);
        let y = wrap_coord(uv.y, self.height);
        self.texels[y * self.width as usize + x]
    }
}

fn wrap_coord(t: f32, size: u32) -> usize {
    if !t.is_finite() {
        return 0;
    }
    let frac = t - t.floor();
    ((frac * size as f32) as usize).min(size as usize - 1)
}

/// Sample `texture` or fall back to opaque white when none is bound.
pub fn sample_or_white(texture: Option<&Texture>, uv: Vec2) -> Color {
    texture.map_or(WHITE, |t| t.sample(uv))
}

/// Cube face order: `+X, -X, +Y, -Y, +Z, -Z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeFace {
    /// `+X`.
    PosX,
    /// `-X`.
    NegX,
    /// `+Y`.
    PosY,
    /// `-Y`.
    NegY,
    /// `+Z`.
    PosZ,
    /// `-Z`.
    NegZ,
}

impl CubeFace {
    /// All faces in storage order.
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Outward axis and the face's image-up axis, seen from inside the cube.
    fn basis(self) -> (Vec3, Vec3) {
        match self {
            Self::PosX => (Vec3::X, Vec3::Y),
            Self::NegX => (Vec3::NEG_X, Vec3::Y),
            Self::PosY => (Vec3::Y, Vec3::NEG_Z),
            Self::NegY => (Vec3::NEG_Y, Vec3::Z),
            Self::PosZ => (Vec3::Z, Vec3::Y),
            Self::NegZ => (Vec3::NEG_Z, Vec3::Y),
        }
    }

    fn from_direction(d: Vec3) -> Self {
        let a = d.abs();
        if a.x >= a.y && a.x >= a.z {
            if d.x >= 0.0 { Self::PosX } else { Self::NegX }
        } else if a.y >= a.z {
            if d.y >= 0.0 { Self::PosY } else { Self::NegY }
        } else if d.z >= 0.0 {
            Self::PosZ
        } else {
            Self::NegZ
        }
    }
}

/// Six optional face textures sampled by direction. Missing faces sample white.
#[derive(Clone, Debug, Default)]
pub struct Cubemap {
    faces: [Option<Arc<Texture>>; 6],
}

impl Cubemap {
    /// Faces in [`CubeFace::ALL`] order.
    pub fn new(faces: [Option<Arc<Texture>>; 6]) -> Self {
        Self { faces }
    }

    /// One flat color per face, in [`CubeFace::ALL`] order.
    pub fn from_colors(colors: [Color; 6]) -> Self {
        Self {
            faces: colors.map(|c| Some(Arc::new(Texture::solid(c)))),
        }
    }

    /// Texture of one face, if loaded.
    pub fn face(&self, face: CubeFace) -> Option<&Texture> {
        self.faces[face as usize].as_deref()
    }

    /// Color seen along `dir`. Zero or non-finite directions sample white.
    pub fn sample(&self, dir: Vec3) -> Color {
        if dir.length_squared() <= f32::EPSILON || !dir.is_finite() {
            return WHITE;
        }
        let face = CubeFace::from_direction(dir);
        let (forward, up) = face.basis();
        let right = up.cross(forward);
        let major = dir.dot(forward);
        let uv = Vec2::new(dir.dot(right), dir.dot(up)) / major * 0.5 + Vec2::splat(0.5);
        sample_or_white(self.face(face), uv)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/texture.rs"]
mod tests;
