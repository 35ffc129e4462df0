use rayon::prelude::*;

use crate::foundation::core::{Color, TRANSPARENT, Viewport, color_to_rgba8};
use crate::foundation::math::{FrameFingerprint, fingerprint_rgba8};
use crate::render::msaa::MsaaMode;

/// Which buffers [`FrameBuffer::clear`] resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClearFlags {
    /// Reset color to the clear color.
    pub color: bool,
    /// Reset depth to the clear depth.
    pub depth: bool,
}

impl ClearFlags {
    /// Clear nothing.
    pub const NONE: Self = Self {
        color: false,
        depth: false,
    };
    /// Color only.
    pub const COLOR: Self = Self {
        color: true,
        depth: false,
    };
    /// Depth only.
    pub const DEPTH: Self = Self {
        color: false,
        depth: true,
    };
    /// Color and depth.
    pub const ALL: Self = Self {
        color: true,
        depth: true,
    };
}

impl std::ops::BitOr for ClearFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            color: self.color || rhs.color,
            depth: self.depth || rhs.depth,
        }
    }
}

/// A rendered frame as straight-alpha RGBA8 pixels, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Stable 128-bit hash of the dimensions and pixel bytes.
    pub fn fingerprint(&self) -> FrameFingerprint {
        fingerprint_rgba8(self.width, self.height, &self.data)
    }

    /// Pixel at column `x`, row `y` counted from the top.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Color and depth storage for one viewport.
///
/// Every pixel owns `sample_count` color and depth sub-samples, plus one resolved color. Screen
/// `y` grows upwards, so row 0 is the bottom row. The resolved buffer reflects the samples only
/// after [`FrameBuffer::resolve`].
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    msaa: MsaaMode,
    samples: usize,
    color: Vec<Color>,
    depth: Vec<f32>,
    resolved: Vec<Color>,
}

impl FrameBuffer {
    /// Allocate `sample_count` color and depth samples per pixel, cleared to transparent and `+inf`.
    pub fn new(viewport: Viewport, msaa: MsaaMode) -> Self {
        let width = viewport.width as usize;
        let height = viewport.height as usize;
        let samples = msaa.sample_count();
        let n = width * height;
        Self {
            width,
            height,
            msaa,
            samples,
            color: vec![TRANSPARENT; n * samples],
            depth: vec![f32::INFINITY; n * samples],
            resolved: vec![TRANSPARENT; n],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Extents of the buffer.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width as u32,
            height: self.height as u32,
        }
    }

    /// Sample layout this buffer was allocated for.
    pub fn msaa(&self) -> MsaaMode {
        self.msaa
    }

    /// Sub-samples stored per pixel.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    #[inline]
    fn sample_index(&self, x: usize, y: usize, s: usize) -> Option<usize> {
        (x < self.width && y < self.height && s < self.samples)
            .then(|| (y * self.width + x) * self.samples + s)
    }

    /// Reset color and/or depth for every sub-sample and the resolved buffer.
    pub fn clear(&mut self, flags: ClearFlags, color: Color, depth: f32) {
        let row = (self.width * self.samples).max(1);
        if flags.color {
            self.color
                .par_chunks_mut(row)
                .for_each(|r| r.fill(color));
            self.resolved
                .par_chunks_mut(self.width.max(1))
                .for_each(|r| r.fill(color));
        }
        if flags.depth {
            self.depth.par_chunks_mut(row).for_each(|r| r.fill(depth));
        }
    }

    /// Average every pixel's sub-samples into the resolved buffer.
    pub fn resolve(&mut self) {
        let samples = self.samples;
        let width = self.width.max(1);
        let inv = 1.0 / samples as f32;
        let color = &self.color;
        self.resolved
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, out)| {
                let base = y * width * samples;
                for (x, px) in out.iter_mut().enumerate() {
                    let start = base + x * samples;
                    let sum: Color = color[start..start + samples].iter().copied().sum();
                    *px = sum * inv;
                }
            });
    }

    /// Stored color of one sub-sample.
    pub fn color_sample(&self, x: u32, y: u32, sample: usize) -> Option<Color> {
        self.sample_index(x as usize, y as usize, sample)
            .map(|i| self.color[i])
    }

    /// Stored depth of one sub-sample.
    pub fn depth_sample(&self, x: u32, y: u32, sample: usize) -> Option<f32> {
        self.sample_index(x as usize, y as usize, sample)
            .map(|i| self.depth[i])
    }

    /// Write one sub-sample; out-of-range coordinates are ignored.
    pub fn write_sample(&mut self, x: u32, y: u32, sample: usize, color: Color, depth: Option<f32>) {
        if let Some(i) = self.sample_index(x as usize, y as usize, sample) {
            self.color[i] = color;
            if let Some(d) = depth {
                self.depth[i] = d;
            }
        }
    }

    /// Set every sub-sample of a pixel to `color`, leaving depth untouched.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        for s in 0..self.samples {
            self.write_sample(x, y, s, color, None);
        }
    }

    /// Resolved color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| self.resolved[y * self.width + x])
    }

    /// Depth of the pixel's first sub-sample.
    pub fn depth(&self, x: u32, y: u32) -> Option<f32> {
        self.depth_sample(x, y, 0)
    }

    /// Resolved colors, row 0 first and bottom up.
    pub fn resolved(&self) -> &[Color] {
        &self.resolved
    }

    /// Export the resolved buffer as RGBA8 with the top row first.
    pub fn to_frame_rgba(&self) -> FrameRGBA {
        let (w, h) = (self.width, self.height);
        let mut data = vec![0u8; w * h * 4];
        if w > 0 {
            data.par_chunks_mut(w * 4).enumerate().for_each(|(row, out)| {
                let src = &self.resolved[(h - 1 - row) * w..(h - row) * w];
                for (px, c) in out.chunks_exact_mut(4).zip(src) {
                    px.copy_from_slice(&color_to_rgba8(*c));
                }
            });
        }
        FrameRGBA {
            width: w as u32,
            height: h as u32,
            data,
        }
    }

    /// First-sample depth as opaque gray, top row first. NDC `-1` is black; `+1` and uncovered
    /// samples are white.
    pub fn depth_image(&self) -> FrameRGBA {
        let (w, h) = (self.width, self.height);
        let samples = self.samples;
        let mut data = vec![0u8; w * h * 4];
        if w > 0 {
            data.par_chunks_mut(w * 4).enumerate().for_each(|(row, out)| {
                let y = h - 1 - row;
                for (x, px) in out.chunks_exact_mut(4).enumerate() {
                    let d = self.depth[(y * w + x) * samples];
                    let t = if d.is_finite() { d * 0.5 + 0.5 } else { 1.0 };
                    let g = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
                    px.copy_from_slice(&[g, g, g, 255]);
                }
            });
        }
        FrameRGBA {
            width: w as u32,
            height: h as u32,
            data,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/framebuffer.rs"]
mod tests;
