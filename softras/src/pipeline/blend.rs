//! Depth comparison and color compositing, both pure per-sample functions.

use glam::Vec4;

use crate::foundation::core::Color;
use crate::shading::state::{BlendMode, ZTest};

/// Whether a fragment at `depth` passes against the `stored` sample.
///
/// [`ZTest::Off`] passes unconditionally, like [`ZTest::Always`].
pub fn depth_test(depth: f32, stored: f32, mode: ZTest) -> bool {
    match mode {
        ZTest::Off | ZTest::Always => true,
        ZTest::Never => false,
        ZTest::Less => depth < stored,
        ZTest::Equal => depth == stored,
        ZTest::LessEqual => depth <= stored,
        ZTest::Greater => depth > stored,
        ZTest::NotEqual => depth != stored,
        ZTest::GreaterEqual => depth >= stored,
    }
}

/// Composite `src` over `dst`. Every operator applies per channel, alpha included.
pub fn blend_colors(src: Color, dst: Color, mode: BlendMode) -> Color {
    match mode {
        BlendMode::None => src,
        BlendMode::AlphaBlend => src * src.w + dst * (1.0 - src.w),
        BlendMode::Additive => (src + dst).min(Vec4::ONE),
        BlendMode::Subtractive => (dst - src).max(Vec4::ZERO),
        BlendMode::PremultipliedAlpha => src + dst * (1.0 - src.w),
        BlendMode::Multiply => src * dst,
        BlendMode::Screen => Vec4::ONE - (Vec4::ONE - src) * (Vec4::ONE - dst),
        BlendMode::Overlay => per_channel(src, dst, overlay),
        BlendMode::Darken => src.min(dst),
        BlendMode::Lighten => src.max(dst),
        BlendMode::ColorDodge => per_channel(src, dst, color_dodge),
        BlendMode::ColorBurn => per_channel(src, dst, color_burn),
        BlendMode::SoftLight => per_channel(src, dst, |s, d| (1.0 - 2.0 * s) * d * d + 2.0 * s * d),
        BlendMode::HardLight => per_channel(src, dst, |s, d| overlay(d, s)),
        BlendMode::Difference => (src - dst).abs(),
        BlendMode::Exclusion => src + dst - 2.0 * src * dst,
    }
}

fn per_channel(src: Color, dst: Color, f: impl Fn(f32, f32) -> f32) -> Color {
    Vec4::new(
        f(src.x, dst.x),
        f(src.y, dst.y),
        f(src.z, dst.z),
        f(src.w, dst.w),
    )
}

fn overlay(s: f32, d: f32) -> f32 {
    if d < 0.5 {
        2.0 * s * d
    } else {
        1.0 - 2.0 * (1.0 - s) * (1.0 - d)
    }
}

fn color_dodge(s: f32, d: f32) -> f32 {
    if s >= 1.0 {
        1.0
    } else {
        (d / (1.0 - s)).min(1.0)
    }
}

fn color_burn(s: f32, d: f32) -> f32 {
    if s <= 0.0 {
        0.0
    } else {
        1.0 - ((1.0 - d) / s).min(1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/blend.rs"]
mod tests;
