//! Fixed-function state carried alongside every shader.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered draw tier. Lower queues draw first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "QueueRepr", into = "i32")]
pub struct RenderQueue(pub i32);

impl RenderQueue {
    /// Drawn first, e.g. skyboxes.
    pub const BACKGROUND: Self = Self(1000);
    /// Default for opaque geometry.
    pub const GEOMETRY: Self = Self(2000);
    /// Cutout geometry, after opaque.
    pub const ALPHA_TEST: Self = Self(2450);
    /// Blended geometry, sorted back to front.
    pub const TRANSPARENT: Self = Self(3000);
    /// Drawn last.
    pub const OVERLAY: Self = Self(4000);

    /// Queues in this range are sorted back to front.
    const TRANSPARENT_RANGE: std::ops::RangeInclusive<i32> = 2501..=3999;

    /// Raw queue number.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Whether drawables in this queue sort back to front.
    pub fn is_transparent(self) -> bool {
        Self::TRANSPARENT_RANGE.contains(&self.0)
    }

    /// Parse a named queue such as `"transparent"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "background" => Some(Self::BACKGROUND),
            "geometry" => Some(Self::GEOMETRY),
            "alpha_test" => Some(Self::ALPHA_TEST),
            "transparent" => Some(Self::TRANSPARENT),
            "overlay" => Some(Self::OVERLAY),
            _ => None,
        }
    }
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::GEOMETRY
    }
}

impl fmt::Display for RenderQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RenderQueue> for i32 {
    fn from(q: RenderQueue) -> Self {
        q.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QueueRepr {
    Value(i32),
    Name(String),
}

impl TryFrom<QueueRepr> for RenderQueue {
    type Error = String;

    fn try_from(repr: QueueRepr) -> Result<Self, Self::Error> {
        match repr {
            QueueRepr::Value(v) => Ok(Self(v)),
            QueueRepr::Name(name) => {
                Self::from_name(&name).ok_or_else(|| format!("unknown render queue '{name}'"))
            }
        }
    }
}

/// Which screen-space winding is rejected before rasterization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Draw both windings.
    None,
    /// Reject clockwise (front-facing) triangles.
    Front,
    /// Reject counter-clockwise (back-facing) triangles.
    #[default]
    Back,
}

/// Depth comparison applied before the fragment stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZTest {
    /// Depth testing disabled; behaves like [`ZTest::Always`].
    Off,
    /// Never passes.
    Never,
    /// Passes when nearer.
    Less,
    /// Passes on equal depth.
    Equal,
    /// Passes when nearer or equal.
    #[default]
    LessEqual,
    /// Passes when farther.
    Greater,
    /// Passes unless equal.
    NotEqual,
    /// Passes when farther or equal.
    GreaterEqual,
    /// Always passes.
    Always,
}

/// Compositing operator applied between the fragment color (`src`) and the stored color (`dst`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Overwrite `dst` with `src`.
    #[default]
    None,
    /// `src * src.a + dst * (1 - src.a)`.
    AlphaBlend,
    /// `src + dst`, saturated at one.
    Additive,
    /// `dst - src`, floored at zero.
    Subtractive,
    /// `src + dst * (1 - src.a)`.
    PremultipliedAlpha,
    /// `src * dst`.
    Multiply,
    /// `1 - (1 - src) * (1 - dst)`.
    Screen,
    /// Multiply or screen, keyed on `dst`.
    Overlay,
    /// Per-channel minimum.
    Darken,
    /// Per-channel maximum.
    Lighten,
    /// `dst / (1 - src)`, capped at one.
    ColorDodge,
    /// `1 - (1 - dst) / src`.
    ColorBurn,
    /// Soft contrast keyed on `src`.
    SoftLight,
    /// Overlay keyed on `src`.
    HardLight,
    /// `|src - dst|`.
    Difference,
    /// `src + dst - 2 * src * dst`.
    Exclusion,
}

impl BlendMode {
    /// Every mode in declaration order.
    pub const ALL: [Self; 16] = [
        Self::None,
        Self::AlphaBlend,
        Self::Additive,
        Self::Subtractive,
        Self::PremultipliedAlpha,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::SoftLight,
        Self::HardLight,
        Self::Difference,
        Self::Exclusion,
    ];
}

/// Fixed-function state of one shading program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderState {
    /// Draw order bucket.
    pub queue: RenderQueue,
    /// Winding rejected before rasterization.
    pub cull: CullMode,
    /// Depth comparison.
    pub z_test: ZTest,
    /// Whether passing samples store their depth.
    pub z_write: bool,
    /// Compositing operator.
    pub blend: BlendMode,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            queue: RenderQueue::GEOMETRY,
            cull: CullMode::Back,
            z_test: ZTest::LessEqual,
            z_write: true,
            blend: BlendMode::None,
        }
    }
}

/// Partial [`RenderState`] where every field is optional; used by scene overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderStateOverride {
    /// Replaces [`RenderState::queue`].
    pub queue: Option<RenderQueue>,
    /// Replaces [`RenderState::cull`].
    pub cull: Option<CullMode>,
    /// Replaces [`RenderState::z_test`].
    pub z_test: Option<ZTest>,
    /// Replaces [`RenderState::z_write`].
    pub z_write: Option<bool>,
    /// Replaces [`RenderState::blend`].
    pub blend: Option<BlendMode>,
}

impl RenderStateOverride {
    /// Overwrite the fields of `state` that are set here.
    pub fn apply(&self, state: &mut RenderState) {
        if let Some(q) = self.queue {
            state.queue = q;
        }
        if let Some(c) = self.cull {
            state.cull = c;
        }
        if let Some(z) = self.z_test {
            state.z_test = z;
        }
        if let Some(w) = self.z_write {
            state.z_write = w;
        }
        if let Some(b) = self.blend {
            state.blend = b;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/state.rs"]
mod tests;
