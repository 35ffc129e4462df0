use xxhash_rust::xxh3::Xxh3;

/// Below this magnitude the doubled signed screen area of a triangle counts as degenerate.
pub(crate) const DEGENERATE_AREA_EPSILON: f32 = 1e-5;

/// Samples closer than this many pixels to a triangle edge lie on it. The edge's fill rule decides
/// whether they are covered.
pub(crate) const INSIDE_EPSILON: f32 = 1e-4;

/// Guard for divisions by clip-space `w` and interpolation denominators.
pub(crate) const DIVISION_EPSILON: f32 = 1e-8;

const XXH3_SEED: u64 = 0x5f3a_91c2_d04e_7b19;

/// Stable 128-bit digest of a rendered frame.
///
/// Two renders of the same scene with the same options must produce the same fingerprint,
/// regardless of worker thread count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// High 64 bits of the digest.
    pub hi: u64,
    /// Low 64 bits of the digest.
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub(crate) fn fingerprint_rgba8(width: u32, height: u32, data: &[u8]) -> FrameFingerprint {
    let mut h = Xxh3::with_seed(XXH3_SEED);
    h.update(&width.to_le_bytes());
    h.update(&height.to_le_bytes());
    h.update(data);
    let v = h.digest128();
    FrameFingerprint {
        hi: (v >> 64) as u64,
        lo: v as u64,
    }
}

/// `a / b`, or `fallback` when `|b|` is too small to divide by safely.
pub(crate) fn safe_div(a: f32, b: f32, fallback: f32) -> f32 {
    if b.abs() < DIVISION_EPSILON {
        fallback
    } else {
        a / b
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
