//! Triangular pan law shared by every source kind.

/// Pan width over which a source fades from full gain to silence.
const PAN_FALLOFF: f32 = 0.5;

/// Gain of a source at `src_pan` heard through a speaker at `dst_pan`.
///
/// Linear crossfade: 1.0 when the pans match, 0.0 once they are 2.0 apart
/// (opposite extremes), never negative. No trigonometry, so it is safe to
/// call per channel on the render thread.
#[inline]
#[must_use]
pub fn pan_law(src_pan: f32, dst_pan: f32) -> f32 {
    (1.0 - PAN_FALLOFF * (src_pan - dst_pan).abs()).max(0.0)
}
