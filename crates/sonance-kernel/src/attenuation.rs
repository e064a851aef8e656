//! Linear distance rolloff for positional sources.

use tracing::debug;

/// Smallest reference distance a positional source may use.
pub const MIN_REFERENCE_DISTANCE: f32 = 0.1;

/// Distance thresholds between which a positional source fades out.
///
/// Always satisfies `MIN_REFERENCE_DISTANCE <= reference <= max`; degenerate
/// inputs are clamped on construction rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    reference: f32,
    max: f32,
}

impl DistanceRange {
    /// Create a range, clamping `reference` up to [`MIN_REFERENCE_DISTANCE`]
    /// and `max` up to the clamped reference.
    #[must_use]
    pub fn new(reference_distance: f32, max_distance: f32) -> Self {
        let reference = reference_distance.max(MIN_REFERENCE_DISTANCE);
        let max = max_distance.max(reference);

        if reference != reference_distance || max != max_distance {
            debug!(
                requested_reference = reference_distance,
                requested_max = max_distance,
                reference,
                max,
                "Clamped source distance range"
            );
        }

        Self { reference, max }
    }

    /// Distance within which the source plays unattenuated.
    #[must_use]
    pub const fn reference(&self) -> f32 {
        self.reference
    }

    /// Distance beyond which the source is silent.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Attenuation factor (0.0-1.0) at `distance` from the listener.
    ///
    /// 1.0 at or inside the reference distance, 0.0 at or beyond the max
    /// distance, linear in between. When both thresholds coincide this is a
    /// hard step at that distance.
    #[inline]
    #[must_use]
    pub fn rolloff(&self, distance: f32) -> f32 {
        if distance <= self.reference {
            return 1.0;
        }
        if distance >= self.max {
            return 0.0;
        }
        1.0 - (distance - self.reference) / (self.max - self.reference)
    }
}
