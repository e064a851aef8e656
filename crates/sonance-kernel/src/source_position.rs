//! Source placement and per-channel gain computation.
//!
//! A [`SourcePosition`] describes where one audio source sits relative to the
//! listener and turns that into one gain coefficient per destination channel.
//! It is called once per active source per mix buffer on the render thread,
//! so the gain path never allocates, locks, or logs.
//!
//! # Source kinds
//!
//! - **UI pannable**: mono, panned by an explicit pan value, no attenuation
//! - **Fixed**: stereo bed, left/right mapped onto hard-left/hard-right
//! - **Positional**: mono world sound, panned from its horizontal offset and
//!   attenuated linearly between its reference and max distances
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use sonance_common::{ChannelGains, ListenerData, MAX_CHANNELS, STEREO_LAYOUT};
//! use sonance_kernel::SourcePosition;
//!
//! let source = SourcePosition::positional(Vec3::new(20.0, 0.0, 0.0), 10.0, 50.0);
//! let listener = ListenerData::default();
//!
//! let mut gains: ChannelGains = [0.0; MAX_CHANNELS];
//! source.compute_channel_gains(1, &STEREO_LAYOUT, &mut gains, 1.0, &listener);
//!
//! // Right of the listener: louder on the right speaker
//! assert!(gains[1] > gains[0]);
//! ```

use glam::{Vec2, Vec3};
use sonance_common::{ChannelData, ChannelGains, ListenerData, MixError, MixResult, MAX_CHANNELS};

use crate::attenuation::DistanceRange;
use crate::pan_law::pan_law;
use crate::panning::PanningConfig;

/// Channel count of a fixed (stereo) source.
pub const FIXED_SOURCE_CHANNELS: usize = 2;

/// Virtual pans of a fixed source's left and right channels.
pub const FIXED_SOURCE_PANS: [f32; FIXED_SOURCE_CHANNELS] = [-1.0, 1.0];

/// Spatial configuration of one audio source.
///
/// Immutable once built; moving a source means building a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SourcePosition {
    /// Mono UI sound panned directly, never attenuated.
    UiPannable {
        /// Pan value, conventionally -1.0 to 1.0.
        pan: f32,
    },
    /// Stereo sound mixed straight to the speakers.
    #[default]
    Fixed,
    /// Mono sound placed in the world.
    Positional {
        /// World position.
        position: Vec3,
        /// Attenuation thresholds.
        range: DistanceRange,
    },
}

impl SourcePosition {
    /// UI sound with an explicit pan.
    #[must_use]
    pub const fn ui_pannable(pan: f32) -> Self {
        Self::UiPannable { pan }
    }

    /// World sound at `position`.
    ///
    /// `reference_distance` is raised to at least 0.1 and `max_distance` to at
    /// least the resulting reference distance.
    #[must_use]
    pub fn positional(position: Vec3, reference_distance: f32, max_distance: f32) -> Self {
        Self::Positional {
            position,
            range: DistanceRange::new(reference_distance, max_distance),
        }
    }

    /// World sound on the z = 0 plane.
    #[must_use]
    pub fn positional_2d(position: Vec2, reference_distance: f32, max_distance: f32) -> Self {
        Self::positional(position.extend(0.0), reference_distance, max_distance)
    }

    /// Stereo sound that is neither panned nor attenuated.
    #[must_use]
    pub const fn fixed() -> Self {
        Self::Fixed
    }

    /// Same source moved to `position`. Non-positional sources are returned unchanged.
    #[must_use]
    pub const fn moved_to(self, position: Vec3) -> Self {
        match self {
            Self::Positional { range, .. } => Self::Positional { position, range },
            other => other,
        }
    }

    /// Whether the source ignores listener distance.
    #[must_use]
    pub const fn is_ui_anchored(&self) -> bool {
        !matches!(self, Self::Positional { .. })
    }

    /// Whether the source is mono and spread by the pan law.
    #[must_use]
    pub const fn is_pannable(&self) -> bool {
        !matches!(self, Self::Fixed)
    }

    /// Position vector. UI sources carry their pan in `x`; fixed sources sit at the origin.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        match *self {
            Self::UiPannable { pan } => Vec3::new(pan, 0.0, 0.0),
            Self::Fixed => Vec3::ZERO,
            Self::Positional { position, .. } => position,
        }
    }

    /// Reference distance of a positional source.
    #[must_use]
    pub const fn reference_distance(&self) -> Option<f32> {
        match self {
            Self::Positional { range, .. } => Some(range.reference()),
            _ => None,
        }
    }

    /// Max distance of a positional source.
    #[must_use]
    pub const fn max_distance(&self) -> Option<f32> {
        match self {
            Self::Positional { range, .. } => Some(range.max()),
            _ => None,
        }
    }

    /// Number of channels the source signal must have.
    #[must_use]
    pub const fn source_channels(&self) -> usize {
        match self {
            Self::Fixed => FIXED_SOURCE_CHANNELS,
            _ => 1,
        }
    }

    /// Number of leading gain slots written for a layout of `dst_channels` outputs.
    ///
    /// Fixed sources write slot `i * 2 + j` for source channel `i` and
    /// destination `j`, so they reach two slots past the layout width.
    #[must_use]
    pub const fn output_slots(&self, dst_channels: usize) -> usize {
        match self {
            Self::Fixed if dst_channels > 0 => {
                (FIXED_SOURCE_CHANNELS - 1) * FIXED_SOURCE_CHANNELS + dst_channels
            },
            Self::Fixed => 0,
            _ => dst_channels,
        }
    }

    /// Check the call contract of [`Self::compute_channel_gains`].
    pub fn validate_mix(&self, source_channels: usize, dst_channels: usize) -> MixResult<()> {
        let expected = self.source_channels();
        if source_channels != expected {
            return Err(MixError::ChannelCountMismatch {
                expected,
                actual: source_channels,
            });
        }

        let required = self.output_slots(dst_channels);
        if required > MAX_CHANNELS {
            return Err(MixError::LayoutTooWide {
                required,
                capacity: MAX_CHANNELS,
            });
        }

        Ok(())
    }

    /// Fill `dst` with the gain of this source on each destination channel,
    /// using the default panning tuning.
    ///
    /// `source_channels` must be 1 for pannable sources and 2 for fixed ones,
    /// and the layout must fit the gain buffer; violations are programmer
    /// errors and trip a debug assertion. Slots past the written prefix are
    /// left untouched.
    #[inline]
    pub fn compute_channel_gains(
        &self,
        source_channels: usize,
        dst_channels: &[ChannelData],
        dst: &mut ChannelGains,
        gain: f32,
        listener: &ListenerData,
    ) {
        self.compute_channel_gains_with(
            &PanningConfig::DEFAULT,
            source_channels,
            dst_channels,
            dst,
            gain,
            listener,
        );
    }

    /// [`Self::compute_channel_gains`] with explicit panning tuning.
    pub fn compute_channel_gains_with(
        &self,
        config: &PanningConfig,
        source_channels: usize,
        dst_channels: &[ChannelData],
        dst: &mut ChannelGains,
        gain: f32,
        listener: &ListenerData,
    ) {
        debug_assert!(
            self.validate_mix(source_channels, dst_channels.len()).is_ok(),
            "invalid mix for {self:?}: {source_channels} source channels into {} outputs",
            dst_channels.len()
        );

        match *self {
            Self::UiPannable { pan } => {
                for (out, channel) in dst.iter_mut().zip(dst_channels) {
                    *out = pan_law(pan, channel.pan) * gain;
                }
            },
            Self::Positional { position, range } => {
                let delta = position - listener.position;
                let pan = config.positional_pan(delta.x);
                let rolloff = range.rolloff(delta.length());

                for (out, channel) in dst.iter_mut().zip(dst_channels) {
                    *out = pan_law(pan, channel.pan) * gain * rolloff;
                }
            },
            Self::Fixed => {
                for (i, &src_pan) in FIXED_SOURCE_PANS.iter().enumerate() {
                    for (j, channel) in dst_channels.iter().enumerate() {
                        dst[i * FIXED_SOURCE_CHANNELS + j] = pan_law(src_pan, channel.pan) * gain;
                    }
                }
            },
        }
    }

    /// Checked variant of [`Self::compute_channel_gains`].
    ///
    /// Returns an error instead of asserting when the contract is violated;
    /// `dst` is not touched in that case.
    pub fn try_compute_channel_gains(
        &self,
        source_channels: usize,
        dst_channels: &[ChannelData],
        dst: &mut ChannelGains,
        gain: f32,
        listener: &ListenerData,
    ) -> MixResult<()> {
        self.try_compute_channel_gains_with(
            &PanningConfig::DEFAULT,
            source_channels,
            dst_channels,
            dst,
            gain,
            listener,
        )
    }

    /// [`Self::try_compute_channel_gains`] with explicit panning tuning.
    pub fn try_compute_channel_gains_with(
        &self,
        config: &PanningConfig,
        source_channels: usize,
        dst_channels: &[ChannelData],
        dst: &mut ChannelGains,
        gain: f32,
        listener: &ListenerData,
    ) -> MixResult<()> {
        self.validate_mix(source_channels, dst_channels.len())?;
        self.compute_channel_gains_with(config, source_channels, dst_channels, dst, gain, listener);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panning::PanRange;
    use proptest::prelude::*;
    use sonance_common::{MONO_LAYOUT, STEREO_LAYOUT};

    /// Sentinel for slots the kernel must not write.
    const UNTOUCHED: f32 = -7.0;

    fn gains() -> ChannelGains {
        [UNTOUCHED; MAX_CHANNELS]
    }

    #[test]
    fn test_ui_pannable_construction() {
        let source = SourcePosition::ui_pannable(0.25);
        assert!(source.is_ui_anchored());
        assert!(source.is_pannable());
        assert_eq!(source.position(), Vec3::new(0.25, 0.0, 0.0));
        assert_eq!(source.reference_distance(), None);
        assert_eq!(source.source_channels(), 1);
    }

    #[test]
    fn test_fixed_construction() {
        let source = SourcePosition::fixed();
        assert!(source.is_ui_anchored());
        assert!(!source.is_pannable());
        assert_eq!(source.source_channels(), 2);
        assert_eq!(SourcePosition::default(), source);
    }

    #[test]
    fn test_positional_construction() {
        let source = SourcePosition::positional(Vec3::new(1.0, 2.0, 3.0), 10.0, 50.0);
        assert!(!source.is_ui_anchored());
        assert!(source.is_pannable());
        assert_eq!(source.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(source.reference_distance(), Some(10.0));
        assert_eq!(source.max_distance(), Some(50.0));
    }

    #[test]
    fn test_positional_clamps_distances() {
        let source = SourcePosition::positional(Vec3::ZERO, -5.0, -1.0);
        assert_eq!(source.reference_distance(), Some(0.1));
        assert_eq!(source.max_distance(), Some(0.1));
    }

    #[test]
    fn test_positional_2d_lifts_to_plane() {
        let source = SourcePosition::positional_2d(Vec2::new(4.0, 5.0), 1.0, 2.0);
        assert_eq!(source.position(), Vec3::new(4.0, 5.0, 0.0));
    }

    #[test]
    fn test_moved_to_keeps_range() {
        let source = SourcePosition::positional(Vec3::ZERO, 3.0, 9.0);
        let moved = source.moved_to(Vec3::X);
        assert_eq!(moved.position(), Vec3::X);
        assert_eq!(moved.reference_distance(), Some(3.0));
        assert_eq!(moved.max_distance(), Some(9.0));

        let ui = SourcePosition::ui_pannable(0.5);
        assert_eq!(ui.moved_to(Vec3::X), ui);
    }

    #[test]
    fn test_ui_matching_pan_full_gain() {
        let source = SourcePosition::ui_pannable(-1.0);
        let mut dst = gains();
        source.compute_channel_gains(1, &STEREO_LAYOUT, &mut dst, 0.8, &ListenerData::default());

        assert!((dst[0] - 0.8).abs() < f32::EPSILON);
        assert!(dst[1].abs() < f32::EPSILON);
    }

    #[test]
    fn test_ui_centered_splits_evenly() {
        let source = SourcePosition::ui_pannable(0.0);
        let mut dst = gains();
        source.compute_channel_gains(1, &STEREO_LAYOUT, &mut dst, 1.0, &ListenerData::default());

        assert!((dst[0] - 0.5).abs() < f32::EPSILON);
        assert!((dst[1] - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ui_ignores_listener() {
        let source = SourcePosition::ui_pannable(1.0);
        let far_listener = ListenerData::new(Vec3::splat(10_000.0));
        let mut dst = gains();
        source.compute_channel_gains(1, &STEREO_LAYOUT, &mut dst, 1.0, &far_listener);

        assert!((dst[1] - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pannable_leaves_tail_untouched() {
        let source = SourcePosition::ui_pannable(0.0);
        let mut dst = gains();
        source.compute_channel_gains(1, &STEREO_LAYOUT, &mut dst, 1.0, &ListenerData::default());

        assert!(dst[2..].iter().all(|&g| g == UNTOUCHED));
    }

    #[test]
    fn test_positional_at_reference_distance_full_gain() {
        let source = SourcePosition::positional(Vec3::new(0.0, 10.0, 0.0), 10.0, 50.0);
        let mut dst = gains();
        source.compute_channel_gains(1, &MONO_LAYOUT, &mut dst, 0.5, &ListenerData::default());

        // Straight ahead: pan 0, rolloff 1
        assert!((dst[0] - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_positional_at_max_distance_silent() {
        let source = SourcePosition::positional(Vec3::new(0.0, 50.0, 0.0), 10.0, 50.0);
        let mut dst = gains();
        source.compute_channel_gains(1, &MONO_LAYOUT, &mut dst, 1.0, &ListenerData::default());

        assert!(dst[0].abs() < f32::EPSILON);
    }

    #[test]
    fn test_positional_midway_half_gain() {
        let source = SourcePosition::positional(Vec3::new(0.0, 0.0, 30.0), 10.0, 50.0);
        let mut dst = gains();
        source.compute_channel_gains(1, &MONO_LAYOUT, &mut dst, 1.0, &ListenerData::default());

        assert!((dst[0] - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_positional_beyond_max_distance_silent() {
        let source = SourcePosition::positional(Vec3::new(100.0, 0.0, 0.0), 10.0, 50.0);
        let mut dst = gains();
        source.compute_channel_gains(1, &MONO_LAYOUT, &mut dst, 1.0, &ListenerData::default());

        assert_eq!(dst[0], 0.0);
    }

    #[test]
    fn test_positional_relative_to_listener() {
        let source = SourcePosition::positional(Vec3::new(100.0, 0.0, 0.0), 10.0, 50.0);
        let listener = ListenerData::new(Vec3::new(100.0, 5.0, 0.0));
        let mut dst = gains();
        source.compute_channel_gains(1, &STEREO_LAYOUT, &mut dst, 1.0, &listener);

        // Inside the reference distance and level with the listener
        assert!((dst[0] - 0.5).abs() < f32::EPSILON);
        assert!((dst[1] - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_positional_pans_right_and_centers_left() {
        let listener = ListenerData::default();
        let mut dst = gains();

        let right = SourcePosition::positional(Vec3::new(5.0, 0.0, 0.0), 10.0, 50.0);
        right.compute_channel_gains(1, &STEREO_LAYOUT, &mut dst, 1.0, &listener);
        assert!(dst[1] > dst[0]);

        // Left offsets clamp to pan 0 by default
        let left = SourcePosition::positional(Vec3::new(-50.0, 0.0, 0.0), 100.0, 200.0);
        left.compute_channel_gains(1, &STEREO_LAYOUT, &mut dst, 1.0, &listener);
        assert_eq!(dst[0], 0.5);
        assert_eq!(dst[1], 0.5);
    }

    #[test]
    fn test_positional_bipolar_pans_left_sources() {
        let config = PanningConfig::DEFAULT.with_pan_range(PanRange::Bipolar);
        let left = SourcePosition::positional(Vec3::new(-50.0, 0.0, 0.0), 100.0, 200.0);
        let mut dst = gains();
        left.compute_channel_gains_with(
            &config,
            1,
            &STEREO_LAYOUT,
            &mut dst,
            1.0,
            &ListenerData::default(),
        );

        assert!((dst[0] - 0.75).abs() < 0.0001);
        assert!((dst[1] - 0.25).abs() < 0.0001);
    }

    #[test]
    fn test_positional_degenerate_range_is_finite() {
        let source = SourcePosition::positional(Vec3::new(0.0, 10.0, 0.0), 10.0, 10.0);
        let mut dst = gains();
        source.compute_channel_gains(1, &MONO_LAYOUT, &mut dst, 1.0, &ListenerData::default());

        assert!(dst[0].is_finite());
        assert!((dst[0] - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fixed_stereo_to_stereo() {
        let source = SourcePosition::fixed();
        let mut dst = gains();
        source.compute_channel_gains(2, &STEREO_LAYOUT, &mut dst, 1.0, &ListenerData::default());

        // Left source channel
        assert!((dst[0] - 1.0).abs() < f32::EPSILON);
        assert!(dst[1].abs() < f32::EPSILON);
        // Right source channel
        assert!(dst[2].abs() < f32::EPSILON);
        assert!((dst[3] - 1.0).abs() < f32::EPSILON);

        assert!(dst[4..].iter().all(|&g| g == UNTOUCHED));
    }

    #[test]
    fn test_fixed_ignores_listener_distance() {
        let source = SourcePosition::fixed();
        let far_listener = ListenerData::new(Vec3::splat(1.0e6));
        let mut dst = gains();
        source.compute_channel_gains(2, &STEREO_LAYOUT, &mut dst, 0.25, &far_listener);

        assert!((dst[0] - 0.25).abs() < f32::EPSILON);
        assert!((dst[3] - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fixed_to_mono_folds_down() {
        let source = SourcePosition::fixed();
        let mut dst = gains();
        source.compute_channel_gains(2, &MONO_LAYOUT, &mut dst, 1.0, &ListenerData::default());

        assert!((dst[0] - 0.5).abs() < f32::EPSILON);
        assert!(dst[1] == UNTOUCHED);
        assert!((dst[2] - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fixed_wide_layout_right_channel_overwrites() {
        let layout = [ChannelData::new(0.0), ChannelData::new(0.5), ChannelData::LEFT];
        let source = SourcePosition::fixed();
        let mut dst = gains();
        source.compute_channel_gains(2, &layout, &mut dst, 1.0, &ListenerData::default());

        // Left channel row starts at slot 0
        assert!((dst[0] - 0.5).abs() < f32::EPSILON);
        assert!((dst[1] - 0.25).abs() < f32::EPSILON);
        // Slot 2 is shared: the left row's 1.0 is replaced by right -> output 0
        assert!((dst[2] - 0.5).abs() < f32::EPSILON);
        assert!((dst[3] - 0.75).abs() < f32::EPSILON);
        assert!(dst[4].abs() < f32::EPSILON);
        assert!(dst[5..].iter().all(|&g| g == UNTOUCHED));
    }

    #[test]
    fn test_output_slots() {
        assert_eq!(SourcePosition::ui_pannable(0.0).output_slots(5), 5);
        assert_eq!(SourcePosition::fixed().output_slots(0), 0);
        assert_eq!(SourcePosition::fixed().output_slots(2), 4);
        assert_eq!(SourcePosition::fixed().output_slots(14), 16);
    }

    #[test]
    fn test_try_rejects_channel_mismatch() {
        let mut dst = gains();
        let err = SourcePosition::fixed()
            .try_compute_channel_gains(1, &STEREO_LAYOUT, &mut dst, 1.0, &ListenerData::default())
            .expect_err("mono into fixed source");

        assert_eq!(
            err,
            MixError::ChannelCountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(dst.iter().all(|&g| g == UNTOUCHED));
    }

    #[test]
    fn test_try_rejects_wide_layout() {
        let layout = [ChannelData::CENTER; 15];
        let mut dst = gains();
        let err = SourcePosition::fixed()
            .try_compute_channel_gains(2, &layout, &mut dst, 1.0, &ListenerData::default())
            .expect_err("too wide");

        assert_eq!(
            err,
            MixError::LayoutTooWide {
                required: 17,
                capacity: MAX_CHANNELS
            }
        );
    }

    #[test]
    fn test_try_accepts_full_width_pannable() {
        let layout = [ChannelData::CENTER; MAX_CHANNELS];
        let mut dst = gains();
        SourcePosition::ui_pannable(0.0)
            .try_compute_channel_gains(1, &layout, &mut dst, 1.0, &ListenerData::default())
            .expect("sixteen outputs fit");

        assert!(dst.iter().all(|&g| (g - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid mix")]
    fn test_stereo_into_pannable_asserts() {
        let mut dst = gains();
        SourcePosition::ui_pannable(0.0).compute_channel_gains(
            2,
            &STEREO_LAYOUT,
            &mut dst,
            1.0,
            &ListenerData::default(),
        );
    }

    proptest! {
        #[test]
        fn prop_gains_never_exceed_base_gain(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            gain in 0.0f32..2.0,
        ) {
            let source = SourcePosition::positional(Vec3::new(x, y, 0.0), 10.0, 200.0);
            let mut dst = gains();
            source.compute_channel_gains(1, &STEREO_LAYOUT, &mut dst, gain, &ListenerData::default());

            for &g in &dst[..2] {
                prop_assert!(g >= 0.0);
                prop_assert!(g <= gain);
            }
        }
    }
}
