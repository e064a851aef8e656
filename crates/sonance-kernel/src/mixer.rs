//! Listener-holding front end for the gain kernel.
//!
//! [`SpatialMixer`] bundles the panning tuning with the current listener so
//! the mixing pipeline can hand it a source and a layout without threading
//! both through every call. It is a plain `Copy` value: the render thread
//! reads a snapshot, the game thread replaces it.

use glam::Vec3;
use sonance_common::{ChannelData, ChannelGains, ListenerData, MixResult};
use tracing::debug;

use crate::panning::PanningConfig;
use crate::source_position::SourcePosition;

/// Computes channel gains for sources relative to one listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMixer {
    /// Panning tuning for positional sources.
    config: PanningConfig,
    /// Current listener state.
    listener: ListenerData,
}

impl Default for SpatialMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialMixer {
    /// Create a mixer with default tuning and the listener at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PanningConfig::DEFAULT)
    }

    /// Create a mixer with explicit tuning.
    #[must_use]
    pub fn with_config(mut config: PanningConfig) -> Self {
        config.validate();
        debug!(
            pan_sensitivity = config.pan_sensitivity,
            pan_range = config.pan_range.name(),
            "Created spatial mixer"
        );
        Self {
            config,
            listener: ListenerData::default(),
        }
    }

    /// Set the listener state.
    pub fn set_listener(&mut self, listener: ListenerData) {
        self.listener = listener;
    }

    /// Update listener position.
    pub fn set_listener_position(&mut self, position: Vec3) {
        self.listener.position = position;
    }

    /// Get the current listener state.
    #[must_use]
    pub const fn listener(&self) -> &ListenerData {
        &self.listener
    }

    /// Get the panning tuning.
    #[must_use]
    pub const fn config(&self) -> &PanningConfig {
        &self.config
    }

    /// Fill `dst` with `source`'s gain on each channel of `dst_channels`.
    ///
    /// Same contract as [`SourcePosition::compute_channel_gains`].
    #[inline]
    pub fn channel_gains(
        &self,
        source: &SourcePosition,
        source_channels: usize,
        dst_channels: &[ChannelData],
        dst: &mut ChannelGains,
        gain: f32,
    ) {
        source.compute_channel_gains_with(
            &self.config,
            source_channels,
            dst_channels,
            dst,
            gain,
            &self.listener,
        );
    }

    /// Checked variant of [`Self::channel_gains`].
    pub fn try_channel_gains(
        &self,
        source: &SourcePosition,
        source_channels: usize,
        dst_channels: &[ChannelData],
        dst: &mut ChannelGains,
        gain: f32,
    ) -> MixResult<()> {
        source.try_compute_channel_gains_with(
            &self.config,
            source_channels,
            dst_channels,
            dst,
            gain,
            &self.listener,
        )
    }
}
