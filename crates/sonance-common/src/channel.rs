//! Destination channel descriptions and the fixed-capacity gain buffer.

use serde::{Deserialize, Serialize};

/// Maximum number of output channels the engine mixes into.
pub const MAX_CHANNELS: usize = 16;

/// Per-channel gain coefficients written by the gain kernel.
///
/// Only a prefix is written per call; callers must not assume the rest is zeroed.
pub type ChannelGains = [f32; MAX_CHANNELS];

/// One destination (output) channel as seen by the panner.
///
/// Serialized as a bare pan value, so a layout reads as `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelData {
    /// Speaker pan assignment (-1.0 = left, 0.0 = center, 1.0 = right).
    pub pan: f32,
}

impl ChannelData {
    /// Hard-left speaker.
    pub const LEFT: Self = Self::new(-1.0);
    /// Center speaker.
    pub const CENTER: Self = Self::new(0.0);
    /// Hard-right speaker.
    pub const RIGHT: Self = Self::new(1.0);

    /// Creates a channel with the given pan assignment.
    #[must_use]
    pub const fn new(pan: f32) -> Self {
        Self { pan }
    }
}

impl From<f32> for ChannelData {
    fn from(pan: f32) -> Self {
        Self::new(pan)
    }
}

/// Single centered output.
pub const MONO_LAYOUT: [ChannelData; 1] = [ChannelData::CENTER];

/// Left/right output pair.
pub const STEREO_LAYOUT: [ChannelData; 2] = [ChannelData::LEFT, ChannelData::RIGHT];
