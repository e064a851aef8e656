//! Gain reports for scene sources.

use std::fmt;

use sonance_common::{ChannelGains, MixError, MAX_CHANNELS};
use sonance_kernel::{pan_law, SpatialMixer, FIXED_SOURCE_PANS};

use crate::config::{SceneConfig, SourceEntry};

/// Gains computed for one scene source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    /// Source name from the scene
    pub name: String,
    /// Placement label
    pub kind: &'static str,
    /// One row per source channel, one column per output channel
    pub rows: Result<Vec<Vec<f32>>, MixError>,
}

impl SourceReport {
    /// Evaluate `entry` against the scene's layout.
    #[must_use]
    pub fn evaluate(mixer: &SpatialMixer, scene: &SceneConfig, entry: &SourceEntry) -> Self {
        let source = entry.placement.source_position();
        let source_channels = source.source_channels();
        let width = scene.channels.len();

        let gain = entry.gain * scene.gain;

        let mut dst: ChannelGains = [0.0; MAX_CHANNELS];
        let rows = mixer
            .try_channel_gains(&source, source_channels, &scene.channels, &mut dst, gain)
            .map(|()| {
                if source.is_pannable() {
                    vec![dst[..width].to_vec()]
                } else {
                    // The packed buffer overlaps rows past stereo, so rebuild each row
                    FIXED_SOURCE_PANS
                        .iter()
                        .map(|&src_pan| {
                            scene
                                .channels
                                .iter()
                                .map(|channel| pan_law(src_pan, channel.pan) * gain)
                                .collect()
                        })
                        .collect()
                }
            });

        Self {
            name: entry.name.clone(),
            kind: entry.placement.label(),
            rows,
        }
    }
}

impl fmt::Display for SourceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<16} {:<10}", self.name, self.kind)?;
        match &self.rows {
            Ok(rows) => {
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, "\n{:27}", "")?;
                    }
                    for gain in row {
                        write!(f, " {gain:>6.3}")?;
                    }
                }
                Ok(())
            },
            Err(e) => write!(f, " error: {e}"),
        }
    }
}

/// Evaluate every source in the scene, in scene order.
#[must_use]
pub fn evaluate_scene(scene: &SceneConfig) -> Vec<SourceReport> {
    let mut mixer = SpatialMixer::with_config(scene.panning);
    mixer.set_listener(scene.listener);

    scene
        .sources
        .iter()
        .map(|entry| SourceReport::evaluate(&mixer, scene, entry))
        .collect()
}
