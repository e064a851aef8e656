//! Scene configuration.
//!
//! A scene names a listener, an output layout, panning tuning, and a list of
//! sources. Scenes are loaded from and saved to TOML files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sonance_common::{ChannelData, ListenerData, MAX_CHANNELS, STEREO_LAYOUT};
use sonance_kernel::{PanningConfig, SourcePosition};
use thiserror::Error;
use tracing::{info, warn};

/// Scene file name used when no path is given.
pub const SCENE_FILE: &str = "sonance.toml";

/// Scene loading and saving errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The scene file exists but could not be read or written.
    #[error("Failed to access scene file '{path}': {source}")]
    Io {
        /// Path to the scene file
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// The scene file is not valid TOML for a scene.
    #[error("Failed to parse scene file '{path}': {source}")]
    Parse {
        /// Path to the scene file
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },

    /// The scene could not be encoded as TOML.
    #[error("Failed to encode scene: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Where a scene source sits, tagged by `kind` in the file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// UI sound with an explicit pan.
    UiPannable {
        /// Pan value (-1.0 to 1.0)
        pan: f32,
    },
    /// Stereo bed, not spatialized.
    Fixed,
    /// World sound.
    Positional {
        /// World position
        position: Vec3,
        /// Full-volume radius
        reference_distance: f32,
        /// Silent beyond this distance
        max_distance: f32,
    },
}

impl Placement {
    /// Build the kernel's source description.
    #[must_use]
    pub fn source_position(&self) -> SourcePosition {
        match *self {
            Self::UiPannable { pan } => SourcePosition::ui_pannable(pan),
            Self::Fixed => SourcePosition::fixed(),
            Self::Positional {
                position,
                reference_distance,
                max_distance,
            } => SourcePosition::positional(position, reference_distance, max_distance),
        }
    }

    /// Short label for reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UiPannable { .. } => "ui",
            Self::Fixed => "fixed",
            Self::Positional { .. } => "positional",
        }
    }
}

/// One named source in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Display name
    pub name: String,
    /// Source volume, already including fades
    #[serde(default = "unit_gain")]
    pub gain: f32,
    /// Placement
    #[serde(flatten)]
    pub placement: Placement,
}

fn unit_gain() -> f32 {
    1.0
}

/// A listener, an output layout, and the sources to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Master gain applied on top of each source's gain
    pub gain: f32,
    /// Destination channel pans, in output order
    pub channels: Vec<ChannelData>,
    /// Listener state
    pub listener: ListenerData,
    /// Positional panning tuning
    pub panning: PanningConfig,
    /// Sources to evaluate
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gain: 1.0,
            channels: STEREO_LAYOUT.to_vec(),
            listener: ListenerData::default(),
            panning: PanningConfig::default(),
            sources: vec![
                SourceEntry {
                    name: "menu_click".to_string(),
                    gain: 1.0,
                    placement: Placement::UiPannable { pan: -0.5 },
                },
                SourceEntry {
                    name: "ambience".to_string(),
                    gain: 0.6,
                    placement: Placement::Fixed,
                },
                SourceEntry {
                    name: "footsteps".to_string(),
                    gain: 1.0,
                    placement: Placement::Positional {
                        position: Vec3::new(20.0, 0.0, 0.0),
                        reference_distance: 10.0,
                        max_distance: 100.0,
                    },
                },
                SourceEntry {
                    name: "explosion".to_string(),
                    gain: 1.0,
                    placement: Placement::Positional {
                        position: Vec3::new(100.0, 0.0, 0.0),
                        reference_distance: 10.0,
                        max_distance: 50.0,
                    },
                },
            ],
        }
    }
}

impl SceneConfig {
    /// Load a scene from `path`.
    ///
    /// Returns the built-in demo scene if the file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Scene file {} not found, using demo scene", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut scene: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        scene.validate();

        info!(
            "Loaded scene from {} ({} sources, {} channels)",
            path.display(),
            scene.sources.len(),
            scene.channels.len()
        );
        Ok(scene)
    }

    /// Save the scene to `path`, creating parent directories if needed.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source: io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;

        info!("Saved scene to {}", path.display());
        Ok(())
    }

    /// Clamp values to ranges the kernel accepts.
    pub fn validate(&mut self) {
        self.gain = sanitize_gain(self.gain);
        for source in &mut self.sources {
            source.gain = sanitize_gain(source.gain);
        }

        if self.channels.len() > MAX_CHANNELS {
            warn!(
                "Scene has {} channels, keeping the first {MAX_CHANNELS}",
                self.channels.len()
            );
            self.channels.truncate(MAX_CHANNELS);
        }

        self.panning.validate();
    }
}

fn sanitize_gain(gain: f32) -> f32 {
    if gain.is_finite() {
        gain.max(0.0)
    } else {
        0.0
    }
}
