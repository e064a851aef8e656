//! Horizontal pan projection for world-positional sources.
//!
//! A positional source is panned from its x-offset to the listener scaled by
//! a fixed sensitivity. This is a linear horizontal approximation, not a true
//! azimuth model: a source 100 world units to the right pans hard right at
//! the default sensitivity, regardless of its depth or height.

use serde::{Deserialize, Serialize};

/// World units to pan units for positional sources.
pub const DEFAULT_PAN_SENSITIVITY: f32 = 0.01;

/// Range positional pans are clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanRange {
    /// Full left-to-right range, matching UI pans (-1.0 to 1.0). Opt-in.
    Bipolar,
    /// Center-to-right only (0.0 to 1.0); sources left of the listener play
    /// centered. Existing mixes are balanced against this clamp.
    #[default]
    Unipolar,
}

impl PanRange {
    /// Lower and upper pan bounds.
    #[must_use]
    pub const fn bounds(self) -> (f32, f32) {
        match self {
            Self::Bipolar => (-1.0, 1.0),
            Self::Unipolar => (0.0, 1.0),
        }
    }

    /// Clamp a pan value into this range.
    #[inline]
    #[must_use]
    pub fn clamp(self, pan: f32) -> f32 {
        let (lo, hi) = self.bounds();
        pan.clamp(lo, hi)
    }

    /// Get a human-readable name for this range.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bipolar => "Bipolar",
            Self::Unipolar => "Unipolar",
        }
    }
}

/// Tuning for how positional sources map onto the pan axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanningConfig {
    /// Pan units per world unit of horizontal offset.
    pub pan_sensitivity: f32,
    /// Clamp range for the projected pan.
    pub pan_range: PanRange,
}

impl Default for PanningConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PanningConfig {
    /// Default tuning, usable in const contexts.
    pub const DEFAULT: Self = Self {
        pan_sensitivity: DEFAULT_PAN_SENSITIVITY,
        pan_range: PanRange::Unipolar,
    };

    /// Set the pan sensitivity.
    #[must_use]
    pub const fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.pan_sensitivity = sensitivity;
        self
    }

    /// Set the pan clamp range.
    #[must_use]
    pub const fn with_pan_range(mut self, range: PanRange) -> Self {
        self.pan_range = range;
        self
    }

    /// Replace out-of-range values loaded from configuration.
    pub fn validate(&mut self) {
        if self.pan_sensitivity.is_finite() {
            self.pan_sensitivity = self.pan_sensitivity.max(0.0);
        } else {
            self.pan_sensitivity = DEFAULT_PAN_SENSITIVITY;
        }
    }

    /// Pan for a source `offset_x` world units to the right of the listener.
    #[inline]
    #[must_use]
    pub fn positional_pan(&self, offset_x: f32) -> f32 {
        self.pan_range.clamp(offset_x * self.pan_sensitivity)
    }
}
