//! Listener state consumed by the gain kernel.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Point of audition for positional sources.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerData {
    /// Position in world coordinates.
    pub position: Vec3,
}

impl ListenerData {
    /// Create a listener at a world position.
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Create a listener on the z = 0 plane.
    #[must_use]
    pub fn from_2d(position: Vec2) -> Self {
        Self::new(position.extend(0.0))
    }
}
