//! # Sonance Common
//!
//! Shared value types for the Sonance spatial gain core.
//!
//! This crate provides the types exchanged between the mixing pipeline and
//! the gain kernel:
//! - Destination channel descriptions ([`ChannelData`])
//! - Listener state ([`ListenerData`])
//! - The engine-wide channel limit and gain buffer type
//! - Error types for checked gain computation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod channel;
pub mod error;
pub mod listener;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::channel::*;
    pub use crate::error::*;
    pub use crate::listener::*;
}

pub use prelude::*;
