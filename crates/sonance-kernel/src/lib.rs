//! # Sonance Kernel
//!
//! Real-time channel gain computation for individual audio sources.
//!
//! For every active source, once per mix buffer, the mixing pipeline asks:
//! given where this sound is (or isn't) in space and where the listener is,
//! how loud should each output channel be? This crate answers with:
//! - A triangular pan law ([`pan_law`])
//! - Linear distance rolloff ([`DistanceRange`])
//! - Source kind dispatch ([`SourcePosition`])
//! - A listener-holding front end ([`SpatialMixer`])
//!
//! ## Real-time safety
//!
//! The gain path writes into a caller-owned `[f32; MAX_CHANNELS]` and never
//! allocates, locks, logs, or blocks. All types are plain `Copy` values, so
//! different render threads can compute gains for different sources
//! concurrently without synchronization.
//!
//! ## Contract checks
//!
//! Channel-count mismatches are programmer errors and trip debug assertions.
//! The `try_*` entry points report them as [`MixError`] instead.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod attenuation;
pub mod mixer;
pub mod pan_law;
pub mod panning;
pub mod source_position;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::attenuation::*;
    pub use crate::mixer::*;
    pub use crate::pan_law::*;
    pub use crate::panning::*;
    pub use crate::source_position::*;
    pub use sonance_common::prelude::*;
}

pub use prelude::*;
