//! Error types for Sonance.

use thiserror::Error;

/// Precondition failures reported by the checked gain entry points.
///
/// The unchecked path treats these as programmer errors and asserts instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MixError {
    /// Source channel count does not match the source kind.
    #[error("Source channel count mismatch: expected {expected}, got {actual}")]
    ChannelCountMismatch {
        /// Channel count the source kind requires
        expected: usize,
        /// Channel count supplied by the caller
        actual: usize,
    },

    /// The destination layout needs more gain slots than the buffer holds.
    #[error("Destination layout needs {required} gain slots, buffer holds {capacity}")]
    LayoutTooWide {
        /// Slots the layout would write
        required: usize,
        /// Capacity of the gain buffer
        capacity: usize,
    },
}

/// Result type alias for checked mixing operations.
pub type MixResult<T> = Result<T, MixError>;
