//! # Core Error Types
//!
//! Everything here is a construction-time or programming error. Stale
//! handles are deliberately absent: they resolve to `None`.

use scm_shared::SharedError;
use thiserror::Error;

/// Errors raised by memory, pool and store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Host identification or layout failure.
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// A script global id outside `[2, 16383]`.
    #[error("global variable {id} is out of range, use a number between 2 and 16383 (0x3FFF)")]
    OutOfRangeIndex {
        /// The rejected id.
        id: i32,
    },

    /// A pool was requested for a category the layout does not know.
    #[error("unknown entity category: {0}")]
    UnknownCategory(String),

    /// The host could not resolve a symbol.
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// A pool header pointer or size read from the host is unusable.
    #[error("invalid {category} pool header at {header:#x}")]
    InvalidPoolHeader {
        /// Category whose header was read.
        category: String,
        /// Address of the header.
        header: usize,
    },

    /// A simulated memory region overlaps one already mapped.
    #[error("memory region {base:#x}+{len:#x} overlaps an existing mapping")]
    RegionOverlap {
        /// Requested base address.
        base: usize,
        /// Requested length.
        len: usize,
    },
}
