//! # Shared Error Types
//!
//! Startup failures that depend only on the host identity and layout data.

use thiserror::Error;

/// Errors raised while identifying the host or loading its layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// The host string is unknown, or no layout exists for it.
    #[error("unsupported host: {host}")]
    UnsupportedHost {
        /// The host identifier as reported by the runtime.
        host: String,
    },

    /// The CLEO runtime is older than required.
    #[error("minimum required CLEO version: {required} (found {found})")]
    VersionTooOld {
        /// Minimum version.
        required: String,
        /// Version reported by the host.
        found: String,
    },

    /// A version string is not `major.minor.patch`.
    #[error("malformed version string: {0:?}")]
    MalformedVersion(String),

    /// The layout document failed to parse or is inconsistent.
    #[error("invalid build layout: {0}")]
    InvalidLayout(String),
}
