//! # UI Error Types

use scm_core::CoreError;
use thiserror::Error;

/// Errors raised while configuring or drawing text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// A colour name missing from the palette. Raised on first draw.
    #[error("unknown color name: {0:?}")]
    UnknownColorName(String),

    /// A colour string that is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid hex color: {0:?}")]
    InvalidHexColor(String),

    /// A dimension or opacity string that is not a number or `N%`.
    #[error("invalid percentage: {0:?}")]
    InvalidPercent(String),

    /// The host's slot stride cannot hold a drawable slot plus text.
    #[error("text slot stride {stride} is smaller than the required {required} bytes")]
    SlotTooSmall {
        /// Stride from the build layout.
        stride: u32,
        /// Minimum stride.
        required: u32,
    },

    /// The host's text ring has no slots.
    #[error("text ring has no slots")]
    EmptyRing,

    /// Symbol resolution or other core failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}
