//! # Runtime Error Types

use scm_core::CoreError;
use scm_shared::SharedError;
use scm_ui::UiError;
use thiserror::Error;

/// Errors that abort runtime startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Host, version or layout problem.
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// Symbol or pool resolution problem.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Text ring problem.
    #[error(transparent)]
    Ui(#[from] UiError),

    /// The script space does not fit the 32-bit bootstrap patch.
    #[error("script space at {0:#x} is outside the 32-bit address space")]
    ScriptSpaceOutOfRange(usize),

    /// Configuration document could not be parsed.
    #[error("invalid runtime config: {0}")]
    InvalidConfig(String),
}
