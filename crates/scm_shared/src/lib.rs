//! # SCM Shared
//!
//! Host-keyed facts used by every other SCM crate.
//!
//! ## CRITICAL RULE
//!
//! This crate never touches host memory. It only answers questions like
//! "which build is this?" and "where does that build keep its vehicle pool?".
//! Reading and writing belongs to `scm_core`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod constants;
pub mod error;
pub mod host;
pub mod layout;
pub mod math;
pub mod version;

pub use constants::{MAX_CHANNEL, MIN_CLEO_VERSION, SCRIPT_VAR_MAX, SCRIPT_VAR_MIN};
pub use error::SharedError;
pub use host::Host;
pub use layout::{BuildLayout, LayoutTable, PoolLayout, ScreenLayout, TextRingLayout};
pub use math::Vec2;
pub use version::CleoVersion;
