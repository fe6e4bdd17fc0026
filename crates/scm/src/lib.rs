//! # SCM
//!
//! Script runtime over a host game build's memory.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            RUNTIME                               │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  scm_shared        scm_core                 scm_ui               │
//! │  ┌──────────┐      ┌───────────────────┐    ┌─────────────────┐  │
//! │  │ Host     │─────>│ HandlePool x3     │    │ DrawRing        │  │
//! │  │ Version  │      │ ValueStore        │    │ TextDraw        │  │
//! │  │ Layouts  │─────>│ RawMemory         │<───│ producers       │  │
//! │  └──────────┘      └───────────────────┘    └─────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Runtime::start`] does every fallible step once. After that, stale
//! handles come back as `None` and nothing else can fail except colour
//! resolution on a text element's first draw.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod runtime;

pub use scm_core as core;
pub use scm_shared as shared;
pub use scm_ui as ui;

pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use runtime::Runtime;

pub use scm_core::{EntityCategory, Handle, HandlePool, RawMemory, SimulatedMemory, ValueStore};
pub use scm_shared::{CleoVersion, Host};
pub use scm_ui::{Align, Dimension, DrawRing, TextCase, TextDraw};
