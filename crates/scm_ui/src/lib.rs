//! # SCM UI
//!
//! Scripted on-screen text whose attributes are recomputed every frame:
//! - Constant values, named colours, hex strings, percentages of the screen
//! - Recurrences: the next value as a function of the previous one
//! - Written straight into the host's drawable slot ring
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         DRAW PIPELINE                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  TextDraw (producers) ──draw()──► TextFrame ──► DrawRing slot │
//! │        ↓                              ↓              ↓        │
//! │  advance() once each          sampled values    host renders  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sampling order
//!
//! Background, foreground colour (+ opacity), font / alignment / wrap,
//! scale, text case, position. Each producer advances once per `draw`;
//! drawing twice in a frame advances recurrences twice.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod layout;
pub mod producer;
pub mod render;
pub mod style;

pub use error::UiError;
pub use layout::{Align, Dimension, TextCase};
pub use producer::{AxisProducer, ColorProducer, OpacityProducer, Producer, VecProducer};
pub use render::{DrawRing, DrawSlot, TextDraw, TextFrame};
pub use style::{ColorSpec, Palette, Rgba};
