//! # SCM Core
//!
//! Safe access to host-owned game state for script logic:
//! - Stable 32-bit handles into fixed-capacity entity tables
//! - O(1) stale-handle detection through per-slot generation bytes
//! - Validated access to script global variables
//!
//! ## Architecture Rules
//!
//! 1. **The host owns the tables** - we never allocate or free a slot
//! 2. **Read-through** - every call re-reads flags, only the binding is cached
//! 3. **Fail fast at construction** - lookups afterwards never error
//!
//! ## Example
//!
//! ```rust,ignore
//! use scm_core::{EntityCategory, HandlePool, PoolBindings};
//!
//! let bindings = PoolBindings::resolve(&memory, layout)?;
//! let vehicles = HandlePool::new(&memory, EntityCategory::Vehicle, &bindings)?;
//! for slot in vehicles.live_slots() {
//!     let handle = vehicles.slot_to_handle(slot);
//!     // store handle in a script global, resolve it next frame
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod memory;
pub mod pool;
pub mod store;

pub use error::CoreError;
pub use memory::{RawMemory, SimulatedMemory};
pub use pool::{EntityCategory, Handle, HandlePool, PoolBinding, PoolBindings};
pub use store::ValueStore;
