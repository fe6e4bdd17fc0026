//! # Handle Pools
//!
//! The host keeps vehicles, characters and objects in fixed-capacity tables
//! with a parallel array of flag bytes. A flag byte carries a "free" bit and
//! a 7-bit generation the host bumps whenever it reuses the slot.
//!
//! ```text
//! entities_base ─► [ record 0 ][ record 1 ][ record 2 ] ...   entity_size each
//! flags_base    ─► [  0x03    ][  0x81    ][  0x12    ] ...   one byte each
//!                     live        free        live
//!
//! Handle = (slot_index << 8) | flag_byte
//! ```
//!
//! A handle resolves only while the slot's flag byte is unchanged, so a
//! handle to an entity that died and whose slot was reused simply stops
//! resolving. Nothing is ever scanned to find that out.

mod binding;
mod category;
mod handle;
mod table;

pub use binding::{PoolBinding, PoolBindings};
pub use category::EntityCategory;
pub use handle::Handle;
pub use table::{HandlePool, LiveSlots};
