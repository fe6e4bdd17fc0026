//! # Runtime Constants
//!
//! Values fixed by the host engines, not by any particular build.
//!
//! **CRITICAL:** Changing these breaks handle compatibility with scripts
//! that stored handles in global variables.

// =============================================================================
// VERSION GATE
// =============================================================================

/// Oldest CLEO runtime that exposes everything this crate consumes.
pub const MIN_CLEO_VERSION: &str = "1.0.5";

// =============================================================================
// SCRIPT SPACE
// =============================================================================

/// First addressable global variable. Slots 0 and 1 are reserved.
pub const SCRIPT_VAR_MIN: i32 = 2;

/// Last addressable global variable (`0x3FFF`).
pub const SCRIPT_VAR_MAX: i32 = 16383;

/// Size in bytes of one global variable.
pub const SCRIPT_VAR_SIZE: usize = 4;

// =============================================================================
// ENTITY POOLS
// =============================================================================

/// Flag bit marking a pool slot as free.
pub const SLOT_FREE_BIT: u8 = 0x80;

/// Mask of the generation counter inside a flag byte.
pub const GENERATION_MASK: u8 = 0x7F;

/// Shift applied to the slot index inside a handle.
pub const HANDLE_INDEX_SHIFT: u32 = 8;

// =============================================================================
// TEXT DRAWING
// =============================================================================

/// Maximum value of a colour or alpha channel.
pub const MAX_CHANNEL: u8 = 255;
