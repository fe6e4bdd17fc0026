//! # Handles
//!
//! Handles are plain 32-bit values so scripts can keep them in global
//! variables between frames.

use std::fmt;

use scm_shared::constants::{GENERATION_MASK, HANDLE_INDEX_SHIFT, SLOT_FREE_BIT};

/// Opaque reference to one generation of one pool slot.
///
/// The value is split into two parts:
/// - Upper 24 bits: slot index
/// - Lower 8 bits: the slot's flag byte when the handle was taken
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Handle(u32);

impl Handle {
    /// The handle scripts use for "no entity" (`-1`).
    pub const NULL: Self = Self(u32::MAX);

    /// Creates a handle from a slot index and flag byte.
    ///
    /// # Arguments
    ///
    /// * `index` - Slot index (0 to 2^24-1)
    /// * `flags` - Flag byte of the slot (free bit + generation)
    #[inline]
    #[must_use]
    pub const fn new(index: u32, flags: u8) -> Self {
        Self((index << HANDLE_INDEX_SHIFT) | flags as u32)
    }

    /// Wraps a raw handle value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    #[inline]
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Reinterprets a script global value as a handle.
    #[inline]
    #[must_use]
    pub const fn from_script_value(value: i32) -> Self {
        Self(u32::from_ne_bytes(value.to_ne_bytes()))
    }

    /// The handle as scripts store it in a global variable.
    #[inline]
    #[must_use]
    pub const fn to_script_value(self) -> i32 {
        i32::from_ne_bytes(self.0.to_ne_bytes())
    }

    /// Slot index portion.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 >> HANDLE_INDEX_SHIFT
    }

    /// Flag byte portion, compared verbatim against the slot's flag byte.
    #[inline]
    #[must_use]
    pub const fn flags(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Generation counter portion of the flag byte.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u8 {
        self.flags() & GENERATION_MASK
    }

    /// Whether the handle was taken from a free slot.
    #[inline]
    #[must_use]
    pub const fn was_free(self) -> bool {
        self.flags() & SLOT_FREE_BIT != 0
    }

    /// Checks if this is the null handle.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle(slot={}, gen={})", self.index(), self.generation())
    }
}
