//! # Script Global Store
//!
//! The host's script space is a flat array of 32-bit signed globals. Ids
//! 0 and 1 are reserved by the host, so the addressable range is
//! `[SCRIPT_VAR_MIN, SCRIPT_VAR_MAX]`. An id outside it is a bug in the
//! calling script and is rejected, never clamped.

use scm_shared::constants::{SCRIPT_VAR_MAX, SCRIPT_VAR_MIN, SCRIPT_VAR_SIZE};

use crate::error::CoreError;
use crate::memory::RawMemory;

/// Offset of the jump operand that skips the global variable area.
const GLOBALS_END_OPERAND: usize = 3;
/// Bytes between that operand's target and the HUD counter area.
const COUNTER_AREA_BIAS: i32 = 12;

/// Validated read/write access to script globals. Nothing is cached.
pub struct ValueStore<'m, M: RawMemory + ?Sized> {
    memory: &'m M,
    base: usize,
}

impl<'m, M: RawMemory + ?Sized> ValueStore<'m, M> {
    /// Creates a store over the script space at `base`.
    #[must_use]
    pub fn new(memory: &'m M, base: usize) -> Self {
        Self { memory, base }
    }

    /// Base address of the script space.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Address of global `id`.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfRangeIndex`] if `id` is not in `[2, 16383]`.
    pub fn address_of(&self, id: i32) -> Result<usize, CoreError> {
        if !(SCRIPT_VAR_MIN..=SCRIPT_VAR_MAX).contains(&id) {
            return Err(CoreError::OutOfRangeIndex { id });
        }
        // range check above makes the cast lossless
        Ok(self.base + id.unsigned_abs() as usize * SCRIPT_VAR_SIZE)
    }

    /// Reads global `id`.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfRangeIndex`] if `id` is not in `[2, 16383]`.
    pub fn read(&self, id: i32) -> Result<i32, CoreError> {
        Ok(self.memory.read_i32(self.address_of(id)?, false))
    }

    /// Writes global `id`.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfRangeIndex`] if `id` is not in `[2, 16383]`.
    pub fn write(&self, id: i32, value: i32) -> Result<(), CoreError> {
        self.memory.write_i32(self.address_of(id)?, value, false);
        Ok(())
    }

    /// First global of the HUD counter area.
    ///
    /// The script space opens with a jump over the globals; its operand is
    /// the byte offset where globals end, and the counter area starts
    /// twelve bytes past it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn counter_base(&self) -> i32 {
        let globals_end = self.memory.read_i32(self.base + GLOBALS_END_OPERAND, false);
        // (i32 + 12) / 4 always fits back into an i32
        ((i64::from(globals_end) + i64::from(COUNTER_AREA_BIAS)) / 4) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::SimulatedMemory;

    const BASE: usize = 0x8000;

    fn script_space() -> SimulatedMemory {
        SimulatedMemory::with_region(BASE, (SCRIPT_VAR_MAX as usize + 1) * SCRIPT_VAR_SIZE)
    }

    #[test]
    fn test_boundaries() {
        let mem = script_space();
        let store = ValueStore::new(&mem, BASE);

        for id in [1, 16384, 0, -1, i32::MIN, i32::MAX] {
            assert_eq!(store.read(id), Err(CoreError::OutOfRangeIndex { id }));
            assert_eq!(store.write(id, 7), Err(CoreError::OutOfRangeIndex { id }));
        }
        for id in [2, 16383] {
            assert!(store.write(id, id * 10).is_ok());
            assert_eq!(store.read(id), Ok(id * 10));
        }
    }

    #[test]
    fn test_reads_through_to_memory() {
        let mem = script_space();
        let store = ValueStore::new(&mem, BASE);

        mem.write_i32(BASE + 100 * 4, -5, false);
        assert_eq!(store.read(100), Ok(-5));

        store.write(101, 0x1234).unwrap();
        assert_eq!(mem.read_i32(BASE + 101 * 4, false), 0x1234);
    }

    #[test]
    fn test_rejected_write_leaves_memory_untouched() {
        let mem = script_space();
        let store = ValueStore::new(&mem, BASE);

        assert!(store.write(1, 99).is_err());
        assert_eq!(mem.read_i32(BASE + 4, false), 0);
    }

    #[test]
    fn test_counter_base() {
        let mem = script_space();
        // GOTO opcode, then the i32 operand holding the end of globals
        mem.write_u16(BASE, 0x0002, false);
        mem.write_u8(BASE + 2, 0x01);
        mem.write_i32(BASE + 3, 0x4000, false);
        let store = ValueStore::new(&mem, BASE);
        assert_eq!(store.counter_base(), (0x4000 + 12) / 4);
    }

    #[test]
    fn test_counter_base_survives_extreme_operands() {
        let mem = script_space();
        let store = ValueStore::new(&mem, BASE);

        mem.write_i32(BASE + 3, i32::MAX, false);
        assert_eq!(store.counter_base(), 536_870_914);

        mem.write_i32(BASE + 3, i32::MIN, false);
        assert_eq!(store.counter_base(), -536_870_909);
    }
}
