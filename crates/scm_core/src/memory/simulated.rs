//! # Simulated Memory
//!
//! An in-process stand-in for host memory: a set of zero-initialised byte
//! regions and a symbol table. Used by tests and benchmarks, and by embedders
//! that mirror host state into their own address space.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::RawMemory;
use crate::error::CoreError;

/// One contiguous mapped range.
struct Region {
    base: usize,
    bytes: Box<[u8]>,
}

impl Region {
    /// Byte range inside this region for `[address, address + len)`, if any.
    fn span(&self, address: usize, len: usize) -> Option<std::ops::Range<usize>> {
        let start = address.checked_sub(self.base)?;
        let end = start.checked_add(len)?;
        (end <= self.bytes.len()).then_some(start..end)
    }
}

/// Byte regions plus a symbol table behind a lock.
///
/// Access outside every mapped region behaves like reading unmapped pages
/// of a tolerant host: reads yield zeroes, writes are dropped. Both are
/// logged at `warn` since they almost always indicate a bad address.
///
/// # Example
///
/// ```rust,ignore
/// let mem = SimulatedMemory::with_region(0x1000, 0x400);
/// mem.define_symbol("CTheScripts::ScriptSpace", 0x1000);
/// mem.write_i32(0x1008, 7, false);
/// ```
#[derive(Default)]
pub struct SimulatedMemory {
    /// Mapped regions, sorted by base address.
    regions: RwLock<Vec<Region>>,
    /// Symbol name to absolute address.
    symbols: RwLock<HashMap<String, usize>>,
}

impl SimulatedMemory {
    /// Creates an empty address space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an address space with a single zeroed region.
    #[must_use]
    pub fn with_region(base: usize, len: usize) -> Self {
        let memory = Self::new();
        memory.regions.write().push(Region {
            base,
            bytes: vec![0u8; len].into_boxed_slice(),
        });
        memory
    }

    /// Maps a zeroed region of `len` bytes at `base`.
    ///
    /// # Errors
    ///
    /// [`CoreError::RegionOverlap`] if it intersects an existing region.
    pub fn map(&self, base: usize, len: usize) -> Result<(), CoreError> {
        let mut regions = self.regions.write();
        let end = base.saturating_add(len);
        let overlaps = regions
            .iter()
            .any(|r| base < r.base + r.bytes.len() && r.base < end);
        if overlaps {
            return Err(CoreError::RegionOverlap { base, len });
        }
        let at = regions.partition_point(|r| r.base < base);
        regions.insert(
            at,
            Region {
                base,
                bytes: vec![0u8; len].into_boxed_slice(),
            },
        );
        Ok(())
    }

    /// Binds `name` to `address` for [`RawMemory::resolve_symbol`].
    pub fn define_symbol(&self, name: impl Into<String>, address: usize) {
        self.symbols.write().insert(name.into(), address);
    }

    /// Total mapped bytes.
    #[must_use]
    pub fn mapped_len(&self) -> usize {
        self.regions.read().iter().map(|r| r.bytes.len()).sum()
    }
}

impl RawMemory for SimulatedMemory {
    fn read_bytes(&self, address: usize, buf: &mut [u8]) {
        let regions = self.regions.read();
        let hit = regions
            .iter()
            .find_map(|r| r.span(address, buf.len()).map(|span| &r.bytes[span]));
        if let Some(bytes) = hit {
            buf.copy_from_slice(bytes);
        } else {
            tracing::warn!("unmapped read of {} bytes at {:#x}", buf.len(), address);
            buf.fill(0);
        }
    }

    fn write_bytes(&self, address: usize, bytes: &[u8]) {
        let mut regions = self.regions.write();
        let hit = regions.iter_mut().find_map(|r| {
            let span = r.span(address, bytes.len())?;
            Some(&mut r.bytes[span])
        });
        if let Some(target) = hit {
            target.copy_from_slice(bytes);
        } else {
            tracing::warn!("unmapped write of {} bytes at {:#x}", bytes.len(), address);
        }
    }

    fn resolve_symbol(&self, name: &str) -> Option<usize> {
        self.symbols.read().get(name).copied()
    }
}
