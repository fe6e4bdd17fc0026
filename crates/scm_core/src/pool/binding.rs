//! # Pool Bindings
//!
//! Resolves where a category's table lives. Done once at startup; the
//! resulting [`PoolBinding`] is immutable for the life of the process.

use scm_shared::{BuildLayout, PoolLayout};

use super::category::EntityCategory;
use crate::error::CoreError;
use crate::memory::RawMemory;

/// Offset of the entity array pointer inside a host pool header.
const HEADER_ENTITIES: usize = 0;
/// Offset of the flag array pointer inside a host pool header.
const HEADER_FLAGS: usize = 4;
/// Offset of the slot count inside a host pool header.
const HEADER_SIZE: usize = 8;

/// Location and shape of one entity table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolBinding {
    /// Address of record 0.
    pub entities_base: usize,
    /// Address of the flag byte of record 0.
    pub flags_base: usize,
    /// Number of slots.
    pub size: u32,
    /// Size of one record in bytes.
    pub entity_size: u32,
}

impl PoolBinding {
    /// Reads the host pool header named by `layout`.
    ///
    /// The layout symbol holds a pointer to a header of the form
    /// `{ entities: u32, flags: u32, size: i32 }`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::SymbolNotFound`] if the host cannot resolve the symbol
    /// - [`CoreError::InvalidPoolHeader`] if the header pointer is null or
    ///   the slot count is negative
    pub fn resolve<M: RawMemory + ?Sized>(
        memory: &M,
        category: EntityCategory,
        layout: &PoolLayout,
    ) -> Result<Self, CoreError> {
        let symbol = memory
            .resolve_symbol(&layout.symbol)
            .ok_or_else(|| CoreError::SymbolNotFound(layout.symbol.clone()))?;
        let header = memory.read_u32(symbol, false) as usize;
        let invalid = || CoreError::InvalidPoolHeader {
            category: category.to_string(),
            header,
        };
        if header == 0 {
            return Err(invalid());
        }

        let size = u32::try_from(memory.read_i32(header + HEADER_SIZE, false)).map_err(|_| invalid())?;
        let binding = Self {
            entities_base: memory.read_u32(header + HEADER_ENTITIES, false) as usize,
            flags_base: memory.read_u32(header + HEADER_FLAGS, false) as usize,
            size,
            entity_size: layout.entity_size,
        };
        tracing::debug!(
            "{} pool bound: entities={:#x} flags={:#x} size={} stride={:#x}",
            category,
            binding.entities_base,
            binding.flags_base,
            binding.size,
            binding.entity_size
        );
        Ok(binding)
    }

    /// Address of slot `index`.
    #[inline]
    #[must_use]
    pub const fn slot_address(&self, index: u32) -> usize {
        self.entities_base + index as usize * self.entity_size as usize
    }

    /// Address of the flag byte of slot `index`.
    #[inline]
    #[must_use]
    pub const fn flag_address(&self, index: u32) -> usize {
        self.flags_base + index as usize
    }

    /// Slot index of `address` if it is the start of a record in this table.
    #[must_use]
    pub fn index_of(&self, address: usize) -> Option<u32> {
        let offset = address.checked_sub(self.entities_base)?;
        let stride = self.entity_size as usize;
        if stride == 0 || offset % stride != 0 {
            return None;
        }
        let index = u32::try_from(offset / stride).ok()?;
        (index < self.size).then_some(index)
    }
}

/// Bindings for every category the build layout describes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolBindings {
    by_category: [Option<PoolBinding>; 3],
}

impl PoolBindings {
    /// Resolves every pool listed in `layout`.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnknownCategory`] for a pool key that is not a known
    /// category, plus anything [`PoolBinding::resolve`] reports.
    pub fn resolve<M: RawMemory + ?Sized>(
        memory: &M,
        layout: &BuildLayout,
    ) -> Result<Self, CoreError> {
        let mut bindings = Self::default();
        for (name, pool) in &layout.pools {
            let category: EntityCategory = name.parse()?;
            bindings.insert(category, PoolBinding::resolve(memory, category, pool)?);
        }
        Ok(bindings)
    }

    /// Sets the binding for `category`.
    pub fn insert(&mut self, category: EntityCategory, binding: PoolBinding) {
        self.by_category[category.index()] = Some(binding);
    }

    /// The binding for `category`.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnknownCategory`] if the layout had no pool for it.
    pub fn get(&self, category: EntityCategory) -> Result<PoolBinding, CoreError> {
        self.by_category[category.index()]
            .ok_or_else(|| CoreError::UnknownCategory(category.to_string()))
    }

    /// Number of bound categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_category.iter().flatten().count()
    }

    /// Whether no category is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::SimulatedMemory;

    const SYMBOL: &str = "CPools::ms_pVehiclePool";

    fn host_with_header(size: i32) -> SimulatedMemory {
        let mem = SimulatedMemory::with_region(0x1000, 0x100);
        mem.define_symbol(SYMBOL, 0x1000);
        mem.write_u32(0x1000, 0x1010, false);
        mem.write_u32(0x1010, 0x4000, false);
        mem.write_u32(0x1014, 0x5000, false);
        mem.write_i32(0x1018, size, false);
        mem
    }

    fn layout() -> PoolLayout {
        PoolLayout {
            symbol: SYMBOL.into(),
            entity_size: 0x20,
        }
    }

    #[test]
    fn test_resolve_reads_header_once() {
        let mem = host_with_header(16);
        let binding = PoolBinding::resolve(&mem, EntityCategory::Vehicle, &layout()).unwrap();
        assert_eq!(
            binding,
            PoolBinding {
                entities_base: 0x4000,
                flags_base: 0x5000,
                size: 16,
                entity_size: 0x20,
            }
        );
    }

    #[test]
    fn test_resolve_missing_symbol() {
        let mem = SimulatedMemory::new();
        assert_eq!(
            PoolBinding::resolve(&mem, EntityCategory::Vehicle, &layout()),
            Err(CoreError::SymbolNotFound(SYMBOL.into()))
        );
    }

    #[test]
    fn test_resolve_rejects_null_header_and_negative_size() {
        let mem = host_with_header(-1);
        assert!(matches!(
            PoolBinding::resolve(&mem, EntityCategory::Vehicle, &layout()),
            Err(CoreError::InvalidPoolHeader { header: 0x1010, .. })
        ));

        mem.write_u32(0x1000, 0, false);
        assert!(matches!(
            PoolBinding::resolve(&mem, EntityCategory::Vehicle, &layout()),
            Err(CoreError::InvalidPoolHeader { header: 0, .. })
        ));
    }

    #[test]
    fn test_index_of_requires_record_boundary() {
        let binding = PoolBinding {
            entities_base: 0x4000,
            flags_base: 0x5000,
            size: 4,
            entity_size: 0x20,
        };
        assert_eq!(binding.index_of(0x4000), Some(0));
        assert_eq!(binding.index_of(0x4060), Some(3));
        assert_eq!(binding.index_of(0x4010), None);
        assert_eq!(binding.index_of(0x4080), None);
        assert_eq!(binding.index_of(0x3FE0), None);
    }

    #[test]
    fn test_bindings_report_missing_category() {
        let mut bindings = PoolBindings::default();
        assert!(bindings.is_empty());
        bindings.insert(
            EntityCategory::Object,
            PoolBinding {
                entities_base: 0,
                flags_base: 0,
                size: 0,
                entity_size: 1,
            },
        );
        assert_eq!(bindings.len(), 1);
        assert!(bindings.get(EntityCategory::Object).is_ok());
        assert_eq!(
            bindings.get(EntityCategory::Vehicle),
            Err(CoreError::UnknownCategory("vehicle".into()))
        );
    }
}
