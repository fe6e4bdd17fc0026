//! # Handle Pool
//!
//! Bidirectional mapping between slot addresses and handles for one
//! category. Holds the immutable binding and a borrow of host memory;
//! every query re-reads the flag bytes.

use scm_shared::constants::SLOT_FREE_BIT;

use super::binding::{PoolBinding, PoolBindings};
use super::category::EntityCategory;
use super::handle::Handle;
use crate::error::CoreError;
use crate::memory::RawMemory;

/// Handle translation for one host entity table.
///
/// # Thread Safety
///
/// Reads race with the simulation by design: the host is the only writer
/// and runs on the same thread as the scripts calling into this pool.
pub struct HandlePool<'m, M: RawMemory + ?Sized> {
    /// Host memory.
    memory: &'m M,
    /// Which table this is.
    category: EntityCategory,
    /// Where the table lives.
    binding: PoolBinding,
}

impl<'m, M: RawMemory + ?Sized> HandlePool<'m, M> {
    /// Creates the pool for `category`.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnknownCategory`] if `bindings` has no table for it.
    /// Nothing after construction can fail.
    pub fn new(
        memory: &'m M,
        category: EntityCategory,
        bindings: &PoolBindings,
    ) -> Result<Self, CoreError> {
        Ok(Self::from_binding(memory, category, bindings.get(category)?))
    }

    /// Creates a pool over an already resolved binding.
    #[must_use]
    pub fn from_binding(memory: &'m M, category: EntityCategory, binding: PoolBinding) -> Self {
        Self {
            memory,
            category,
            binding,
        }
    }

    /// The category this pool serves.
    #[inline]
    #[must_use]
    pub const fn category(&self) -> EntityCategory {
        self.category
    }

    /// The binding snapshot taken at construction.
    #[inline]
    #[must_use]
    pub const fn binding(&self) -> PoolBinding {
        self.binding
    }

    /// Number of slots in the table.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.binding.size
    }

    /// Current flag byte of slot `index`.
    #[inline]
    #[must_use]
    pub fn flags_at(&self, index: u32) -> u8 {
        self.memory.read_u8(self.binding.flag_address(index))
    }

    /// Address of slot `index`. Pure arithmetic; `index` must be in range.
    #[inline]
    #[must_use]
    pub const fn slot_at(&self, index: u32) -> usize {
        self.binding.slot_address(index)
    }

    /// Handle for the entity at `address`.
    ///
    /// Unchecked: `address` must point at a record of this table, otherwise
    /// the result is meaningless. Use [`Self::try_slot_to_handle`] for
    /// addresses of unknown origin.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn slot_to_handle(&self, address: usize) -> Handle {
        let offset = address.wrapping_sub(self.binding.entities_base);
        let index = (offset / self.binding.entity_size as usize) as u32;
        Handle::new(index, self.flags_at(index))
    }

    /// Handle for the entity at `address`, or `None` if the address is not
    /// the start of a record inside the table.
    #[must_use]
    pub fn try_slot_to_handle(&self, address: usize) -> Option<Handle> {
        let index = self.binding.index_of(address)?;
        Some(Handle::new(index, self.flags_at(index)))
    }

    /// Address of the entity `handle` refers to.
    ///
    /// Returns `None` when the handle is stale (the slot's flag byte changed
    /// since the handle was taken) or its index is outside the table. Both
    /// are expected outcomes of entity lifecycle, not errors.
    #[must_use]
    pub fn handle_to_slot(&self, handle: Handle) -> Option<usize> {
        let index = handle.index();
        if index >= self.binding.size {
            return None;
        }
        (self.flags_at(index) == handle.flags()).then(|| self.slot_at(index))
    }

    /// Whether `handle` currently resolves.
    #[inline]
    #[must_use]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.handle_to_slot(handle).is_some()
    }

    /// Addresses of every occupied slot, in index order.
    ///
    /// Each call starts a fresh scan of the flag array, so the sequence
    /// reflects the table as it is while being iterated.
    #[must_use]
    pub fn live_slots(&self) -> LiveSlots<'_, 'm, M> {
        LiveSlots {
            pool: self,
            next: 0,
        }
    }

    /// Handles of every occupied slot, in index order.
    pub fn live_handles(&self) -> impl Iterator<Item = Handle> + '_ {
        (0..self.binding.size).filter_map(move |index| {
            let flags = self.flags_at(index);
            (flags & SLOT_FREE_BIT == 0).then_some(Handle::new(index, flags))
        })
    }
}

/// Iterator over occupied slot addresses. See [`HandlePool::live_slots`].
pub struct LiveSlots<'p, 'm, M: RawMemory + ?Sized> {
    pool: &'p HandlePool<'m, M>,
    next: u32,
}

impl<M: RawMemory + ?Sized> Iterator for LiveSlots<'_, '_, M> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next < self.pool.binding.size {
            let index = self.next;
            self.next += 1;
            if self.pool.flags_at(index) & SLOT_FREE_BIT == 0 {
                return Some(self.pool.slot_at(index));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some((self.pool.binding.size - self.next) as usize))
    }
}
