//! Value storage for named variables
//!
//! A [`Slot`] either owns its value or aliases a `Cell` owned by firmware.
//! The mode is fixed at construction; every accessor dereferences through
//! whichever representation is active, so callers never need to know which
//! one it is.
//!
//! Aliasing is live: a write through the slot is visible to the firmware's
//! cell, and a firmware write is visible to the next read through the slot.
//!
//! Storage is a plain `Cell`, so a slot is never larger than the bigger of
//! its value and a reference, plus the enum tag. No borrow is held across
//! calls, which keeps every accessor panic-free.

use core::cell::Cell;
use core::fmt;

/// Which representation a [`Slot`] uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageMode {
    /// Value stored inside the slot
    Owned,
    /// Value stored in firmware-owned memory
    Aliased,
}

/// Owned or aliased value cell
pub enum Slot<'a, T> {
    /// Value owned by the slot
    Owned(Cell<T>),
    /// Value owned by firmware; must outlive the slot
    Aliased(&'a Cell<T>),
}

impl<'a, T> Slot<'a, T> {
    /// Create an owning slot
    pub const fn owned(value: T) -> Self {
        Slot::Owned(Cell::new(value))
    }

    /// Create a slot that reads and writes through `target`
    pub const fn aliased(target: &'a Cell<T>) -> Self {
        Slot::Aliased(target)
    }

    /// Active storage mode
    pub fn mode(&self) -> StorageMode {
        match self {
            Slot::Owned(_) => StorageMode::Owned,
            Slot::Aliased(_) => StorageMode::Aliased,
        }
    }

    /// True when the slot aliases external storage
    pub fn is_aliased(&self) -> bool {
        self.mode() == StorageMode::Aliased
    }

    fn cell(&self) -> &Cell<T> {
        match self {
            Slot::Owned(cell) => cell,
            Slot::Aliased(target) => target,
        }
    }

    /// Replace the current value
    pub fn set(&self, value: T) {
        self.cell().set(value);
    }

    /// Replace the current value, returning the previous one
    pub fn replace(&self, value: T) -> T {
        self.cell().replace(value)
    }
}

impl<T: Default> Slot<'_, T> {
    // The value is moved out for the duration of `f` and put back afterwards.
    // `f` must not touch this slot.
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.cell().take();
        let result = f(&value);
        self.cell().set(value);
        result
    }
}

impl<T: Clone + Default> Slot<'_, T> {
    /// Copy of the current value
    pub fn get(&self) -> T {
        self.with(T::clone)
    }
}

impl<T: PartialEq + Default> Slot<'_, T> {
    /// `current == value`
    pub fn equals(&self, value: &T) -> bool {
        self.with(|current| current == value)
    }
}

impl<T: PartialOrd + Default> Slot<'_, T> {
    /// `current < value`
    pub fn less_than(&self, value: &T) -> bool {
        self.with(|current| current < value)
    }

    /// `current > value`
    pub fn greater_than(&self, value: &T) -> bool {
        self.with(|current| current > value)
    }
}

// `Cell<T>` is only `Debug` for `Copy` values, so report the mode alone
impl<T> fmt::Debug for Slot<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}

impl<T: Default> Default for Slot<'_, T> {
    fn default() -> Self {
        Slot::owned(T::default())
    }
}
