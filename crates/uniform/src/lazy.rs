//! Double-checked lazy materialization of request sub-objects.
//!
//! A [`LazySlot`] starts empty. The first reader that finds it empty takes
//! the owner's lock, checks again and publishes a default instance; every
//! other reader, before or after, observes that same instance. Once the slot
//! is filled, reads are a plain atomic load.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;

pub struct LazySlot<T> {
    slot: ArcSwapOption<T>,
}

impl<T> LazySlot<T> {
    pub fn empty() -> Self {
        Self { slot: ArcSwapOption::empty() }
    }

    /// Returns the current value without materializing it.
    #[inline]
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    #[cfg(test)]
    fn is_set(&self) -> bool {
        self.slot.load().is_some()
    }

    /// Replaces the value, bypassing the materialization path. `None` empties the slot.
    pub fn set(&self, value: Option<Arc<T>>) {
        self.slot.store(value);
    }

    /// Returns the current value, creating it with `init` if the slot is empty.
    ///
    /// `lock` is only taken when the slot is found empty. `init` runs at most
    /// once per empty-to-filled transition, even under contention.
    pub fn get_or_init<F>(&self, lock: &Mutex<()>, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.slot.load_full() {
            return value;
        }

        let _guard = lock.lock();
        if let Some(value) = self.slot.load_full() {
            return value;
        }

        let value = Arc::new(init());
        self.slot.store(Some(Arc::clone(&value)));
        value
    }
}

impl<T> Default for LazySlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for LazySlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.load().as_deref() {
            Some(value) => f.debug_tuple("LazySlot").field(value).finish(),
            None => f.write_str("LazySlot(<empty>)"),
        }
    }
}
