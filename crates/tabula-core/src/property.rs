//! Reactive properties with change detection.
//!
//! A [`Property`] wraps a value and reports whether a write actually changed
//! it. The owner pairs it with a [`Signal`](crate::Signal) and emits only when
//! `set()` returns `true`.
//!
//! ```
//! use tabula_core::{Property, Signal};
//!
//! struct Sidebar {
//!     collapsed: Property<bool>,
//!     collapsed_changed: Signal<bool>,
//! }
//!
//! impl Sidebar {
//!     fn set_collapsed(&self, collapsed: bool) {
//!         if self.collapsed.set(collapsed) {
//!             self.collapsed_changed.emit(collapsed);
//!         }
//!     }
//! }
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A shared value whose writes report whether anything changed.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrite without comparing. Used for restored state.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value` and return `true`, unless it equals the current value.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Like [`set`](Self::set), but hands back the previous value.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        (*current != value).then(|| std::mem::replace(&mut *current, value))
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}
