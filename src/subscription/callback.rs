// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback handles and the per-attribute callback registry.
//!
//! - [`Callback`] - A cloneable handle with identity semantics
//! - [`CallbackRegistry`] - Internal registry storing and dispatching handles

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::Attribute;

/// A change notification callback.
///
/// Callbacks receive no arguments: a listener re-reads whatever state it
/// needs through the channel's accessors. Two handles are equal when they
/// are clones of the same [`Callback::new`] call, so registering a clone of
/// an already registered handle has no effect.
///
/// # Examples
///
/// ```
/// use freeathome_lib::subscription::Callback;
///
/// let callback = Callback::new(|| println!("changed"));
/// let same = callback.clone();
/// let other = Callback::new(|| println!("changed"));
///
/// assert_eq!(callback, same);
/// assert_ne!(callback, other);
/// ```
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn() + Send + Sync>);

impl Callback {
    /// Wraps a closure into a new callback handle.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Invokes the callback.
    pub fn call(&self) {
        (self.0)();
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.address(), other.address())
    }
}

impl Eq for Callback {}

impl Hash for Callback {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Callback({:p})", self.address())
    }
}

/// Registry of callbacks keyed by attribute.
///
/// This is an internal type used by channels to store and dispatch callbacks.
/// It uses interior mutability via `parking_lot::RwLock`; the lock is never
/// held while a callback runs, so callbacks may register or remove handles.
pub struct CallbackRegistry {
    callbacks: RwLock<HashMap<Attribute, HashSet<Callback>>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a callback for an attribute.
    ///
    /// Returns `false` if the handle was already registered for it.
    pub fn register(&self, attribute: Attribute, callback: &Callback) -> bool {
        self.callbacks
            .write()
            .entry(attribute)
            .or_default()
            .insert(callback.clone())
    }

    /// Removes a callback from an attribute.
    ///
    /// Returns `true` if the handle was registered.
    pub fn remove(&self, attribute: Attribute, callback: &Callback) -> bool {
        let mut callbacks = self.callbacks.write();
        let Some(handles) = callbacks.get_mut(&attribute) else {
            return false;
        };
        let removed = handles.remove(callback);
        if handles.is_empty() {
            callbacks.remove(&attribute);
        }
        removed
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Invokes every callback registered for an attribute.
    ///
    /// Callbacks are called synchronously in an arbitrary order. Returns the
    /// number of callbacks invoked.
    pub fn dispatch(&self, attribute: Attribute) -> usize {
        let handles: Vec<Callback> = match self.callbacks.read().get(&attribute) {
            Some(handles) => handles.iter().cloned().collect(),
            None => return 0,
        };
        for handle in &handles {
            handle.call();
        }
        handles.len()
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().values().map(HashSet::len).sum()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting() -> (Callback, Arc<AtomicU32>) {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();
        let callback = Callback::new(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        (callback, counter)
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn dispatch_only_reaches_matching_attribute() {
        let registry = CallbackRegistry::new();
        let (state_cb, state_count) = counting();
        let (position_cb, position_count) = counting();

        registry.register(Attribute::State, &state_cb);
        registry.register(Attribute::Position, &position_cb);

        assert_eq!(registry.dispatch(Attribute::State), 1);
        assert_eq!(state_count.load(Ordering::SeqCst), 1);
        assert_eq!(position_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn same_handle_registered_twice_fires_once() {
        let registry = CallbackRegistry::new();
        let (callback, counter) = counting();

        assert!(registry.register(Attribute::State, &callback));
        assert!(!registry.register(Attribute::State, &callback.clone()));
        assert_eq!(registry.callback_count(), 1);

        registry.dispatch(Attribute::State);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn removed_handle_is_never_invoked_again() {
        let registry = CallbackRegistry::new();
        let (callback, counter) = counting();

        registry.register(Attribute::Brightness, &callback);
        registry.dispatch(Attribute::Brightness);
        assert!(registry.remove(Attribute::Brightness, &callback));
        registry.dispatch(Attribute::Brightness);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_unregistered_handle() {
        let registry = CallbackRegistry::new();
        let (callback, _) = counting();
        assert!(!registry.remove(Attribute::State, &callback));
    }

    #[test]
    fn callback_may_remove_itself_during_dispatch() {
        let registry = Arc::new(CallbackRegistry::new());
        let slot: Arc<RwLock<Option<Callback>>> = Arc::new(RwLock::new(None));

        let registry_clone = registry.clone();
        let slot_clone = slot.clone();
        let callback = Callback::new(move || {
            if let Some(me) = slot_clone.read().as_ref() {
                registry_clone.remove(Attribute::State, me);
            }
        });
        *slot.write() = Some(callback.clone());

        registry.register(Attribute::State, &callback);
        registry.dispatch(Attribute::State);
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_clear() {
        let registry = CallbackRegistry::new();
        registry.register(Attribute::State, &Callback::new(|| {}));
        registry.register(Attribute::Forced, &Callback::new(|| {}));
        assert_eq!(registry.callback_count(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_debug() {
        let registry = CallbackRegistry::new();
        registry.register(Attribute::State, &Callback::new(|| {}));

        let debug = format!("{registry:?}");
        assert!(debug.contains("CallbackRegistry"));
        assert!(debug.contains("callback_count"));
    }
}
