//! Live numeric-result subscriptions, one per expression
//!
//! Whenever an expression's text changes, its subscription to the graphing engine must be torn
//! down before a new one takes its place. [`HelperRegistry`] holds these handles by expression id
//! and disposes them explicitly: on replacement, on removal, on [`clear`](HelperRegistry::clear)
//! and when the registry itself is dropped.

use std::collections::HashMap;


/// A handle on something that must be released exactly once.
pub trait Subscription {
    /// Releases the subscription. Called once, right before the handle is dropped.
    fn dispose(&mut self);
}

/// Subscription handles keyed by expression id
#[derive(Debug)]
pub struct HelperRegistry<H : Subscription> {
    handles : HashMap<String, H>,
}

impl<H : Subscription> Default for HelperRegistry<H> {
    fn default() -> Self {
        Self { handles: HashMap::new() }
    }
}

impl<H : Subscription> HelperRegistry<H> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `handle` for expression `id`, disposing the handle it replaces first.
    pub fn replace(&mut self, id : &str, handle : H) {
        if let Some(mut previous) = self.handles.remove(id) {
            warn!("disposing the helper of expression {:?} before replacing it", id);
            previous.dispose();
        }
        self.handles.insert(id.to_string(), handle);
    }

    /// Disposes and forgets the handle of expression `id`. Returns whether there was one.
    pub fn remove(&mut self, id : &str) -> bool {
        match self.handles.remove(id) {
            Some(mut handle) => {
                handle.dispose();
                true
            },
            None => false,
        }
    }

    /// The handle of expression `id`, if any
    pub fn get(&self, id : &str) -> Option<&H> {
        self.handles.get(id)
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Checks if no handle is live.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Disposes every handle.
    pub fn clear(&mut self) {
        for (_, mut handle) in self.handles.drain() {
            handle.dispose();
        }
    }
}

impl<H : Subscription> Drop for HelperRegistry<H> {
    fn drop(&mut self) {
        self.clear();
    }
}
