//! Binding table: event type to ordered handler sequence.
//!
//! A type present in the table always has at least one handler. Removing the
//! last handler removes the key, so "is the key present" doubles as the
//! has-listeners check.

use std::collections::HashMap;

use crate::handler::Handler;

/// Handlers indexed by event type, in registration order.
#[derive(Debug)]
pub(crate) struct Bindings<D> {
    handlers: HashMap<String, Vec<Handler<D>>>,
}

impl<D> Default for Bindings<D> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<D> Bindings<D> {
    /// Append a handler. Returns the new number of handlers for the type and
    /// whether this registration is the first to exceed `max_listeners`
    /// (`0` = unlimited).
    pub(crate) fn add(
        &mut self,
        event_type: String,
        handler: Handler<D>,
        max_listeners: usize,
    ) -> (usize, bool) {
        let handlers = self.handlers.entry(event_type).or_default();
        handlers.push(handler);

        let count = handlers.len();
        let should_warn = max_listeners > 0 && count == max_listeners + 1;
        (count, should_warn)
    }

    /// Remove the first handler with the same identity. Returns true if one was
    /// found.
    pub(crate) fn remove(&mut self, event_type: &str, handler: &Handler<D>) -> bool {
        let Some(handlers) = self.handlers.get_mut(event_type) else {
            return false;
        };
        let Some(pos) = handlers.iter().position(|h| h.ptr_eq(handler)) else {
            return false;
        };

        handlers.remove(pos);
        if handlers.is_empty() {
            self.handlers.remove(event_type);
        }
        true
    }

    /// Remove every handler for a type, or for all types when `event_type` is
    /// `None`. Returns how many handlers were dropped.
    pub(crate) fn remove_all(&mut self, event_type: Option<&str>) -> usize {
        match event_type {
            Some(event_type) => self
                .handlers
                .remove(event_type)
                .map(|handlers| handlers.len())
                .unwrap_or(0),
            None => self.handlers.drain().map(|(_, handlers)| handlers.len()).sum(),
        }
    }

    /// Handler at `index` in the current sequence for a type.
    pub(crate) fn get(&self, event_type: &str, index: usize) -> Option<Handler<D>> {
        self.handlers.get(event_type)?.get(index).cloned()
    }

    /// Copy of the current sequence for a type.
    pub(crate) fn snapshot(&self, event_type: &str) -> Option<Vec<Handler<D>>> {
        self.handlers.get(event_type).cloned()
    }

    /// Number of handlers for a type.
    pub(crate) fn count(&self, event_type: &str) -> usize {
        self.handlers.get(event_type).map(Vec::len).unwrap_or(0)
    }

    pub(crate) fn contains(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// All types with at least one handler, sorted.
    pub(crate) fn event_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.handlers.keys().cloned().collect();
        types.sort();
        types
    }
}
