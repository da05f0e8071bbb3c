//! Handler references.
//!
//! A [`Handler`] is a shared callable. Its identity is the allocation it
//! points to: clones are the same handler, while two handlers built from
//! identical closures are distinct. [`Emitter::off`](crate::Emitter::off)
//! relies on this identity to find what to remove.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::HandlerResult;
use crate::event::Event;

type Callback<D> = dyn Fn(&Event<'_, D>) -> HandlerResult + Send + Sync;

/// A registered callback for one event type.
pub struct Handler<D = Value> {
    callback: Arc<Callback<D>>,
}

impl<D> Handler<D> {
    /// Wrap a fallible callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Event<'_, D>) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(f),
        }
    }

    /// Wrap a callback that cannot fail.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Event<'_, D>) + Send + Sync + 'static,
    {
        Self::new(move |event| {
            f(event);
            Ok(())
        })
    }

    /// Invoke the callback with an event.
    pub fn call(&self, event: &Event<'_, D>) -> HandlerResult {
        (self.callback)(event)
    }

    /// Whether both references point at the same callback.
    pub fn ptr_eq(&self, other: &Handler<D>) -> bool {
        // Compare data pointers only; vtable addresses are not stable.
        std::ptr::addr_eq(Arc::as_ptr(&self.callback), Arc::as_ptr(&other.callback))
    }
}

impl<D> Clone for Handler<D> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<D> PartialEq for Handler<D> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<D> Eq for Handler<D> {}

impl<D> fmt::Debug for Handler<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}
