//! The event emitter.
//!
//! # Example
//!
//! ```
//! use ripple::{Emitter, Event, Handler};
//! use serde_json::json;
//!
//! let emitter: Emitter = Emitter::new();
//! let handler: Handler = Handler::from_fn(|event: &Event<'_>| {
//!     println!("{}", event.data().unwrap()["message"]);
//! });
//!
//! emitter.on("error", handler.clone());
//! emitter.emit("error", Some(json!({ "message": "Refrigerator unable to connect" })))?;
//! emitter.off("error", &handler);
//! # Ok::<(), ripple::HandlerError>(())
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::bindings::Bindings;
use crate::config::{DispatchPolicy, EmitterConfig};
use crate::error::{EmitterError, EmitterResult, HandlerResult};
use crate::event::Event;
use crate::handler::Handler;

/// Shared state behind an emitter handle.
struct Inner<D> {
    config: EmitterConfig,
    bindings: Mutex<Bindings<D>>,
}

/// Synchronous publish/subscribe hub keyed by event type.
///
/// Cloning an `Emitter` gives another handle to the same bindings. The lock
/// guarding the bindings is never held while a handler runs, so handlers may
/// call back into the emitter.
pub struct Emitter<D = Value> {
    inner: Arc<Inner<D>>,
}

impl<D> Emitter<D> {
    /// Create an emitter with default configuration.
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Create an emitter with the given configuration.
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                bindings: Mutex::new(Bindings::default()),
            }),
        }
    }

    /// The configuration this emitter was built with.
    pub fn config(&self) -> &EmitterConfig {
        &self.inner.config
    }

    /// Bind a handler to an event type.
    ///
    /// Registering the same handler twice makes it run twice per emit.
    pub fn on(&self, event_type: impl Into<String>, handler: Handler<D>) {
        self.bind(event_type.into(), handler);
    }

    /// Register a handler. Returns true if this registration crossed the
    /// listener limit.
    fn bind(&self, event_type: String, handler: Handler<D>) -> bool {
        let max = self.inner.config.max_listeners;
        let (count, should_warn) = self
            .inner
            .bindings
            .lock()
            .add(event_type.clone(), handler, max);

        if should_warn {
            tracing::warn!(
                event_type = %event_type,
                count,
                max,
                "Possible emitter leak detected: listener limit exceeded"
            );
        }
        tracing::trace!(event_type = %event_type, count, "Handler bound");
        should_warn
    }

    /// Bind a value that is expected to be a [`Handler`].
    ///
    /// Fails without registering anything if `callback` is any other type.
    pub fn try_on<C>(&self, event_type: impl Into<String>, callback: C) -> EmitterResult<()>
    where
        C: Any,
        D: 'static,
    {
        let boxed: Box<dyn Any> = Box::new(callback);
        match boxed.downcast::<Handler<D>>() {
            Ok(handler) => {
                self.on(event_type, *handler);
                Ok(())
            }
            Err(_) => Err(EmitterError::InvalidHandlerType {
                received: type_name::<C>(),
            }),
        }
    }

    /// Wrap `f` in a new handler, bind it, and return the handler for a later
    /// [`off`](Self::off).
    pub fn listen<F>(&self, event_type: impl Into<String>, f: F) -> Handler<D>
    where
        F: Fn(&Event<'_, D>) -> HandlerResult + Send + Sync + 'static,
    {
        let handler = Handler::new(f);
        self.on(event_type, handler.clone());
        handler
    }

    /// Unbind the first registration of `handler` for an event type.
    ///
    /// Unknown types and handlers are ignored. Returns whether anything was
    /// removed.
    pub fn off(&self, event_type: &str, handler: &Handler<D>) -> bool {
        let removed = self.inner.bindings.lock().remove(event_type, handler);
        if removed {
            tracing::trace!(event_type, "Handler unbound");
        }
        removed
    }

    /// Invoke every handler bound to `event_type` with one shared [`Event`].
    ///
    /// Returns immediately when nothing is bound. The first handler error
    /// stops dispatch and is returned as is.
    pub fn emit(&self, event_type: &str, data: Option<D>) -> HandlerResult {
        match self.inner.config.dispatch {
            DispatchPolicy::LiveIndex => self.emit_live(event_type, data.as_ref()),
            DispatchPolicy::Snapshot => self.emit_snapshot(event_type, data.as_ref()),
        }
    }

    fn emit_live(&self, event_type: &str, data: Option<&D>) -> HandlerResult {
        let len = self.inner.bindings.lock().count(event_type);
        if len == 0 {
            return Ok(());
        }

        tracing::trace!(event_type, handlers = len, "Emitting event");
        let event = Event::new(event_type, self, data);
        for index in 0..len {
            let Some(handler) = self.inner.bindings.lock().get(event_type, index) else {
                tracing::debug!(event_type, index, "Handler sequence shrank during dispatch");
                break;
            };
            self.invoke(&handler, &event, index)?;
        }
        Ok(())
    }

    fn emit_snapshot(&self, event_type: &str, data: Option<&D>) -> HandlerResult {
        let Some(handlers) = self.inner.bindings.lock().snapshot(event_type) else {
            return Ok(());
        };

        tracing::trace!(event_type, handlers = handlers.len(), "Emitting event");
        let event = Event::new(event_type, self, data);
        for (index, handler) in handlers.iter().enumerate() {
            self.invoke(handler, &event, index)?;
        }
        Ok(())
    }

    fn invoke(&self, handler: &Handler<D>, event: &Event<'_, D>, index: usize) -> HandlerResult {
        handler.call(event).inspect_err(|e| {
            tracing::debug!(
                event_type = event.event_type(),
                index,
                error = %e,
                "Handler failed, aborting dispatch"
            );
        })
    }

    /// Whether any handler is bound to `event_type`.
    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.inner.bindings.lock().contains(event_type)
    }

    /// Number of handlers bound to `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.inner.bindings.lock().count(event_type)
    }

    /// Event types that currently have handlers, sorted.
    pub fn event_types(&self) -> Vec<String> {
        self.inner.bindings.lock().event_types()
    }

    /// Unbind every handler for `event_type`, or for every type when `None`.
    /// Returns the number of handlers removed.
    pub fn remove_all(&self, event_type: Option<&str>) -> usize {
        let removed = self.inner.bindings.lock().remove_all(event_type);
        tracing::trace!(event_type, removed, "Handlers cleared");
        removed
    }

    /// Whether both handles refer to the same emitter.
    pub fn same_as(&self, other: &Emitter<D>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<D> Clone for Emitter<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D> Default for Emitter<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for Emitter<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("config", &self.inner.config)
            .field("event_types", &self.event_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_LISTENERS;
    use std::sync::Mutex as StdMutex;

    fn recorder() -> Arc<StdMutex<Vec<i32>>> {
        Arc::new(StdMutex::new(Vec::new()))
    }

    fn push(log: &Arc<StdMutex<Vec<i32>>>, value: i32) -> Handler<()> {
        let log = Arc::clone(log);
        Handler::from_fn(move |_| log.lock().unwrap().push(value))
    }

    #[test]
    fn test_emit_runs_handlers_in_order() {
        let emitter = Emitter::<()>::new();
        let log = recorder();

        emitter.on("x", push(&log, 1));
        emitter.on("x", push(&log, 2));
        emitter.emit("x", None).unwrap();

        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_emit_without_listeners_is_noop() {
        let emitter = Emitter::<()>::new();
        assert!(emitter.emit("nothing", None).is_ok());
        assert!(!emitter.has_listeners("nothing"));
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        let emitter = Emitter::<()>::new();
        let log = recorder();
        let handler = push(&log, 5);

        emitter.on("x", handler.clone());
        emitter.on("x", handler.clone());
        emitter.emit("x", None).unwrap();
        assert_eq!(*log.lock().unwrap(), vec![5, 5]);

        assert!(emitter.off("x", &handler));
        assert_eq!(emitter.listener_count("x"), 1);
    }

    #[test]
    fn test_off_removes_key_when_empty() {
        let emitter = Emitter::<()>::new();
        let log = recorder();
        let handler = push(&log, 1);

        emitter.on("x", handler.clone());
        assert!(emitter.off("x", &handler));
        assert!(!emitter.off("x", &handler));
        assert!(!emitter.has_listeners("x"));
        assert!(emitter.event_types().is_empty());

        emitter.emit("x", None).unwrap();
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_try_on_rejects_non_handler() {
        let emitter = Emitter::<()>::new();

        let err = emitter.try_on("x", 42_i32).unwrap_err();
        assert!(matches!(
            err,
            EmitterError::InvalidHandlerType { received: "i32" }
        ));
        assert!(!emitter.has_listeners("x"));
    }

    #[test]
    fn test_try_on_accepts_handler() {
        let emitter = Emitter::<()>::new();
        let log = recorder();

        emitter.try_on("x", push(&log, 9)).unwrap();
        emitter.emit("x", None).unwrap();
        assert_eq!(*log.lock().unwrap(), vec![9]);
    }

    #[test]
    fn test_try_on_rejects_handler_for_other_payload() {
        let emitter = Emitter::<()>::new();
        let foreign: Handler<String> = Handler::from_fn(|_| {});

        let err = emitter.try_on("x", foreign).unwrap_err();
        assert!(matches!(err, EmitterError::InvalidHandlerType { .. }));
    }

    #[test]
    fn test_listener_limit_still_registers() {
        let emitter = Emitter::<()>::with_config(EmitterConfig::new().max_listeners(2));
        for _ in 0..3 {
            emitter.on("x", Handler::from_fn(|_| {}));
        }
        assert_eq!(emitter.listener_count("x"), 3);
    }

    #[test]
    fn test_listener_limit_warns_once_when_crossed() {
        let emitter = Emitter::<()>::with_config(EmitterConfig::new().max_listeners(2));

        let warned: Vec<bool> = (0..4)
            .map(|_| emitter.bind("x".to_string(), Handler::from_fn(|_| {})))
            .collect();

        assert_eq!(warned, vec![false, false, true, false]);
        assert_eq!(emitter.listener_count("x"), 4);
    }

    #[test]
    fn test_listener_limit_disabled_by_zero() {
        let emitter = Emitter::<()>::with_config(EmitterConfig::new().max_listeners(0));

        for _ in 0..(DEFAULT_MAX_LISTENERS * 2) {
            assert!(!emitter.bind("x".to_string(), Handler::from_fn(|_| {})));
        }
        assert_eq!(emitter.listener_count("x"), DEFAULT_MAX_LISTENERS * 2);
    }

    #[test]
    fn test_default_limit_is_ten() {
        let emitter = Emitter::<()>::new();
        let warned: Vec<bool> = (0..11)
            .map(|_| emitter.bind("x".to_string(), Handler::from_fn(|_| {})))
            .collect();

        assert_eq!(warned.iter().position(|w| *w), Some(DEFAULT_MAX_LISTENERS));
    }

    #[test]
    fn test_clone_shares_bindings() {
        let emitter = Emitter::<()>::new();
        let other = emitter.clone();
        other.on("x", Handler::from_fn(|_| {}));

        assert!(emitter.same_as(&other));
        assert!(emitter.has_listeners("x"));
        assert!(!emitter.same_as(&Emitter::new()));
    }

    #[test]
    fn test_remove_all() {
        let emitter = Emitter::<()>::new();
        emitter.on("a", Handler::from_fn(|_| {}));
        emitter.on("b", Handler::from_fn(|_| {}));
        emitter.on("b", Handler::from_fn(|_| {}));

        assert_eq!(emitter.remove_all(Some("b")), 2);
        assert_eq!(emitter.event_types(), vec!["a".to_string()]);
        assert_eq!(emitter.remove_all(None), 1);
        assert!(!emitter.has_listeners("a"));
    }

    #[test]
    fn test_debug_lists_event_types() {
        let emitter = Emitter::<()>::new();
        emitter.on("ready", Handler::from_fn(|_| {}));
        let debug = format!("{emitter:?}");
        assert!(debug.contains("ready"));
    }
}
