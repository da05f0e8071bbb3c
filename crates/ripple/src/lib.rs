//! Ripple - minimal synchronous event emitter
//!
//! Handlers are bound to string event types with [`Emitter::on`] and run, in
//! the order they were bound, by [`Emitter::emit`]. Each handler receives the
//! same [`Event`], carrying the event type, the emitting [`Emitter`] and an
//! optional payload.
//!
//! There are no namespaces, wildcards, once-only bindings or deferred
//! delivery. A failing handler stops dispatch and its error is returned from
//! `emit` unchanged.
//!
//! # Usage
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use ripple::{Emitter, Handler};
//!
//! let emitter: Emitter<()> = Emitter::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! for n in [1, 2] {
//!     let seen = Arc::clone(&seen);
//!     emitter.on("x", Handler::from_fn(move |_| seen.lock().unwrap().push(n)));
//! }
//! emitter.emit("x", None)?;
//!
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
//! # Ok::<(), ripple::HandlerError>(())
//! ```
//!
//! Types that emit events embed an `Emitter` and implement [`EventSource`].

mod bindings;
mod config;
mod emitter;
mod error;
mod event;
mod handler;
mod source;

pub use config::{DEFAULT_MAX_LISTENERS, DispatchPolicy, EmitterConfig};
pub use emitter::Emitter;
pub use error::{EmitterError, EmitterResult, HandlerError, HandlerResult};
pub use event::Event;
pub use handler::Handler;
pub use source::EventSource;
