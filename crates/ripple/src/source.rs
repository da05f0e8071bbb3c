//! Composition support for types that emit events.
//!
//! A host type embeds an [`Emitter`] and implements [`EventSource`] to expose
//! the emitter API as its own.
//!
//! ```
//! use ripple::{Emitter, EventSource};
//!
//! struct Carousel {
//!     index: usize,
//!     slides: usize,
//!     events: Emitter<usize>,
//! }
//!
//! impl EventSource<usize> for Carousel {
//!     fn emitter(&self) -> &Emitter<usize> {
//!         &self.events
//!     }
//! }
//!
//! impl Carousel {
//!     fn advance(&mut self) -> Result<(), ripple::HandlerError> {
//!         self.index = (self.index + 1) % self.slides;
//!         self.emit("advanced", Some(self.index))
//!     }
//! }
//!
//! let mut carousel = Carousel { index: 0, slides: 3, events: Emitter::new() };
//! carousel.listen("advanced", |event| {
//!     assert_eq!(event.data(), Some(&1));
//!     Ok(())
//! });
//! carousel.advance()?;
//! # Ok::<(), ripple::HandlerError>(())
//! ```

use std::any::Any;

use crate::emitter::Emitter;
use crate::error::{EmitterResult, HandlerResult};
use crate::event::Event;
use crate::handler::Handler;

/// A type that owns an [`Emitter`] and emits through it.
pub trait EventSource<D> {
    /// The embedded emitter.
    fn emitter(&self) -> &Emitter<D>;

    /// See [`Emitter::on`].
    fn on(&self, event_type: impl Into<String>, handler: Handler<D>) {
        self.emitter().on(event_type, handler)
    }

    /// See [`Emitter::try_on`].
    fn try_on<C: Any>(&self, event_type: impl Into<String>, callback: C) -> EmitterResult<()>
    where
        D: 'static,
    {
        self.emitter().try_on(event_type, callback)
    }

    /// See [`Emitter::listen`].
    fn listen<F>(&self, event_type: impl Into<String>, f: F) -> Handler<D>
    where
        F: Fn(&Event<'_, D>) -> HandlerResult + Send + Sync + 'static,
    {
        self.emitter().listen(event_type, f)
    }

    /// See [`Emitter::off`].
    fn off(&self, event_type: &str, handler: &Handler<D>) -> bool {
        self.emitter().off(event_type, handler)
    }

    /// See [`Emitter::emit`].
    fn emit(&self, event_type: &str, data: Option<D>) -> HandlerResult {
        self.emitter().emit(event_type, data)
    }

    /// See [`Emitter::has_listeners`].
    fn has_listeners(&self, event_type: &str) -> bool {
        self.emitter().has_listeners(event_type)
    }
}
