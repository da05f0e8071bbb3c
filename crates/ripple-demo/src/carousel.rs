//! A slideshow that announces every slide change.

use ripple::{Emitter, EmitterConfig, EventSource, HandlerResult};
use serde::Serialize;

/// Event type emitted after each advance.
pub const ADVANCED: &str = "advanced";

/// Payload of an [`ADVANCED`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advanced {
    pub new_index: usize,
    pub slide_count: usize,
}

pub struct Carousel {
    index: usize,
    slide_count: usize,
    events: Emitter<Advanced>,
}

impl Carousel {
    pub fn new(slide_count: usize, config: EmitterConfig) -> Self {
        Self {
            index: 0,
            slide_count: slide_count.max(1),
            events: Emitter::with_config(config),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next slide, wrapping around, and emit [`ADVANCED`].
    pub fn advance(&mut self) -> HandlerResult {
        self.index = (self.index + 1) % self.slide_count;
        self.emit(
            ADVANCED,
            Some(Advanced {
                new_index: self.index,
                slide_count: self.slide_count,
            }),
        )
    }
}

impl EventSource<Advanced> for Carousel {
    fn emitter(&self) -> &Emitter<Advanced> {
        &self.events
    }
}
