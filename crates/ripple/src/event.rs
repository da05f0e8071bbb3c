//! The record passed to handlers on dispatch.

use std::fmt;

use serde_json::Value;

use crate::emitter::Emitter;

/// A single emitted event.
///
/// One `Event` is built per [`Emitter::emit`] call and lent to every handler
/// in turn. The emitter does not keep it afterwards.
pub struct Event<'a, D = Value> {
    event_type: &'a str,
    target: &'a Emitter<D>,
    data: Option<&'a D>,
}

impl<'a, D> Event<'a, D> {
    /// Create an event as emitted by `target`.
    pub fn new(event_type: &'a str, target: &'a Emitter<D>, data: Option<&'a D>) -> Self {
        Self {
            event_type,
            target,
            data,
        }
    }

    /// The type this event was emitted under, e.g. `"advanced"`.
    pub fn event_type(&self) -> &'a str {
        self.event_type
    }

    /// The emitter responsible for this event.
    pub fn target(&self) -> &'a Emitter<D> {
        self.target
    }

    /// The payload, if one was emitted.
    pub fn data(&self) -> Option<&'a D> {
        self.data
    }

    /// Whether this event came from `emitter`.
    pub fn is_from(&self, emitter: &Emitter<D>) -> bool {
        self.target.same_as(emitter)
    }
}

impl<D: fmt::Debug> fmt::Debug for Event<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("target", self.target)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_accessors() {
        let emitter = Emitter::new();
        let payload = json!({ "message": "Refrigerator unable to connect" });
        let event = Event::new("error", &emitter, Some(&payload));

        assert_eq!(event.event_type(), "error");
        assert_eq!(event.data(), Some(&payload));
        assert!(event.is_from(&emitter));
    }

    #[test]
    fn test_is_from_distinguishes_emitters() {
        let first: Emitter<()> = Emitter::new();
        let second: Emitter<()> = Emitter::new();
        let event = Event::new("x", &first, None);

        assert!(event.is_from(&first));
        assert!(event.is_from(&first.clone()));
        assert!(!event.is_from(&second));
        assert!(event.data().is_none());
    }
}
