//! Emitter configuration.

use serde::{Deserialize, Serialize};

use crate::error::EmitterResult;

/// Default number of handlers per event type before a warning is logged.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// How `emit` walks the handler sequence when handlers mutate it mid-dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Capture the length once, then index into the live sequence.
    ///
    /// Removing a handler during dispatch shifts the ones after it, so the
    /// handler that moves into the current slot is skipped. A handler bound
    /// during dispatch runs in the same emit only if removals pull it back
    /// under the captured length: with `[a, b]`, where `a` unbinds itself and
    /// binds `late`, the emit runs `a` then `late`, and `b` is skipped.
    ///
    /// Each step reads the entry currently stored for the event type. If a
    /// handler clears the type and binds new handlers to it, dispatch carries
    /// on over the new sequence. Dispatch stops early if the sequence shrinks
    /// below the current index.
    #[default]
    LiveIndex,

    /// Clone the sequence at emit start and run exactly those handlers.
    Snapshot,
}

/// Settings fixed at emitter construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Handlers per event type above which a warning is logged.
    /// `0` disables the warning.
    /// Default: 10
    pub max_listeners: usize,

    /// Dispatch behavior under reentrant mutation.
    /// Default: `LiveIndex`
    pub dispatch: DispatchPolicy,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
            dispatch: DispatchPolicy::default(),
        }
    }
}

impl EmitterConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that dispatches from a snapshot.
    pub fn snapshot() -> Self {
        Self {
            dispatch: DispatchPolicy::Snapshot,
            ..Default::default()
        }
    }

    /// Set the listener warning threshold.
    pub fn max_listeners(mut self, n: usize) -> Self {
        self.max_listeners = n;
        self
    }

    /// Set the dispatch policy.
    pub fn dispatch(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch = policy;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// ```
    /// use ripple::{DispatchPolicy, EmitterConfig};
    ///
    /// let config = EmitterConfig::from_json(r#"{ "dispatch": "snapshot" }"#).unwrap();
    /// assert_eq!(config.dispatch, DispatchPolicy::Snapshot);
    /// assert_eq!(config.max_listeners, 10);
    /// ```
    pub fn from_json(text: &str) -> EmitterResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
