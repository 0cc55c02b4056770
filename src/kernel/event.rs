use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Correlates log lines and telemetry for one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    /// A message body delivered by the bus on the generation channel.
    Input(InputEvent),
    /// Stop draining and return from the driver loop.
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct InputEvent {
    pub source: String,
    /// Undecoded body; decoding happens inside the reactor step.
    pub body: Value,
}

impl InputEvent {
    pub fn new(source: &str, body: Value) -> Self {
        Self {
            source: source.to_string(),
            body,
        }
    }
}
