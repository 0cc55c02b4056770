use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Optional fields may arrive as explicit `null`; read that as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One object reported by the upstream detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub name: String,
    /// Suffix such as "left"/"right", glued onto the name without a space.
    #[serde(default)]
    pub lateral_position: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64, // 0.0 - 1.0
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub anchored_position: Vec<String>,
    /// Empty string means "absent", same as a missing field.
    #[serde(default)]
    pub hand_position: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DetectedObject {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lateral_position: None,
            confidence: 0.0,
            colour: None,
            anchored_position: Vec::new(),
            hand_position: None,
            extra: Map::new(),
        }
    }

    pub fn with_lateral(mut self, position: &str) -> Self {
        self.lateral_position = Some(position.to_string());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_colour(mut self, colour: &str) -> Self {
        self.colour = Some(colour.to_string());
        self
    }

    pub fn with_anchors(mut self, anchors: &[&str]) -> Self {
        self.anchored_position = anchors.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_hand(mut self, hand: &str) -> Self {
        self.hand_position = Some(hand.to_string());
        self
    }

    /// Lateral suffix, or "" when missing.
    pub fn lateral(&self) -> &str {
        self.lateral_position.as_deref().unwrap_or("")
    }

    pub fn hand(&self) -> Option<&str> {
        self.hand_position.as_deref().filter(|h| !h.is_empty())
    }

    pub fn colour(&self) -> Option<&str> {
        self.colour.as_deref().filter(|c| !c.is_empty())
    }
}

/// A recognised entity from intent parsing. Only `value` is read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    pub fn new(value: &str) -> Self {
        Self { value: value.to_string(), extra: Map::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentName {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intents {
    pub intent: IntentName,
    pub entities: Vec<Entity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decoded view of the message body flowing through the pipeline.
///
/// Only used for classification. The reactor forwards the raw body, so
/// anything this view normalises (defaults, nulls) never reaches downstream.
/// `path_done` is decoded only to check its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub objects: Vec<DetectedObject>,
    pub intents: Intents,
    #[serde(default, deserialize_with = "null_as_default")]
    pub texts: Vec<Vec<String>>,
    /// Prior turns, most recent last.
    #[serde(default, deserialize_with = "null_as_default")]
    pub responses: Vec<SceneRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_done: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SceneRecord {
    pub fn new(intent: &str, objects: Vec<DetectedObject>, entities: Vec<Entity>) -> Self {
        Self {
            objects,
            intents: Intents {
                intent: IntentName { name: intent.to_string(), extra: Map::new() },
                entities,
                extra: Map::new(),
            },
            texts: Vec::new(),
            responses: Vec::new(),
            path_done: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn intent_name(&self) -> &str {
        &self.intents.intent.name
    }

    pub fn entities(&self) -> &[Entity] {
        &self.intents.entities
    }

    pub fn previous(&self) -> Option<&SceneRecord> {
        self.responses.last()
    }
}
