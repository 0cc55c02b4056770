//! Per-intent interpretation of a scene record.
//!
//! Each classifier reduces the heterogeneous perception output into the
//! canonical (objects, context, count) triple that the realizer turns into text.
//! Classifiers are pure: they read the record and never touch templates or RNG.

use tracing::debug;

use super::types::{ContextLabel, IntentKind, DESCRIPTION_TYPES};
use crate::perception::{aggregate, matches, Counted, DetectedObject, SceneRecord};

/// What gets substituted into the template placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phrases {
    /// Inserted verbatim, no determiner (read text, colour answers).
    Text(String),
    /// Noun phrases with counts, joined with determiners by the realizer.
    Counted(Vec<Counted>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub objects: Phrases,
    pub context: ContextLabel,
    pub count: u32,
}

impl Classification {
    fn counted(objects: Vec<Counted>, context: ContextLabel, count: u32) -> Self {
        Self { objects: Phrases::Counted(objects), context, count }
    }

    fn text(text: String, context: ContextLabel, count: u32) -> Self {
        Self { objects: Phrases::Text(text), context, count }
    }
}

/// Runs the classifier registered for `kind`.
/// `None` means nothing usable came out and the caller should apologise.
pub fn classify(kind: IntentKind, record: &SceneRecord) -> Option<Classification> {
    debug!(intent = %kind, objects = record.objects.len(), "Classifying scene");
    match kind {
        IntentKind::Identify => Some(identify(record)),
        IntentKind::Recognise => Some(recognise(record)),
        IntentKind::ReadText => Some(read_text(record)),
        IntentKind::DetectColour => detect_colour(record),
        IntentKind::Count => Some(count(record)),
        IntentKind::Confidence => Some(confidence(record)),
        IntentKind::Locate => Some(locate(record)),
        IntentKind::Default => Some(default(record)),
    }
}

fn description_for_total(total: u32) -> ContextLabel {
    DESCRIPTION_TYPES[total.min(2) as usize]
}

fn describe_scene(record: &SceneRecord, skip_people: bool) -> Classification {
    let seen: Vec<String> = record
        .objects
        .iter()
        .filter(|o| !(skip_people && o.name == "person"))
        .map(|o| format!("{}{}", o.name, o.lateral()))
        .collect();
    let (objects, total) = aggregate(&seen);
    Classification::counted(objects, description_for_total(total), total)
}

/// Every entity value that some detected object matches, once per (object, entity) pair.
fn matched_pairs<'a>(record: &'a SceneRecord) -> impl Iterator<Item = (&'a DetectedObject, &'a str)> + 'a {
    record.objects.iter().flat_map(move |o| {
        record
            .entities()
            .iter()
            .filter(move |e| matches(&o.name, &e.value))
            .map(move |e| (o, e.value.as_str()))
    })
}

/// "What can you see?" Everything except people.
pub fn identify(record: &SceneRecord) -> Classification {
    describe_scene(record, true)
}

/// Fallback for intents this stage has no specific reading for.
pub fn default(record: &SceneRecord) -> Classification {
    describe_scene(record, false)
}

/// "Is there a cup?"
///
/// When nothing matches, the answer lists every requested entity once so the
/// negative template can name them. The label is decided before that fallback.
pub fn recognise(record: &SceneRecord) -> Classification {
    let seen: Vec<String> = matched_pairs(record)
        .map(|(o, value)| format!("{}{}", value, o.lateral()))
        .collect();
    let (mut objects, mut total) = aggregate(&seen);

    let context = match (total > 0, total > 1) {
        (true, true) => ContextLabel::POSITIVE_ANSWER_P,
        (true, false) => ContextLabel::POSITIVE_ANSWER_S,
        (false, true) => ContextLabel::NEGATIVE_ANSWER_P,
        (false, false) => ContextLabel::NEGATIVE_ANSWER_S,
    };

    if total == 0 {
        objects = record
            .entities()
            .iter()
            .map(|e| Counted::new(e.value.clone(), 1))
            .collect();
        total = objects.iter().map(|c| c.count).sum();
    }

    Classification::counted(objects, context, total)
}

pub fn read_text(record: &SceneRecord) -> Classification {
    let text = record
        .texts
        .iter()
        .map(|tokens| tokens.join(" "))
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        Classification::text(text, ContextLabel::READ_TEXT_NEGATIVE, 0)
    } else {
        Classification::text(text, ContextLabel::READ_TEXT_POSITIVE, 1)
    }
}

/// "What colour is the cup?"
///
/// Only the outcome for the last object in iteration order is kept; earlier
/// objects are overwritten, not merged. For that object the first matching
/// entity wins, otherwise the last entity checked is reported without a colour.
pub fn detect_colour(record: &SceneRecord) -> Option<Classification> {
    let mut outcome: Option<(&str, Option<&str>)> = None;

    for object in &record.objects {
        for entity in record.entities() {
            if matches(&object.name, &entity.value) {
                outcome = Some((entity.value.as_str(), object.colour()));
                break;
            }
            outcome = Some((entity.value.as_str(), None));
        }
    }

    let (value, colour) = outcome?;
    Some(match colour {
        Some(colour) => Classification::text(colour.to_string(), ContextLabel::COLOR_DETECTION, 1),
        None => Classification::text(value.to_string(), ContextLabel::COLOR_DETECTION_N, 0),
    })
}

/// "How many cups are there?" Requested entities with no match still appear, with count 0.
pub fn count(record: &SceneRecord) -> Classification {
    let seen: Vec<&str> = matched_pairs(record).map(|(_, value)| value).collect();
    let (mut objects, total) = aggregate(&seen);

    for entity in record.entities() {
        if !objects.iter().any(|c| c.label == entity.value) {
            objects.push(Counted::new(entity.value.clone(), 0));
        }
    }

    Classification::counted(objects, ContextLabel::DESCRIPTION_COUNT, total)
}

/// "How sure are you?" Looks back at the previous turn.
///
/// Each phrase carries its own quantity wording, so its weight is only used
/// for the total.
pub fn confidence(record: &SceneRecord) -> Classification {
    let previous = match record.previous() {
        Some(prev) if IntentKind::from_name(prev.intent_name()).supports_confidence_followup() => prev,
        _ => return Classification::counted(Vec::new(), ContextLabel::CONFIDENCE_NOTHING, 0),
    };

    let requested: Vec<&str> = if previous.entities().is_empty() {
        previous.objects.iter().map(|o| o.name.as_str()).collect()
    } else {
        previous.entities().iter().map(|e| e.value.as_str()).collect()
    };

    let mut objects = Vec::with_capacity(requested.len());
    for value in requested {
        let scores: Vec<f64> = previous
            .objects
            .iter()
            .filter(|o| matches(&o.name, value))
            .map(|o| o.confidence)
            .collect();

        if scores.is_empty() {
            objects.push(Counted::new(format!("more than 50% that there is no {}", value), 0));
        } else {
            let n = scores.len() as u32;
            let average = scores.iter().sum::<f64>() / scores.len() as f64;
            objects.push(Counted::new(
                format!("{}% that there is {} {}", percent(average), n, value),
                n,
            ));
        }
    }

    let total = objects.iter().map(|c| c.count).sum();
    Classification::counted(objects, ContextLabel::CONFIDENCE_SOMETHING, total)
}

/// Rounds half to even: 0.125 -> 12.
fn percent(score: f64) -> i64 {
    (score * 100.0).round_ties_even() as i64
}

/// "Where is the cup?"
pub fn locate(record: &SceneRecord) -> Classification {
    let seen: Vec<String> = matched_pairs(record)
        .map(|(o, value)| format!("{}{}", value, position_phrase(o)))
        .collect();
    let (objects, total) = aggregate(&seen);

    let index = match objects.len() {
        0 if record.objects.is_empty() => 0,
        0 => 3,
        1 => 1,
        _ => 2,
    };

    Classification::counted(objects, DESCRIPTION_TYPES[index], total)
}

/// Anchors win over the hand, the hand over the lateral suffix.
///
/// Anchors are glued literally: non-final entries get ", " and the final one
/// gets " and" with no space after it. An entry counts as final only if its
/// first occurrence is the last slot.
pub fn position_phrase(object: &DetectedObject) -> String {
    let anchors = &object.anchored_position;
    if !anchors.is_empty() {
        let last = anchors.len() - 1;
        let mut phrase = String::new();
        for anchor in anchors {
            let first_seen = anchors.iter().position(|a| a == anchor);
            if first_seen == Some(last) {
                phrase.push_str(" and");
            } else {
                phrase.push_str(", ");
            }
            phrase.push_str(anchor);
        }
        return phrase;
    }

    match object.hand() {
        Some(hand) => hand.to_string(),
        None => object.lateral().to_string(),
    }
}
