use scene_nlg::perception::{aggregate, matches, Counted, SceneRecord};
use serde_json::json;

#[test]
fn test_comparator_plural_tolerance() {
    assert!(matches("cup", "cups"), "Entity plural should match singular object");
    assert!(matches("cup", "cup"), "Exact match");
    assert!(!matches("cup", "cupx"), "Only a trailing 's' is tolerated");
    assert!(!matches("cups", "cup"), "Comparator is not symmetric");
    assert!(!matches("cup", ""), "Empty entity never matches a named object");
    assert!(!matches("cup", "cupss"), "Only one 's' is stripped");
}

#[test]
fn test_aggregation_preserves_total() {
    let labels = ["cupleft", "bottle", "cupleft", "person", "bottle", "cupleft"];
    let (pairs, total) = aggregate(&labels);

    assert_eq!(total as usize, labels.len(), "Total must equal number of raw labels");
    assert_eq!(pairs.iter().map(|p| p.count).sum::<u32>(), total);
    assert_eq!(
        pairs,
        vec![
            Counted::new("bottle", 2),
            Counted::new("cupleft", 3),
            Counted::new("person", 1),
        ],
        "Pairs are distinct and sorted by label"
    );
}

#[test]
fn test_aggregation_empty() {
    let labels: Vec<String> = Vec::new();
    let (pairs, total) = aggregate(&labels);
    assert!(pairs.is_empty());
    assert_eq!(total, 0);
}

#[test]
fn test_scene_record_decoding_defaults_and_passthrough() {
    let body = json!({
        "objects": [{ "name": "cup", "confidence": 0.9, "bbox": [1, 2, 3, 4] }],
        "intents": { "intent": { "name": "identify", "confidence": 0.99 }, "entities": [] },
        "query": "what is in front of me"
    });

    let record: SceneRecord = serde_json::from_value(body).unwrap();
    let cup = &record.objects[0];
    assert_eq!(cup.lateral(), "");
    assert!(cup.anchored_position.is_empty());
    assert!(cup.hand().is_none());
    assert!(record.path_done.is_empty(), "path_done defaults to empty");
    assert!(record.responses.is_empty());

    // Unknown fields survive a round trip to the next stage
    let out = serde_json::to_value(&record).unwrap();
    assert_eq!(out["query"], json!("what is in front of me"));
    assert_eq!(out["objects"][0]["bbox"], json!([1, 2, 3, 4]));
    assert_eq!(out["intents"]["intent"]["confidence"], json!(0.99));
}

#[test]
fn test_scene_record_null_fields_read_as_defaults() {
    let body = json!({
        "objects": [{
            "name": "cup",
            "confidence": null,
            "anchored_position": null,
            "lateral_position": null,
            "colour": null,
            "hand_position": null
        }],
        "intents": { "intent": { "name": "identify" }, "entities": [] },
        "texts": null,
        "responses": null,
        "path_done": null
    });

    let record: SceneRecord = serde_json::from_value(body).expect("explicit nulls are accepted");
    let cup = &record.objects[0];
    assert_eq!(cup.confidence, 0.0);
    assert!(cup.anchored_position.is_empty());
    assert_eq!(cup.lateral(), "");
    assert!(cup.colour().is_none());
    assert!(cup.hand().is_none());
    assert!(record.texts.is_empty());
    assert!(record.previous().is_none());
    assert!(record.path_done.is_empty());
}

#[test]
fn test_scene_record_requires_intent_fields() {
    let missing_entities = json!({
        "objects": [],
        "intents": { "intent": { "name": "identify" } }
    });
    assert!(serde_json::from_value::<SceneRecord>(missing_entities).is_err());

    let missing_objects = json!({
        "intents": { "intent": { "name": "identify" }, "entities": [] }
    });
    assert!(serde_json::from_value::<SceneRecord>(missing_objects).is_err());
}
