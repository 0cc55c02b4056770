/// Tolerant name check between a detected object and a requested entity.
///
/// Accepts an exact match, or an entity value that is the object name plus a
/// trailing "s" ("cup" vs "cups"). Not symmetric: `matches("cups", "cup")` is false.
pub fn matches(object_name: &str, entity_value: &str) -> bool {
    if object_name == entity_value {
        return true;
    }
    match entity_value.strip_suffix('s') {
        Some(stem) => stem == object_name,
        None => false,
    }
}
