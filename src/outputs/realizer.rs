use rand::seq::SliceRandom;
use rand::Rng;

use super::templates::{TemplateRepository, PLACEHOLDER};
use crate::intent::{ContextLabel, Phrases};
use crate::kernel::error::{NlgError, Result};
use crate::perception::Counted;

/// Quantifier in front of a noun phrase: "no ", "a ", "<n> ".
/// Confidence phrases already spell out their quantity, so they get nothing.
pub fn determiner(entry: &Counted, context: ContextLabel) -> String {
    if context == ContextLabel::CONFIDENCE_SOMETHING {
        return String::new();
    }
    match entry.count {
        0 => "no ".to_string(),
        1 => "a ".to_string(),
        n => format!("{} ", n),
    }
}

fn phrase(entry: &Counted, context: ContextLabel) -> String {
    format!("{}{}", determiner(entry, context), entry.label)
}

/// Picks a template for `context` and fills its placeholder.
///
/// Lists read "a, b and c". An empty list leaves the template as is.
pub fn generate<R: Rng + ?Sized>(
    templates: &TemplateRepository,
    objects: &Phrases,
    context: ContextLabel,
    rng: &mut R,
) -> Result<String> {
    let template = templates
        .get(context)
        .and_then(|set| set.choose(rng))
        .ok_or(NlgError::MissingTemplateSet(context))?;

    let filler = match objects {
        Phrases::Text(text) => text.clone(),
        Phrases::Counted(items) => match items.split_last() {
            None => return Ok(template.clone()),
            Some((last, [])) => phrase(last, context),
            Some((last, rest)) => {
                let head = rest
                    .iter()
                    .map(|entry| phrase(entry, context))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} and {}", head, phrase(last, context))
            }
        },
    };

    Ok(template.replacen(PLACEHOLDER, &filler, 1))
}
