use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key into the template repository. Carries no meaning beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ContextLabel {
    DESCRIPTION_NOTHING,
    DESCRIPTION_ANSWER_S,
    DESCRIPTION_ANSWER_P,
    DESCRIPTION_UNKNOWN,
    POSITIVE_ANSWER_S,
    POSITIVE_ANSWER_P,
    NEGATIVE_ANSWER_S,
    NEGATIVE_ANSWER_P,
    READ_TEXT_POSITIVE,
    READ_TEXT_NEGATIVE,
    COLOR_DETECTION,
    COLOR_DETECTION_N,
    DESCRIPTION_COUNT,
    CONFIDENCE_SOMETHING,
    CONFIDENCE_NOTHING,
}

/// Indexed by count (0, 1, 2+) and, for locate only, 3 = objects seen but none requested.
pub const DESCRIPTION_TYPES: [ContextLabel; 4] = [
    ContextLabel::DESCRIPTION_NOTHING,
    ContextLabel::DESCRIPTION_ANSWER_S,
    ContextLabel::DESCRIPTION_ANSWER_P,
    ContextLabel::DESCRIPTION_UNKNOWN,
];

impl ContextLabel {
    pub const ALL: [ContextLabel; 15] = [
        ContextLabel::DESCRIPTION_NOTHING,
        ContextLabel::DESCRIPTION_ANSWER_S,
        ContextLabel::DESCRIPTION_ANSWER_P,
        ContextLabel::DESCRIPTION_UNKNOWN,
        ContextLabel::POSITIVE_ANSWER_S,
        ContextLabel::POSITIVE_ANSWER_P,
        ContextLabel::NEGATIVE_ANSWER_S,
        ContextLabel::NEGATIVE_ANSWER_P,
        ContextLabel::READ_TEXT_POSITIVE,
        ContextLabel::READ_TEXT_NEGATIVE,
        ContextLabel::COLOR_DETECTION,
        ContextLabel::COLOR_DETECTION_N,
        ContextLabel::DESCRIPTION_COUNT,
        ContextLabel::CONFIDENCE_SOMETHING,
        ContextLabel::CONFIDENCE_NOTHING,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextLabel::DESCRIPTION_NOTHING => "DESCRIPTION_NOTHING",
            ContextLabel::DESCRIPTION_ANSWER_S => "DESCRIPTION_ANSWER_S",
            ContextLabel::DESCRIPTION_ANSWER_P => "DESCRIPTION_ANSWER_P",
            ContextLabel::DESCRIPTION_UNKNOWN => "DESCRIPTION_UNKNOWN",
            ContextLabel::POSITIVE_ANSWER_S => "POSITIVE_ANSWER_S",
            ContextLabel::POSITIVE_ANSWER_P => "POSITIVE_ANSWER_P",
            ContextLabel::NEGATIVE_ANSWER_S => "NEGATIVE_ANSWER_S",
            ContextLabel::NEGATIVE_ANSWER_P => "NEGATIVE_ANSWER_P",
            ContextLabel::READ_TEXT_POSITIVE => "READ_TEXT_POSITIVE",
            ContextLabel::READ_TEXT_NEGATIVE => "READ_TEXT_NEGATIVE",
            ContextLabel::COLOR_DETECTION => "COLOR_DETECTION",
            ContextLabel::COLOR_DETECTION_N => "COLOR_DETECTION_N",
            ContextLabel::DESCRIPTION_COUNT => "DESCRIPTION_COUNT",
            ContextLabel::CONFIDENCE_SOMETHING => "CONFIDENCE_SOMETHING",
            ContextLabel::CONFIDENCE_NOTHING => "CONFIDENCE_NOTHING",
        }
    }
}

impl fmt::Display for ContextLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextLabel {
    type Err = ();

    /// Case-sensitive, matches template file names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContextLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or(())
    }
}

/// Closed set of intents this stage knows how to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Identify,
    Recognise,
    ReadText,
    DetectColour,
    Count,
    Confidence,
    Locate,
    /// Anything else upstream sends us.
    Default,
}

impl IntentKind {
    pub const ALL: [IntentKind; 8] = [
        IntentKind::Identify,
        IntentKind::Recognise,
        IntentKind::ReadText,
        IntentKind::DetectColour,
        IntentKind::Count,
        IntentKind::Confidence,
        IntentKind::Locate,
        IntentKind::Default,
    ];

    /// Total mapping: unknown names land on `Default`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "identify" => IntentKind::Identify,
            "recognise" => IntentKind::Recognise,
            "read_text" => IntentKind::ReadText,
            "detect_colour" => IntentKind::DetectColour,
            "count" => IntentKind::Count,
            "confidence" => IntentKind::Confidence,
            "locate" => IntentKind::Locate,
            _ => IntentKind::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Identify => "identify",
            IntentKind::Recognise => "recognise",
            IntentKind::ReadText => "read_text",
            IntentKind::DetectColour => "detect_colour",
            IntentKind::Count => "count",
            IntentKind::Confidence => "confidence",
            IntentKind::Locate => "locate",
            IntentKind::Default => "default",
        }
    }

    /// Intents whose previous turn can be asked about with `confidence`.
    pub fn supports_confidence_followup(&self) -> bool {
        matches!(
            self,
            IntentKind::Identify | IntentKind::Recognise | IntentKind::Locate | IntentKind::Count
        )
    }

    /// Every label the classifier for this intent can produce.
    /// Checked against the template repository at startup.
    pub fn emitted_labels(&self) -> &'static [ContextLabel] {
        use ContextLabel::*;
        match self {
            IntentKind::Identify | IntentKind::Default => {
                &[DESCRIPTION_NOTHING, DESCRIPTION_ANSWER_S, DESCRIPTION_ANSWER_P]
            }
            IntentKind::Recognise => &[
                POSITIVE_ANSWER_S,
                POSITIVE_ANSWER_P,
                NEGATIVE_ANSWER_S,
                NEGATIVE_ANSWER_P,
            ],
            IntentKind::ReadText => &[READ_TEXT_POSITIVE, READ_TEXT_NEGATIVE],
            IntentKind::DetectColour => &[COLOR_DETECTION, COLOR_DETECTION_N],
            IntentKind::Count => &[DESCRIPTION_COUNT],
            IntentKind::Confidence => &[CONFIDENCE_SOMETHING, CONFIDENCE_NOTHING],
            IntentKind::Locate => &[
                DESCRIPTION_NOTHING,
                DESCRIPTION_ANSWER_S,
                DESCRIPTION_ANSWER_P,
                DESCRIPTION_UNKNOWN,
            ],
        }
    }

    /// Union of `emitted_labels` over all intents, sorted and deduplicated.
    pub fn required_labels() -> Vec<ContextLabel> {
        let mut labels: Vec<ContextLabel> = IntentKind::ALL
            .iter()
            .flat_map(|kind| kind.emitted_labels().iter().copied())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
