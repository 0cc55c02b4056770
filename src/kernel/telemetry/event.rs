use serde::{Deserialize, Serialize};

use crate::intent::{ContextLabel, IntentKind};
use crate::kernel::event::MessageId;

// Allowed: IDs, Enums, Counts
// Forbidden: object names, entity values, texts, responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    Classified {
        message_id: MessageId,
        intent: IntentKind,
        label: ContextLabel,
    },

    Responded {
        message_id: MessageId,
        label: ContextLabel,
    },

    /// Classifier produced nothing usable; the fixed apology was sent.
    Apologised {
        message_id: MessageId,
        intent: IntentKind,
    },

    /// Inbound body could not be decoded.
    Rejected {
        message_id: MessageId,
    },
}
