use std::collections::{HashMap, VecDeque};

use super::event::TelemetryEvent;
use crate::intent::{ContextLabel, IntentKind};

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub classified: u64,
    pub responses: u64,
    pub apologies: u64,
    pub rejected: u64,
    pub per_intent: HashMap<IntentKind, u64>,
    pub per_label: HashMap<ContextLabel, u64>,
}

impl TelemetrySnapshot {
    pub fn intent_count(&self, intent: IntentKind) -> u64 {
        self.per_intent.get(&intent).copied().unwrap_or(0)
    }

    pub fn label_count(&self, label: ContextLabel) -> u64 {
        self.per_label.get(&label).copied().unwrap_or(0)
    }
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::Classified { intent, .. } => {
                snap.classified += 1;
                *snap.per_intent.entry(*intent).or_insert(0) += 1;
            }
            TelemetryEvent::Responded { label, .. } => {
                snap.responses += 1;
                *snap.per_label.entry(*label).or_insert(0) += 1;
            }
            TelemetryEvent::Apologised { intent, .. } => {
                snap.apologies += 1;
                *snap.per_intent.entry(*intent).or_insert(0) += 1;
            }
            TelemetryEvent::Rejected { .. } => snap.rejected += 1,
        }
    }

    snap
}
