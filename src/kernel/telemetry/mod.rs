//! In-process telemetry for the generation stage.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer. It is never read by the
//! classifiers, the realizer or the dispatch decision.
//!
//! # PRIVACY INVARIANT
//! Events carry message ids, intents, labels and counts. Never scene content
//! or generated text.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::TelemetryEvent;
pub use metrics::TelemetrySnapshot;
pub use recorder::TelemetryRecorder;
