use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::config::StageConfig;
use super::error::{NlgError, Result};
use super::event::{Event, InputEvent, MessageId};
use super::telemetry::{TelemetryEvent, TelemetryRecorder};

use crate::intent::{classify, IntentKind};
use crate::outputs::{generate, TemplateRepository};
use crate::perception::SceneRecord;

/// The generation stage: one record in, one answered record out.
///
/// `step` is the synchronous core and never awaits. `run` is the driver that
/// feeds it from the inbound channel and publishes to the downstream one.
pub struct Reactor {
    pub receiver: mpsc::Receiver<Event>,
    downstream: mpsc::Sender<Value>,
    templates: Arc<TemplateRepository>,
    rng: StdRng,
    pub config: StageConfig,
    pub telemetry: TelemetryRecorder,
}

impl Reactor {
    /// Fails fast if any label a classifier can emit has no templates.
    pub fn new(
        receiver: mpsc::Receiver<Event>,
        downstream: mpsc::Sender<Value>,
        templates: Arc<TemplateRepository>,
        config: StageConfig,
    ) -> Result<Self> {
        templates.validate(&IntentKind::required_labels())?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            receiver,
            downstream,
            templates,
            rng,
            config,
            telemetry: TelemetryRecorder::new(),
        })
    }

    /// Decodes one inbound body and answers it.
    ///
    /// The body is forwarded as it arrived, with only `response` set and the
    /// stage name appended to `path_done`. A body missing required fields is
    /// reported as `MalformedInput`.
    pub fn step(&mut self, input: InputEvent) -> Result<Value> {
        let message_id = MessageId::new();
        let InputEvent { source, mut body } = input;

        let record = match SceneRecord::deserialize(&body) {
            Ok(record) => record,
            Err(e) => {
                self.telemetry.record(TelemetryEvent::Rejected { message_id });
                return Err(NlgError::from(e));
            }
        };
        debug!(%message_id, %source, "Decoded scene record");

        let response = self.answer(message_id, &record)?;
        self.stamp(&mut body, response)?;
        Ok(body)
    }

    /// Convenience for callers holding a raw JSON value.
    pub fn step_value(&mut self, body: Value) -> Result<Value> {
        self.step(InputEvent::new("direct", body))
    }

    fn answer(&mut self, message_id: MessageId, record: &SceneRecord) -> Result<String> {
        let intent = IntentKind::from_name(record.intent_name());

        match classify(intent, record) {
            Some(classification) => {
                debug!(
                    %message_id,
                    %intent,
                    label = %classification.context,
                    count = classification.count,
                    "Classified"
                );
                self.telemetry.record(TelemetryEvent::Classified {
                    message_id,
                    intent,
                    label: classification.context,
                });

                let text = generate(
                    &self.templates,
                    &classification.objects,
                    classification.context,
                    &mut self.rng,
                )?;

                self.telemetry.record(TelemetryEvent::Responded {
                    message_id,
                    label: classification.context,
                });
                info!(%message_id, label = %classification.context, chars = text.len(), "Response generated");
                Ok(text)
            }
            None => {
                info!(%message_id, %intent, "Nothing to answer with, apologising");
                self.telemetry.record(TelemetryEvent::Apologised { message_id, intent });
                Ok(self.config.apology.clone())
            }
        }
    }

    /// Writes the answer into the inbound body. Only `response` and
    /// `path_done` are touched; a missing or null `path_done` starts a new list.
    fn stamp(&self, body: &mut Value, response: String) -> Result<()> {
        let fields = body
            .as_object_mut()
            .ok_or_else(|| NlgError::MalformedInput("scene record is not an object".to_string()))?;

        fields.insert("response".to_string(), Value::String(response));

        let stage = Value::String(self.config.stage_name.clone());
        match fields.get_mut("path_done") {
            Some(Value::Array(path)) => path.push(stage),
            _ => {
                fields.insert("path_done".to_string(), Value::Array(vec![stage]));
            }
        }
        Ok(())
    }

    /// Async driver loop. Returns when the inbound channel closes, a
    /// `Shutdown` event arrives, or downstream goes away.
    pub async fn run(&mut self) {
        info!("{} started, {} template labels loaded", self.config.stage_name, self.templates.len());

        while let Some(event) = self.receiver.recv().await {
            let input = match event {
                Event::Input(input) => input,
                Event::Shutdown => {
                    info!("Shutdown requested");
                    break;
                }
            };

            // Malformed bodies are dropped here; nothing is retried.
            let answered = match self.step(input) {
                Ok(answered) => answered,
                Err(e) => {
                    warn!("Dropping message: {}", e);
                    continue;
                }
            };

            if self.downstream.send(answered).await.is_err() {
                warn!("Downstream channel closed, stopping");
                break;
            }
        }

        info!("{} stopped", self.config.stage_name);
    }
}
