use anyhow::Context;
use scene_nlg::kernel::event::{Event, InputEvent};
use scene_nlg::outputs::TemplateRepository;
use scene_nlg::{Reactor, StageConfig};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Bus adapter for running the stage standalone: one JSON scene record per
/// stdin line in, one answered record per stdout line out.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (stderr, stdout carries records)
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    // 2. Config + Templates (startup validation happens in Reactor::new)
    let config = StageConfig::from_env();
    let templates = TemplateRepository::load_dir(&config.templates_dir)
        .with_context(|| format!("loading templates from {}", config.templates_dir.display()))?;

    let (tx_input, rx_input) = mpsc::channel(config.channel_capacity);
    let (tx_out, mut rx_out) = mpsc::channel(config.channel_capacity);

    let mut reactor = Reactor::new(rx_input, tx_out, Arc::new(templates), config)
        .context("template repository failed startup validation")?;

    // 3. Downstream publisher (Stdout)
    let publisher = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(record) = rx_out.recv().await {
            let line = match serde_json::to_string(&record) {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Failed to encode outbound record: {}", e);
                    continue;
                }
            };
            if let Err(e) = write_line(&mut stdout, &line).await {
                tracing::error!("Stdout closed, stopping publisher: {}", e);
                break;
            }
        }
    });

    // 4. Inbound reader (Stdin). EOF closes the channel and ends the reactor.
    tokio::spawn(async move {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            let body = match serde_json::from_str(&line) {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Skipping non-JSON input line: {}", e);
                    continue;
                }
            };
            if let Err(e) = tx_input.send(Event::Input(InputEvent::new("stdin", body))).await {
                tracing::error!("Failed to send input: {}", e);
                break;
            }
        }
    });

    // 5. Run Stage
    reactor.run().await;
    drop(reactor);
    publisher.await.context("publisher task failed")?;

    Ok(())
}

async fn write_line(stdout: &mut tokio::io::Stdout, line: &str) -> std::io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
