use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_STAGE_NAME: &str = "NaturalLanguageGenerator";
pub const DEFAULT_APOLOGY: &str = "I didn't understand the question, could you repeat please.";

#[derive(Debug, Clone)]
pub struct StageConfig {
    /// Directory with one template file per context label.
    pub templates_dir: PathBuf,
    /// Appended to `path_done` on every forwarded record.
    pub stage_name: String,
    pub channel_capacity: usize,
    /// Fixed seed for template selection. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub apology: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("data/sentence_templates"),
            stage_name: DEFAULT_STAGE_NAME.to_string(),
            channel_capacity: 100,
            seed: None,
            apology: DEFAULT_APOLOGY.to_string(),
        }
    }
}

impl StageConfig {
    /// Reads `NLG_TEMPLATES_DIR`, `NLG_STAGE_NAME`, `NLG_CHANNEL_CAPACITY` and `NLG_SEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an explicit lookup, so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("NLG_TEMPLATES_DIR") {
            config.templates_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup("NLG_STAGE_NAME").filter(|n| !n.trim().is_empty()) {
            config.stage_name = name;
        }
        if let Some(capacity) = parse_var::<usize>(&lookup, "NLG_CHANNEL_CAPACITY") {
            // tokio panics on a zero-capacity channel
            config.channel_capacity = capacity.max(1);
        }
        config.seed = parse_var::<u64>(&lookup, "NLG_SEED");

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}={:?}, using default", key, raw);
            None
        }
    }
}
