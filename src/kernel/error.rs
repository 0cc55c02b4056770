use std::path::PathBuf;
use thiserror::Error;

use crate::intent::ContextLabel;

#[derive(Debug, Error)]
pub enum NlgError {
    /// Generator asked for a label nobody loaded templates for.
    #[error("no templates registered for context {0}")]
    MissingTemplateSet(ContextLabel),

    #[error("template repository is missing labels the classifiers can emit: {missing:?}")]
    Configuration { missing: Vec<ContextLabel> },

    #[error("failed to read templates at {path}: {source}")]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene record: {0}")]
    MalformedInput(String),
}

impl From<serde_json::Error> for NlgError {
    fn from(e: serde_json::Error) -> Self {
        NlgError::MalformedInput(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NlgError>;
