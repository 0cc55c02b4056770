use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::intent::ContextLabel;
use crate::kernel::error::{NlgError, Result};

/// Reserved placeholder; only its first occurrence is replaced.
pub const PLACEHOLDER: char = '*';

/// Sentence skeletons per context label.
///
/// Built once at startup and only read afterwards, so it can be shared by
/// reference across handlers without locking.
#[derive(Debug, Clone, Default)]
pub struct TemplateRepository {
    sets: HashMap<ContextLabel, Vec<String>>,
}

impl TemplateRepository {
    pub fn from_sets<I, S>(sets: I) -> Self
    where
        I: IntoIterator<Item = (ContextLabel, Vec<S>)>,
        S: Into<String>,
    {
        Self {
            sets: sets
                .into_iter()
                .map(|(label, lines)| (label, lines.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// One file per label, file name = label (case-sensitive), one template per line.
    /// Lines are trimmed and blank ones dropped. Files with unknown names are skipped.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let io_err = |source: std::io::Error| NlgError::TemplateIo { path: dir.to_path_buf(), source };
        let mut sets = HashMap::new();

        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let label = match file_name.to_str().and_then(|n| n.parse::<ContextLabel>().ok()) {
                Some(label) => label,
                None => {
                    warn!("Skipping template file with unknown context label: {:?}", file_name);
                    continue;
                }
            };

            let content = fs::read_to_string(&path)
                .map_err(|source| NlgError::TemplateIo { path: path.clone(), source })?;
            let lines: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();

            debug!(label = %label, templates = lines.len(), "Loaded template set");
            sets.insert(label, lines);
        }

        info!("Template repository loaded: {} context labels from {}", sets.len(), dir.display());
        Ok(Self { sets })
    }

    /// Empty sets are treated as missing.
    pub fn get(&self, label: ContextLabel) -> Option<&[String]> {
        self.sets
            .get(&label)
            .map(Vec::as_slice)
            .filter(|set| !set.is_empty())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Fails with every label in `required` that has no usable set.
    pub fn validate(&self, required: &[ContextLabel]) -> Result<()> {
        let missing: Vec<ContextLabel> = required
            .iter()
            .copied()
            .filter(|label| self.get(*label).is_none())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(NlgError::Configuration { missing })
        }
    }
}
