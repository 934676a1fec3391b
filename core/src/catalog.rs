// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;
use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// One-based position inside the catalog
    pub position: usize,
    pub label: String,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Loads the entries to browse, from `source` when given or generated otherwise
pub async fn load(
    source: Option<PathBuf>,
    sample_size: usize,
) -> Result<Arc<Vec<Entry>>, anywho::Error> {
    let entries = match source {
        Some(path) => {
            log::info!("loading catalog from {}", path.display());
            let content = tokio::fs::read_to_string(&path).await?;
            parse(&content)
        }
        None => sample(sample_size),
    };

    log::debug!("catalog ready with {} entries", entries.len());
    Ok(Arc::new(entries))
}

/// One entry per non-blank line
pub fn parse(content: &str) -> Vec<Entry> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, label)| Entry {
            position: i + 1,
            label: label.to_string(),
        })
        .collect()
}

pub fn sample(size: usize) -> Vec<Entry> {
    (1..=size)
        .map(|position| Entry {
            position,
            label: format!("Entry {position}"),
        })
        .collect()
}
