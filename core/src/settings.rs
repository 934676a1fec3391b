// SPDX-License-Identifier: GPL-3.0-only

use std::env;
use std::num::{NonZeroUsize, ParseIntError};
use std::path::PathBuf;

use dotenvy::dotenv;
use pagewise_utils::pagination::{DEFAULT_ITEMS_PER_PAGE, PageIndex, PaginationConfig};

pub const PER_PAGE_VAR: &str = "PAGEWISE_PER_PAGE";
pub const INITIAL_PAGE_VAR: &str = "PAGEWISE_INITIAL_PAGE";
pub const SOURCE_VAR: &str = "PAGEWISE_SOURCE";
pub const SAMPLE_SIZE_VAR: &str = "PAGEWISE_SAMPLE_SIZE";

pub const DEFAULT_SAMPLE_SIZE: usize = 101;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{var} is not a valid number: {source}")]
    InvalidNumber {
        var: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("PAGEWISE_PER_PAGE must be greater than 0")]
    ZeroPageSize,
}

/// Startup settings of the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub pagination: PaginationConfig,
    /// Text file with one entry per line, sample entries are generated when missing
    pub source: Option<PathBuf>,
    pub sample_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pagination: PaginationConfig::default(),
            source: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl Settings {
    /// Reads the settings from the `.env` file (if any) and the process environment
    pub fn load() -> Result<Self, SettingsError> {
        if let Err(err) = dotenv() {
            log::debug!("no .env file loaded: {err}");
        }

        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let items_per_page = match parse_number(&lookup, PER_PAGE_VAR)? {
            Some(per_page) => NonZeroUsize::new(per_page).ok_or(SettingsError::ZeroPageSize)?,
            None => DEFAULT_ITEMS_PER_PAGE,
        };

        // Users count pages from 1
        let initial_page = parse_number(&lookup, INITIAL_PAGE_VAR)?
            .map(|page_number| PageIndex::from_page_number(page_number).get())
            .unwrap_or_default();

        let source = lookup(SOURCE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let sample_size = parse_number(&lookup, SAMPLE_SIZE_VAR)?.unwrap_or(DEFAULT_SAMPLE_SIZE);

        Ok(Self {
            pagination: PaginationConfig {
                items_per_page,
                initial_page,
            },
            source,
            sample_size,
        })
    }
}

fn parse_number(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<usize>, SettingsError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<usize>()
        .map(Some)
        .map_err(|source| SettingsError::InvalidNumber { var, source })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let settings = from_pairs(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.pagination.items_per_page.get(), 50);
        assert_eq!(settings.sample_size, 101);
    }

    #[test]
    fn reads_every_variable() {
        let settings = from_pairs(&[
            (PER_PAGE_VAR, "20"),
            (INITIAL_PAGE_VAR, " 3 "),
            (SOURCE_VAR, "/tmp/entries.txt"),
            (SAMPLE_SIZE_VAR, "7"),
        ])
        .unwrap();

        assert_eq!(settings.pagination.items_per_page.get(), 20);
        assert_eq!(settings.pagination.initial_page, 2);
        assert_eq!(settings.source, Some(PathBuf::from("/tmp/entries.txt")));
        assert_eq!(settings.sample_size, 7);
    }

    #[test]
    fn initial_page_zero_is_first_page() {
        let settings = from_pairs(&[(INITIAL_PAGE_VAR, "0")]).unwrap();
        assert_eq!(settings.pagination.initial_page, 0);
    }

    #[test]
    fn blank_values_fall_back() {
        let settings = from_pairs(&[(PER_PAGE_VAR, "  "), (SOURCE_VAR, "")]).unwrap();
        assert_eq!(settings.pagination.items_per_page.get(), 50);
        assert_eq!(settings.source, None);
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = from_pairs(&[(PER_PAGE_VAR, "0")]).unwrap_err();
        assert!(matches!(err, SettingsError::ZeroPageSize));
        assert_eq!(err.to_string(), "PAGEWISE_PER_PAGE must be greater than 0");
    }

    #[test]
    fn rejects_garbage() {
        let err = from_pairs(&[(SAMPLE_SIZE_VAR, "-4")]).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidNumber {
                var: SAMPLE_SIZE_VAR,
                ..
            }
        ));
    }
}
