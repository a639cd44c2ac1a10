use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::content::RangeKind;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseConfig,
    pub render: RenderConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Drop ranges that reach past the end of their block's text.
    pub drop_out_of_bounds_ranges: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Strip leading and trailing newlines from rendered text.
    pub trim_newlines: bool,
    /// Mark `"quoted"` substrings with a quote run.
    pub detect_quotes: bool,
    /// Word budget for subject snippets.
    pub snippet_words: usize,
    /// Range kinds rendered as runs, every kind when unset. Ranges carrying
    /// a URL are kept as links either way.
    pub styled_kinds: Option<Vec<String>>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            drop_out_of_bounds_ranges: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            trim_newlines: true,
            detect_quotes: false,
            snippet_words: 20,
            styled_kinds: None,
        }
    }
}

impl RenderConfig {
    /// Notification subject lines: entity ranges and quotes only.
    pub fn subject() -> Self {
        let kinds = [
            RangeKind::USER,
            RangeKind::POST,
            RangeKind::SITE,
            RangeKind::COMMENT,
            RangeKind::BLOCKQUOTE,
            RangeKind::NOTICON,
        ];
        Self {
            detect_quotes: true,
            styled_kinds: Some(kinds.iter().map(|kind| kind.as_str().to_owned()).collect()),
            ..Self::default()
        }
    }

    pub fn styles(&self, kind: &RangeKind, url: Option<&str>) -> bool {
        match &self.styled_kinds {
            None => true,
            Some(kinds) => url.is_some() || kinds.iter().any(|styled| styled == kind.as_str()),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Config> {
        toml::from_str(text).context("invalid configuration")
    }

    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        Config::from_toml(&text)
    }

    /// Defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        }
    }
}
