//! TOML project configuration: content globs plus theme extensions that are
//! merged over the built-in defaults.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    /// Glob patterns for the files the scanner walks.
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ThemeConfig {
    /// `[theme.colors.gray]` tables: family -> shade -> value.
    #[serde(default)]
    pub colors: BTreeMap<String, BTreeMap<String, String>>,
    /// Breakpoint overrides, `sm = "40rem"` style.
    #[serde(default)]
    pub breakpoints: BTreeMap<String, String>,
    /// Font stacks, `sans = "Inter, sans-serif"`.
    #[serde(default)]
    pub fonts: BTreeMap<String, String>,
    /// Base spacing unit, defaults to `0.25rem`.
    #[serde(default)]
    pub spacing: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.display().to_string(),
        source: err,
    })?;
    toml::from_str(&text).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        source: err,
    })
}

/// Merges the config's theme tables over `base`. Config entries win on key
/// collisions so a project can redefine a default shade.
pub fn apply_theme(config: &Config, base: Theme) -> Theme {
    let mut theme = base;
    if let Some(spacing) = &config.theme.spacing {
        theme = theme.add("--spacing", spacing);
    }
    for (family, shades) in &config.theme.colors {
        for (shade, value) in shades {
            theme = theme.add(&format!("--color-{}-{}", family, shade), value);
        }
    }
    for (name, value) in &config.theme.breakpoints {
        theme = theme.add(&format!("--breakpoint-{}", name), value);
    }
    for (name, stack) in &config.theme.fonts {
        theme = theme.add_font_family(name, stack);
    }
    theme
}
