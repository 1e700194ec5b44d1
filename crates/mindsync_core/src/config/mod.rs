use crate::error::AppError;
use crate::wellness::TipPool;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "MINDSYNC_CONFIG_PATH";

/// ANSI colours for plain output; every field is empty for the default theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub accent: &'static str,
    pub done: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    fn paint(&self, colour: &str, text: &str) -> String {
        if colour.is_empty() {
            text.to_string()
        } else {
            format!("{colour}{text}{}", self.reset)
        }
    }

    pub fn accentize(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    pub fn mutedize(&self, text: &str) -> String {
        self.paint(self.muted, text)
    }

    /// Colours a percentage green once it reaches 100.
    pub fn percentage(&self, value: u8) -> String {
        let text = format!("{value}%");
        if value >= 100 {
            self.paint(self.done, &text)
        } else {
            self.paint(self.accent, &text)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.map(canonical_theme_name).as_deref() {
        Some("noir") => Palette {
            accent: "\x1b[38;5;208m",
            done: "\x1b[38;5;114m",
            muted: "\x1b[38;5;250m",
            reset: "\x1b[0m",
        },
        Some("calm") => Palette {
            accent: "\x1b[38;5;110m",
            done: "\x1b[38;5;150m",
            muted: "\x1b[38;5;246m",
            reset: "\x1b[0m",
        },
        _ => Palette {
            accent: "",
            done: "",
            muted: "",
            reset: "",
        },
    }
}

/// Lowercases, collapses separators to `_` and maps aliases onto the known
/// themes. Blank input is the default theme.
pub fn canonical_theme_name(raw: &str) -> String {
    let cleaned = raw
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_");

    match cleaned.as_str() {
        "" | "light" | "plain" => "default".to_string(),
        "dark" | "dark_mode" | "darkmode" => "noir".to_string(),
        "zen" | "soft" => "calm".to_string(),
        _ => cleaned,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    /// Replaces the built-in wellness tip pool.
    #[serde(default)]
    pub tips_path: Option<PathBuf>,
}

impl Config {
    pub fn palette(&self) -> Palette {
        palette_for_theme(self.theme.as_deref())
    }

    pub fn tip_pool(&self) -> Result<TipPool, AppError> {
        match self.tips_path.as_deref() {
            Some(path) => TipPool::load(path),
            None => Ok(TipPool::builtin()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<String>,
    pub tips_path: Option<PathBuf>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("mindsync")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("mindsync")
            .join(CONFIG_FILE_NAME))
    }
}

/// Loads the config, falling back to defaults and reporting why.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable config");
            ConfigLoad {
                config: Config::default(),
                error: Some(err),
            }
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.theme = config.theme.as_deref().map(canonical_theme_name);

    // Relative tip pools are resolved next to the config file.
    if let Some(tips) = config.tips_path.take() {
        config.tips_path = Some(match path.parent() {
            Some(parent) if tips.is_relative() => parent.join(tips),
            _ => tips,
        });
    }

    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_deref() {
        merged.theme = Some(canonical_theme_name(theme));
    }
    if let Some(tips_path) = overrides.tips_path.as_ref() {
        merged.tips_path = Some(tips_path.clone());
    }
    merged
}
