use crate::error::ConfigError;
use crate::pagination::BOOKS_PER_PAGE;
use crate::theme::ThemeChoice;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User settings read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub page_size: usize,
    pub theme: Option<String>,
    pub catalog: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: BOOKS_PER_PAGE,
            theme: None,
            catalog: None,
            log_level: None,
        }
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "bookconnect", "book-connect")
}

impl Config {
    /// `<config_dir>/config.toml` for this platform.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        self.theme_choice()?;
        Ok(())
    }

    pub fn theme_choice(&self) -> Result<Option<ThemeChoice>, ConfigError> {
        self.theme
            .as_deref()
            .map(|raw| {
                raw.parse().map_err(|e: crate::theme::ParseThemeError| ConfigError::Invalid {
                    key: "theme",
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}
