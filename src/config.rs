//! User configuration
//!
//! Read from `--config FILE` or `$XDG_CONFIG_HOME/sentence-sift/config.yaml`
//! (falling back to `~/.config/sentence-sift/config.yaml`). A missing file
//! means defaults; a malformed one is logged and ignored.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::render::DEFAULT_LABEL_WIDTH;
use crate::segment::DEFAULT_LANGUAGE;

const APP_DIR: &str = "sentence-sift";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language code handed to the sentence segmenter
    pub language: String,

    /// Maximum chars of a sentence shown in the match list
    pub list_label_width: usize,

    /// Where to write logs; no file means logging stays off
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            list_label_width: DEFAULT_LABEL_WIDTH,
            log_file: None,
        }
    }
}

impl Config {
    /// Loads `path`, or the default config file when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_file() {
                Some(path) => path,
                None => {
                    tracing::debug!("no config directory available, using defaults");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            tracing::debug!("config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!("loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    tracing::warn!("failed to parse config at {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!("failed to read config at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

pub fn config_dir() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|config| config.join(APP_DIR))
}

pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}
