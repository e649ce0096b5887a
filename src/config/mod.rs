use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::domain::abi::ValidationOptions;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Directories scanned for ABI files
    #[serde(default)]
    pub abi_paths: Vec<String>,

    /// Ignore unknown keys in ABI entries instead of rejecting them
    #[serde(default)]
    pub allow_unknown_keys: bool,

    /// Print encoded payloads with their compact length prefix
    #[serde(default)]
    pub length_prefix: bool,

    /// Default log filter when RUST_LOG is unset (e.g. "info", "contract_abi=debug")
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            allow_unknown_keys: self.allow_unknown_keys,
        }
    }

    /// Scan roots with `~` expanded
    pub fn abi_roots(&self) -> Vec<PathBuf> {
        self.abi_paths
            .iter()
            .map(|path| expand_home(path.trim()))
            .filter(|path| !path.as_os_str().is_empty())
            .collect()
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    load_from(&path)
}

/// Load a config file, falling back to defaults when it is missing or invalid
pub fn load_from(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring invalid config");
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("CONTRACT_ABI_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("contract-abi").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("contract-abi").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "contract-abi", "contract-abi")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
