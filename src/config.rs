use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::consts::{LOG_FILE_NAME, PRICING_FILE_NAME};

const AICOST_HOME_ENV: &str = "AICOST_HOME";

/// Optional user config file. Any key may be omitted.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    log_file: Option<PathBuf>,
    #[serde(default)]
    pricing_file: Option<PathBuf>,
}

/// Resolved paths handed to the ledger and pricing resolver. Built once at
/// startup; nothing below this reads ambient process state.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) log_path: PathBuf,
    pub(crate) pricing_path: PathBuf,
}

impl Settings {
    pub(crate) fn load() -> Self {
        // AICOST_HOME overrides everything else
        if let Ok(home) = env::var(AICOST_HOME_ENV) {
            let dir = PathBuf::from(home);
            return Settings {
                log_path: dir.join(LOG_FILE_NAME),
                pricing_path: dir.join(PRICING_FILE_NAME),
            };
        }

        let config = ConfigFile::load();
        let data_dir = config.data_dir.unwrap_or_else(Self::default_data_dir);
        Settings {
            log_path: config
                .log_file
                .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME)),
            pricing_path: config
                .pricing_file
                .unwrap_or_else(|| data_dir.join(PRICING_FILE_NAME)),
        }
    }

    fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".aicost"))
            .unwrap_or_else(|| PathBuf::from(".aicost"))
    }
}

impl ConfigFile {
    fn load() -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<ConfigFile>(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/aicost/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("aicost").join("config.toml"));
        }

        // 2. Platform config dir (macOS: ~/Library/Application Support)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("aicost").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.aicost.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".aicost.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = ConfigFile::get_config_paths();
        assert!(!paths.is_empty());
    }

    #[test]
    fn config_file_parses_partial_keys() {
        let config: ConfigFile = toml::from_str("data_dir = \"/tmp/aicost\"").unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/aicost")));
        assert!(config.log_file.is_none());
        assert!(config.pricing_file.is_none());
    }
}
