use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::from_str;

use crate::error::{Context, Result};
use crate::fetcher::DEFAULT_MAX_ATTEMPTS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub notes_path: PathBuf,
    pub log_path: PathBuf,
    pub max_attempts: u32,
    pub socket_timeout_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_path: PathBuf::from("AINotesDump.md"),
            log_path: PathBuf::from("ytnotes.log"),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            socket_timeout_secs: 15,
        }
    }
}

impl Config {
    /// Loads the config from an explicit path, or from the first existing
    /// file in the search locations, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file()?,
        };
        match path {
            Some(path) => {
                debug!("Loading configuration from {path:?}");
                let content = fs::read_to_string(path).context("cannot read config file")?;
                Ok(from_str(&content)?)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Config::default())
            }
        }
    }
}

fn find_config_file() -> Result<Option<PathBuf>> {
    let exe_path = std::env::current_exe()?;
    let exe_dir = exe_path.parent().unwrap_or(&exe_path);

    let paths = [
        dirs::config_local_dir()
            .unwrap_or_default()
            .join("ytnotes/config.json"),
        dirs::config_dir()
            .unwrap_or_default()
            .join("ytnotes/config.json"),
        exe_dir.join("ytnotes/config.json"),
    ];

    Ok(paths.into_iter().find(|p| p.exists()))
}

#[cfg(test)]
mod local_tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.notes_path, PathBuf::from("AINotesDump.md"));
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn test_load_explicit_file_with_partial_keys() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"notes_path": "elsewhere.md", "max_attempts": 5}"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.notes_path, PathBuf::from("elsewhere.md"));
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.socket_timeout_secs, 15);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        assert!(Config::load(Some(Path::new("/definitely/not/here.json"))).is_err());
    }
}
