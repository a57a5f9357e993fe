//! Api-key discovery and storage

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::SdkResult;

/// Environment variable checked before any credentials file
pub const API_KEY_ENV: &str = "ACN_API_KEY";

/// Saved identity of a registered agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

impl Credentials {
    pub fn from_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            agent_name: None,
            wallet_address: None,
        }
    }

    /// `~/.config/acn/credentials.json`, where `register` saves
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("acn").join("credentials.json"))
    }

    /// Files checked in order when no env var is set
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("acn").join("credentials.json"));
            paths.push(home.join(".acn").join("credentials.json"));
        }
        paths.push(PathBuf::from("acn_credentials.json"));
        paths
    }

    /// `ACN_API_KEY`, then the first readable credentials file
    pub fn discover() -> Option<Self> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        Self::discover_from(env_key, &Self::search_paths())
    }

    /// Discovery with explicit inputs; unreadable or malformed files are skipped
    pub fn discover_from(env_key: Option<String>, paths: &[PathBuf]) -> Option<Self> {
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            return Some(Self::from_api_key(key));
        }
        paths.iter().find_map(|path| match Self::load(path) {
            Ok(creds) => Some(creds),
            Err(err) => {
                if path.exists() {
                    tracing::debug!(path = %path.display(), error = %err, "Skipping credentials file");
                }
                None
            }
        })
    }

    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> SdkResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        tracing::info!(path = %path.display(), "Credentials saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_wins() {
        let creds = Credentials::discover_from(Some("acn_env".to_string()), &[]).unwrap();
        assert_eq!(creds.api_key, "acn_env");
        assert!(Credentials::discover_from(Some("  ".to_string()), &[]).is_none());
    }

    #[test]
    fn test_first_valid_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "not json").unwrap();
        let missing = dir.path().join("missing.json");
        let good = dir.path().join("nested").join("credentials.json");

        let saved = Credentials {
            api_key: "acn_file".to_string(),
            agent_name: Some("alice".to_string()),
            wallet_address: Some("0xabc".to_string()),
        };
        saved.save(&good).unwrap();

        let found = Credentials::discover_from(None, &[missing, broken, good]).unwrap();
        assert_eq!(found, saved);
    }

    #[test]
    fn test_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Credentials::discover_from(None, &[dir.path().join("none.json")]).is_none());
    }
}
