use std::path::Path;

use serde::Deserialize;

use crate::session::{Account, Role};

/// Optional configuration file, read from the working directory.
pub const CONFIG_FILE_NAME: &str = "csvscope.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Tunables with sensible defaults.  Everything is optional in the file:
///
/// ```json
/// {
///   "preview_rows": 500,
///   "histogram_bins": 30,
///   "accounts": [
///     { "username": "admin", "password": "secret", "role": "admin" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cap on rows shown in the preview table (the full table stays in
    /// memory and is always exported in full).
    pub preview_rows: usize,

    /// Fixed histogram bin count; `None` picks one from the data size.
    pub histogram_bins: Option<usize>,

    /// Login accounts.  Defaults are demo credentials.
    pub accounts: Vec<Account>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            preview_rows: 500,
            histogram_bins: None,
            accounts: vec![
                Account {
                    username: "admin".to_string(),
                    password: "admin".to_string(),
                    role: Role::Admin,
                },
                Account {
                    username: "analyst".to_string(),
                    password: "analyst".to_string(),
                    role: Role::Viewer,
                },
            ],
        }
    }
}

impl AppConfig {
    /// Load from [`CONFIG_FILE_NAME`] in the working directory.  A missing
    /// file is silently the default config; an unreadable or invalid file
    /// logs a warning and falls back to the defaults.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(config) => {
                log::info!("loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("invalid {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_demo_accounts() {
        let config = AppConfig::default();
        assert_eq!(config.preview_rows, 500);
        assert!(config.histogram_bins.is_none());
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.accounts[0].role, Role::Admin);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from(Path::new("does_not_exist_csvscope.json"));
        assert_eq!(config.preview_rows, AppConfig::default().preview_rows);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "preview_rows": 42 }"#).unwrap();
        assert_eq!(config.preview_rows, 42);
        assert_eq!(config.accounts.len(), 2);
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join("csvscope_config_test.json");
        std::fs::write(&path, "{ not json").unwrap();
        let config = AppConfig::load_from(&path);
        assert_eq!(config.preview_rows, AppConfig::default().preview_rows);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn accounts_parse_with_roles() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "accounts": [ { "username": "u", "password": "p", "role": "viewer" } ] }"#,
        )
        .unwrap();
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts[0].role, Role::Viewer);
    }
}
