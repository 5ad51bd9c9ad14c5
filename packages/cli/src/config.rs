use anyhow::Context;
use blockpress_store::{DefaultPage, JsonFileStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_CONFIG_NAME: &str = "blockpress.config.json";

/// Blockpress configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON store file, relative to the working directory
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Slug of the page a session opens first
    #[serde(default = "default_initial_page")]
    pub initial_page: String,

    /// Pages created when the store is first used
    #[serde(default = "DefaultPage::standard_set")]
    pub default_pages: Vec<DefaultPage>,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_store_path() -> String {
    ".blockpress/store.json".to_string()
}

fn default_initial_page() -> String {
    "home".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the store file
    pub fn get_store_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_path)
    }

    pub async fn open_store(&self, cwd: &str) -> anyhow::Result<Arc<JsonFileStore>> {
        let path = self.get_store_path(cwd);
        let store = JsonFileStore::open(path.clone(), self.default_pages.clone())
            .await
            .with_context(|| format!("Cannot open store {}", path.display()))?;
        Ok(Arc::new(store))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            initial_page: default_initial_page(),
            default_pages: DefaultPage::standard_set(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpress_store::PageStatus;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "storePath": "data/pages.json",
            "initialPage": "about",
            "defaultPages": [
                { "slug": "pricing", "title": "Pricing", "status": "published" },
                { "slug": "faq", "title": "FAQ" }
            ],
            "logLevel": "debug"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store_path, "data/pages.json");
        assert_eq!(config.initial_page, "about");
        assert_eq!(config.default_pages.len(), 2);
        assert_eq!(config.default_pages[0].status, PageStatus::Published);
        assert_eq!(config.default_pages[1].status, PageStatus::Draft);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.store_path, ".blockpress/store.json");
        assert_eq!(config.initial_page, "home");
        assert_eq!(config.default_pages, DefaultPage::standard_set());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_missing_and_present() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        let config = Config::load(cwd).unwrap();
        assert_eq!(config.initial_page, "home");

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{"storePath": "s.json"}"#).unwrap();
        let config = Config::load(cwd).unwrap();
        assert_eq!(config.get_store_path(cwd), dir.path().join("s.json"));

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "not json").unwrap();
        assert!(Config::load(cwd).is_err());
    }
}
