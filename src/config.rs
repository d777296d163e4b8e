use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI設定（ベースURL）
///
/// 環境変数が設定ファイルより優先される。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub conditions_api_base_url: Option<String>,
    pub geography_api_base_url: Option<String>,
}

const CONDITIONS_ENV: &str = "MEAD_CONDITIONS_API_BASE_URL";
const GEOGRAPHY_ENV: &str = "MEAD_GEOGRAPHY_API_BASE_URL";

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("設定ファイルを読めません: {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("設定ファイルが不正です: {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("ホームディレクトリが見つかりません")?;
        Ok(home.join(".config").join("mead").join("config.json"))
    }

    /// conditions APIのベースURL（環境変数優先）
    pub fn conditions_base(&self) -> Option<String> {
        if let Ok(url) = std::env::var(CONDITIONS_ENV) {
            if !url.trim().is_empty() {
                return Some(url);
            }
        }
        self.conditions_api_base_url.clone()
    }

    /// geography APIのベースURL（環境変数優先）
    pub fn geography_base(&self) -> Option<String> {
        if let Ok(url) = std::env::var(GEOGRAPHY_ENV) {
            if !url.trim().is_empty() {
                return Some(url);
            }
        }
        self.geography_api_base_url.clone()
    }
}
