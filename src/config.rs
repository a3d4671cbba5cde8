use crate::error::{AdminError, Result};
use merch_admin_common::{Preset, Unit, DEFAULT_PRESET_KEY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// デフォルトプリセットを上書きする環境変数
pub const PRESET_ENV_VAR: &str = "MERCH_ADMIN_PRESET";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_preset: String,
    pub default_unit: Option<Unit>,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_preset: DEFAULT_PRESET_KEY.into(),
            default_unit: None,
            currency_symbol: "$".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AdminError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("merch-admin").join("config.json"))
    }

    /// 使用するプリセットキー（環境変数を優先）
    pub fn preset_key(&self) -> String {
        if let Ok(key) = std::env::var(PRESET_ENV_VAR) {
            if !key.trim().is_empty() {
                return key;
            }
        }

        self.default_preset.clone()
    }

    pub fn set_default_preset(&mut self, key: &str) -> Result<()> {
        let preset = Preset::find(key).ok_or_else(|| {
            AdminError::Config(format!("不明なプリセット: {}", key))
        })?;
        self.default_preset = preset.key.to_string();
        self.save()
    }

    pub fn set_default_unit(&mut self, unit: Unit) -> Result<()> {
        self.default_unit = Some(unit);
        self.save()
    }
}
