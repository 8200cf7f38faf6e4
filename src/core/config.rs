/*
* 开发心理过程：
* 1. 创建应用配置管理系统，支持多种配置来源
* 2. 配置文件缺失时使用内置默认值
* 3. 提供类型安全的配置访问接口
* 4. 集成环境变量覆盖，适配托管部署
* 5. 加载后统一校验，配置缺陷尽早暴露
*/

use std::{env, fs, path::{Path, PathBuf}};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::error::{DesignerError, Result};
use crate::trait_engine::SuggestionWeights;

// 环境变量前缀
const ENV_PREFIX: &str = "DINO_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub presets: PresetConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub app_title: String,
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            app_title: "Dino Forge".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    // None表示返回全部候选
    pub max_suggestions: Option<usize>,
    pub synergy_weight: f64,
    pub rarity_weight: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let weights = SuggestionWeights::default();
        Self {
            max_suggestions: None,
            synergy_weight: weights.synergy,
            rarity_weight: weights.rarity,
        }
    }
}

impl EngineConfig {
    pub fn weights(&self) -> SuggestionWeights {
        SuggestionWeights {
            synergy: self.synergy_weight,
            rarity: self.rarity_weight,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetConfig {
    pub capacity: usize,
    // None表示使用内存存储
    pub storage_path: Option<PathBuf>,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            capacity: crate::presets::DEFAULT_PRESET_CAPACITY,
            storage_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub endpoint: String,
    pub anon_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            anon_key: String::new(),
        }
    }
}

impl AppConfig {
    /// 读取TOML配置文件并应用环境变量覆盖。
    /// path为None时直接使用默认值加环境变量。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        debug!("配置已加载: {:?}", path);
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var(format!("{}LOG_LEVEL", ENV_PREFIX)) {
            self.general.log_level = value;
        }
        if let Ok(value) = env::var(format!("{}MAX_SUGGESTIONS", ENV_PREFIX)) {
            match value.parse() {
                Ok(parsed) => self.engine.max_suggestions = Some(parsed),
                Err(_) => warn!("忽略无效的环境变量 {}MAX_SUGGESTIONS={}", ENV_PREFIX, value),
            }
        }
        if let Ok(value) = env::var(format!("{}PRESET_CAPACITY", ENV_PREFIX)) {
            match value.parse() {
                Ok(parsed) => self.presets.capacity = parsed,
                Err(_) => warn!("忽略无效的环境变量 {}PRESET_CAPACITY={}", ENV_PREFIX, value),
            }
        }
        if let Ok(value) = env::var(format!("{}PRESET_PATH", ENV_PREFIX)) {
            self.presets.storage_path = Some(PathBuf::from(value));
        }
        if let Ok(value) = env::var(format!("{}AUTH_ENDPOINT", ENV_PREFIX)) {
            self.auth.endpoint = value;
        }
        if let Ok(value) = env::var(format!("{}AUTH_ANON_KEY", ENV_PREFIX)) {
            self.auth.anon_key = value;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.presets.capacity == 0 {
            return Err(DesignerError::ConfigError(
                "presets.capacity must be at least 1".to_string(),
            ));
        }
        for (name, weight) in [
            ("engine.synergy_weight", self.engine.synergy_weight),
            ("engine.rarity_weight", self.engine.rarity_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(DesignerError::ConfigError(format!(
                    "{} must be within [0, 1], got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.weights(), SuggestionWeights::default());
        assert_eq!(config.presets.capacity, crate::presets::DEFAULT_PRESET_CAPACITY);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [presets]
            capacity = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.presets.capacity, 5);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_invalid_capacity_rejected() {
        let mut config = AppConfig::default();
        config.presets.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let mut config = AppConfig::default();
        config.engine.synergy_weight = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override() {
        env::set_var("DINO_PRESET_CAPACITY", "7");
        env::set_var("DINO_AUTH_ENDPOINT", "https://auth.example.dev");

        let mut config = AppConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.presets.capacity, 7);
        assert_eq!(config.auth.endpoint, "https://auth.example.dev");

        env::remove_var("DINO_PRESET_CAPACITY");
        env::remove_var("DINO_AUTH_ENDPOINT");
    }
}
