// 核心模块 - 错误类型和配置管理
// 开发心理：核心层只承载横切关注点，业务语义留给各子系统

pub mod config;
pub mod error;

pub use self::config::{AppConfig, AuthConfig, EngineConfig, GeneralConfig, PresetConfig};
pub use self::error::{DesignerError, ErrorSeverity, Result};
