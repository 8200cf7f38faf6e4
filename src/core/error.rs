// 错误处理系统
// 开发心理：统一的错误类型系统，提供清晰的错误信息和恢复机制
// 使用Rust的Result类型确保错误处理的安全性和一致性

use std::{error::Error as StdError, fmt, io};

use serde::{Deserialize, Serialize};

use crate::auth::AuthError;
use crate::presets::PresetError;
use crate::trait_engine::TraitEngineError;

// 应用主要错误类型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DesignerError {
    // 配置和环境
    ConfigError(String),

    // 特性引擎
    EngineError(String),

    // 预设存储
    PresetError(String),

    // 认证
    AuthError(String),

    // IO和解析
    IOError(String),
    ParseError(String),

    // 通用错误
    InvalidInput(String),
    Unknown(String),
}

// Result类型别名
pub type Result<T> = std::result::Result<T, DesignerError>;

impl fmt::Display for DesignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignerError::ConfigError(msg) => write!(f, "配置错误: {}", msg),
            DesignerError::EngineError(msg) => write!(f, "特性引擎错误: {}", msg),
            DesignerError::PresetError(msg) => write!(f, "预设错误: {}", msg),
            DesignerError::AuthError(msg) => write!(f, "认证错误: {}", msg),
            DesignerError::IOError(msg) => write!(f, "IO错误: {}", msg),
            DesignerError::ParseError(msg) => write!(f, "解析错误: {}", msg),
            DesignerError::InvalidInput(msg) => write!(f, "输入无效: {}", msg),
            DesignerError::Unknown(msg) => write!(f, "未知错误: {}", msg),
        }
    }
}

impl StdError for DesignerError {}

// 错误转换实现
impl From<io::Error> for DesignerError {
    fn from(error: io::Error) -> Self {
        DesignerError::IOError(error.to_string())
    }
}

impl From<serde_json::Error> for DesignerError {
    fn from(error: serde_json::Error) -> Self {
        DesignerError::ParseError(error.to_string())
    }
}

impl From<toml::de::Error> for DesignerError {
    fn from(error: toml::de::Error) -> Self {
        DesignerError::ConfigError(error.to_string())
    }
}

impl From<TraitEngineError> for DesignerError {
    fn from(error: TraitEngineError) -> Self {
        DesignerError::EngineError(error.to_string())
    }
}

impl From<PresetError> for DesignerError {
    fn from(error: PresetError) -> Self {
        DesignerError::PresetError(error.to_string())
    }
}

impl From<AuthError> for DesignerError {
    fn from(error: AuthError) -> Self {
        DesignerError::AuthError(error.to_string())
    }
}

impl DesignerError {
    // 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 目录配置缺陷,上线前必须修复
            DesignerError::ConfigError(_) => ErrorSeverity::Critical,
            // UI与目录不同步才会出现,属于契约违反
            DesignerError::EngineError(_) => ErrorSeverity::High,
            DesignerError::AuthError(_) => ErrorSeverity::Medium,
            DesignerError::InvalidInput(_) => ErrorSeverity::Low,
            _ => ErrorSeverity::Medium,
        }
    }

    // 检查是否为可恢复错误
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DesignerError::ConfigError(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DesignerError::PresetError("missing".to_string());
        assert_eq!(error.to_string(), "预设错误: missing");
    }

    #[test]
    fn test_error_severity() {
        let error = DesignerError::ConfigError("bad catalog".to_string());
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_engine_error_conversion() {
        let engine_error = TraitEngineError::UnknownTrait("laser-eyes".to_string());
        let error: DesignerError = engine_error.into();
        match error {
            DesignerError::EngineError(msg) => assert!(msg.contains("laser-eyes")),
            _ => panic!("Expected EngineError"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: DesignerError = io_error.into();
        assert!(matches!(error, DesignerError::IOError(_)));
    }
}
