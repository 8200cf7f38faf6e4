/*
 * Dino Forge - Trait Engine Module
 * 开发心理过程:
 * 1. 设计纯函数式的特性兼容引擎,所有结果由目录和当前选择推导
 * 2. 整合目录加载、冲突检测和推荐排序
 * 3. 在加载时做冲突/协同关系的对称闭包,查询阶段零额外成本
 * 4. 提供完整的错误类型和确定性的输出顺序
 * 5. 目录构建后不可变,可在多个调用方之间安全共享
 */

use thiserror::Error;

pub mod catalog;
pub mod compatibility;
pub mod data;
pub mod suggestions;

pub use self::catalog::*;
pub use self::compatibility::*;
pub use self::data::*;
pub use self::suggestions::*;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TraitEngineError {
    #[error("Duplicate trait id: {0}")]
    DuplicateTrait(String),
    #[error("Unknown trait id: {0}")]
    UnknownTrait(String),
    #[error("Catalog parse error: {0}")]
    CatalogFormat(String),
}

pub type TraitEngineResult<T> = Result<T, TraitEngineError>;
