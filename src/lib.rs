// 恐龙设计器核心库入口
// 开发心理：现代Rust库设计最佳实践，注重确定性、安全性和可维护性
// 架构：纯函数特性引擎 + 可注入的存储/认证/搜索协作者接口

// 核心模块 - 始终可用
pub mod core;

// 特性兼容与推荐引擎
pub mod trait_engine;

// 协作者封装
pub mod auth;
pub mod presets;
pub mod search;

// 重新导出核心类型
pub use crate::core::{AppConfig, DesignerError, ErrorSeverity, Result};
pub use crate::trait_engine::{
    CandidateCheck, ConflictSeverity, SuggestionWeights, TraitCatalog, TraitCategory,
    TraitConflict, TraitDefinition, TraitEngineError, TraitRarity, TraitSelection,
    TraitSuggestion,
};

// 版本信息
pub const VERSION: &str = "0.1.0";
pub const NAME: &str = "dinoforge";

// 应用常量
pub mod constants {
    // 一只恐龙可携带的特性上限,UI层用于限制添加按钮
    pub const MAX_SELECTED_TRAITS: usize = 8;

    // 默认推荐条数,None语义之外的UI缺省值
    pub const DEFAULT_SUGGESTION_COUNT: usize = 5;

    // 预设名称长度上限
    pub const MAX_PRESET_NAME_LEN: usize = 64;
}

// 便利函数
pub fn init() -> Result<()> {
    // 初始化日志系统
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "dinoforge=info");
    }

    let _ = env_logger::try_init();

    log::info!("恐龙设计器核心初始化完成 v{}", VERSION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        init().unwrap();
    }

    #[test]
    fn test_version_info() {
        assert_eq!(VERSION, "0.1.0");
        assert_eq!(NAME, "dinoforge");
    }

    #[test]
    fn test_constants() {
        assert!(constants::DEFAULT_SUGGESTION_COUNT <= constants::MAX_SELECTED_TRAITS);
        assert!(constants::MAX_PRESET_NAME_LEN >= 16);
    }

    #[test]
    fn test_builtin_catalog_end_to_end() {
        let catalog = TraitCatalog::builtin().unwrap();
        let mut selection = TraitSelection::new();
        selection.add("sharp-teeth");

        assert!(catalog.validate_selection(&selection).unwrap().is_empty());

        let check = catalog.check_candidate(&selection, "herbivore").unwrap();
        assert!(!check.compatible);

        let suggestions = catalog
            .suggest(&selection, Some(constants::DEFAULT_SUGGESTION_COUNT))
            .unwrap();
        assert!(!suggestions.is_empty());
        assert!(suggestions.len() <= constants::DEFAULT_SUGGESTION_COUNT);
    }
}
