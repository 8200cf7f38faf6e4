// 恐龙设计器演示程序入口
// 开发心理：简洁的启动流程，命令行给定特性组合，输出验证结果和推荐
// 保持代码整洁和可测试性，业务逻辑全部在库内

use std::path::PathBuf;
use std::{env, fs, process};

use log::{error, info};

use dinoforge::{AppConfig, Result, TraitCatalog, TraitSelection};

fn main() {
    // 初始化日志系统
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("🦖 启动恐龙设计器 v{}", dinoforge::VERSION);

    if let Err(e) = run(&env::args().collect::<Vec<String>>()) {
        error!("运行失败: {}", e);
        process::exit(1);
    }
}

#[derive(Debug, Default)]
struct CliOptions {
    traits: Vec<String>,
    max_results: Option<usize>,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

fn run(args: &[String]) -> Result<()> {
    let options = parse_args(args)?;

    let config = AppConfig::load(options.config_path.as_deref())?;
    let catalog = match &options.catalog_path {
        Some(path) => TraitCatalog::from_json_str(&fs::read_to_string(path)?)?,
        None => TraitCatalog::builtin()?,
    };
    info!("目录已加载: {} 个特性", catalog.len());

    let selection = TraitSelection::from_ids(options.traits.iter().cloned());

    let conflicts = catalog.validate_selection(&selection)?;
    if conflicts.is_empty() {
        println!("Selection OK ({} traits)", selection.len());
    } else {
        println!("Selection has {} conflict(s):", conflicts.len());
        for conflict in &conflicts {
            println!("  {} x {} - {}", conflict.trait1, conflict.trait2, conflict.reason);
        }
    }

    let max_results = options.max_results.or(config.engine.max_suggestions);
    let suggestions = catalog.suggest_with_weights(&selection, max_results, config.engine.weights())?;

    println!("Suggestions:");
    for suggestion in &suggestions {
        println!(
            "  {:<20} {:.2}  {}",
            suggestion.trait_id, suggestion.confidence, suggestion.reason
        );
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--max" => {
                let value = iter
                    .next()
                    .ok_or_else(|| dinoforge::DesignerError::InvalidInput("--max requires a value".to_string()))?;
                let parsed = value.parse().map_err(|_| {
                    dinoforge::DesignerError::InvalidInput(format!("invalid --max value: {}", value))
                })?;
                options.max_results = Some(parsed);
            }
            "--catalog" => {
                let value = iter
                    .next()
                    .ok_or_else(|| dinoforge::DesignerError::InvalidInput("--catalog requires a path".to_string()))?;
                options.catalog_path = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| dinoforge::DesignerError::InvalidInput("--config requires a path".to_string()))?;
                options.config_path = Some(PathBuf::from(value));
            }
            other => options.traits.push(other.to_string()),
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("dinoforge".to_string())
            .chain(list.iter().map(|s| s.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_traits_and_flags() {
        let options = parse_args(&args(&["sharp-teeth", "--max", "3", "agile"])).unwrap();
        assert_eq!(options.traits, vec!["sharp-teeth", "agile"]);
        assert_eq!(options.max_results, Some(3));
    }

    #[test]
    fn test_parse_invalid_max() {
        assert!(parse_args(&args(&["--max", "lots"])).is_err());
        assert!(parse_args(&args(&["--max"])).is_err());
    }

    #[test]
    fn test_run_with_builtin_catalog() {
        run(&args(&["sharp-teeth", "--max", "3"])).unwrap();
    }
}
