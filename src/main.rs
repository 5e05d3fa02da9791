// ==========================================
// 整机配置推荐系统 - 命令行入口
// ==========================================
// 用法:
//   pc-build-recommender recommend <budget>
//   pc-build-recommender confirm <recommendation.json>
//   pc-build-recommender component <TYPE> <budget>
//   pc-build-recommender quotes [limit]
//   pc-build-recommender config
//
// 数据库路径: PC_BUILD_DB_PATH 或用户数据目录
// ==========================================

use pc_build_recommender::app::{get_default_db_path, AppState};
use pc_build_recommender::logging;
use pc_build_recommender::Recommendation;

const USAGE: &str = "用法:
  pc-build-recommender recommend <budget>
  pc-build-recommender confirm <recommendation.json>
  pc-build-recommender component <TYPE> <budget>
  pc-build-recommender quotes [limit]
  pc-build-recommender config";

const DEFAULT_QUOTE_LIMIT: usize = 20;

fn parse_budget(raw: Option<String>) -> Result<f64, Box<dyn std::error::Error>> {
    let raw = raw.ok_or("缺少预算参数")?;
    let budget = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("预算格式错误 '{}': {}", raw, e))?;
    Ok(budget)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志系统
    logging::init();

    let mut args = std::env::args().skip(1);
    let command = match args.next() {
        Some(c) => c,
        None => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    tracing::info!("{} v{}", pc_build_recommender::APP_NAME, pc_build_recommender::VERSION);

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);
    let state = AppState::new(db_path)?;

    match command.as_str() {
        "recommend" => {
            let budget = parse_budget(args.next())?;
            let recommendation = state.recommend_api.recommend(budget)?;
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
        }
        "confirm" => {
            let path = args.next().ok_or("缺少配置文件路径")?;
            let raw = std::fs::read_to_string(&path)?;
            let recommendation: Recommendation = serde_json::from_str(&raw)?;
            let response = state.recommend_api.confirm(&recommendation)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "component" => {
            let component_type = args.next().ok_or("缺少部件类型")?;
            let budget = parse_budget(args.next())?;
            let suggestion = state
                .recommend_api
                .recommend_component(&component_type, budget)?;
            println!("{}", serde_json::to_string_pretty(&suggestion)?);
        }
        "quotes" => {
            let limit = match args.next() {
                Some(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| format!("条数格式错误 '{}': {}", raw, e))?,
                None => DEFAULT_QUOTE_LIMIT,
            };
            let quotes = state.quote_repo.list_recent(limit)?;
            println!("{}", serde_json::to_string_pretty(&quotes)?);
        }
        "config" => {
            println!("{}", state.config_manager.get_config_snapshot()?);
        }
        other => {
            eprintln!("未知命令: {}\n{}", other, USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}
