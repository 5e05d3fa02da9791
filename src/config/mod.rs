// ==========================================
// 整机配置推荐系统 - 配置层
// ==========================================
// 职责: 系统配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod config_reader;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, RecommenderConfig, DEFAULT_MODEL_PATH};
pub use config_reader::AssemblyConfigReader;
