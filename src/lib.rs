// ==========================================
// 整机配置推荐系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 预算约束下的整机配置推荐（模型引导 + 贪心回退）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 模型层 - 离线训练产物（编码表 + 评分器）
pub mod model;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 选配规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Component, ComponentType, ConfirmedQuote, Recommendation, SelectedComponent, SLOT_ORDER,
};

// 模型
pub use model::{BuildScorer, EncodingTable, ModelArtifact};

// 引擎
pub use engine::{
    AssemblyError, AssemblyReport, BuildAssembler, ComponentCatalog, QuoteStore, RetryPolicy,
    SelectionPath,
};

// API
pub use api::{ApiError, RecommendApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "整机配置推荐系统";
