// ==========================================
// 整机配置推荐系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约束: 模型产物进程启动时加载一次，Arc 只读共享
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::api::RecommendApi;
use crate::config::{ConfigManager, RecommenderConfig};
use crate::db::{init_schema, open_sqlite_connection, read_schema_version};
use crate::engine::{BuildAssembler, ComponentCatalog, QuoteStore};
use crate::model::ModelArtifact;
use crate::repository::{ComponentRepository, ConfirmedQuoteRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 推荐API
    pub recommend_api: Arc<RecommendApi>,

    /// 部件目录仓储
    pub component_repo: Arc<ComponentRepository>,

    /// 确认报价仓储
    pub quote_repo: Arc<ConfirmedQuoteRepository>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 启动时读取的推荐引擎配置
    pub config: RecommenderConfig,

    /// 已加载的模型产物
    pub artifact: Arc<ModelArtifact>,
}

impl AppState {
    /// 创建新的AppState实例（从配置的模型路径加载模型）
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表（幂等）
    /// 2. 读取 config_kv 中的推荐引擎配置
    /// 3. 加载模型文件（相对路径以数据库所在目录为基准）
    /// 4. 创建引擎与 API 实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = Self::open_database(&db_path)?;
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let config = config_manager
            .load_recommender_config()
            .map_err(|e| format!("读取推荐配置失败: {}", e))?;

        let model_path = resolve_model_path(&db_path, &config.model_path);
        let artifact = ModelArtifact::load(&model_path)
            .map_err(|e| format!("无法加载模型 {}: {}", model_path.display(), e))?;

        Ok(Self::assemble(db_path, conn, config_manager, config, Arc::new(artifact)))
    }

    /// 使用已加载的模型创建AppState（测试/嵌入场景）
    pub fn with_artifact(db_path: String, artifact: Arc<ModelArtifact>) -> Result<Self, String> {
        let conn = Self::open_database(&db_path)?;
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let config = config_manager
            .load_recommender_config()
            .map_err(|e| format!("读取推荐配置失败: {}", e))?;

        Ok(Self::assemble(db_path, conn, config_manager, config, artifact))
    }

    fn open_database(db_path: &str) -> Result<Arc<Mutex<rusqlite::Connection>>, String> {
        let conn = open_sqlite_connection(db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        let schema_version =
            read_schema_version(&conn).map_err(|e| format!("读取schema_version失败: {}", e))?;
        tracing::debug!("数据库schema_version: {:?}", schema_version);
        Ok(Arc::new(Mutex::new(conn)))
    }

    fn assemble(
        db_path: String,
        conn: Arc<Mutex<rusqlite::Connection>>,
        config_manager: Arc<ConfigManager>,
        config: RecommenderConfig,
        artifact: Arc<ModelArtifact>,
    ) -> Self {
        // ==========================================
        // 初始化Repository层
        // ==========================================
        let component_repo = Arc::new(ComponentRepository::from_connection(conn.clone()));
        let quote_repo = Arc::new(ConfirmedQuoteRepository::from_connection(conn));

        // ==========================================
        // 初始化Engine层
        // ==========================================
        let catalog: Arc<dyn ComponentCatalog> = component_repo.clone();
        let quote_store: Arc<dyn QuoteStore> = quote_repo.clone();
        let assembler = Arc::new(BuildAssembler::new(
            catalog.clone(),
            artifact.clone(),
            config.retry_policy(),
        ));

        // ==========================================
        // 初始化API层
        // ==========================================
        let recommend_api = Arc::new(RecommendApi::new(assembler, catalog, quote_store));

        tracing::info!(
            "AppState初始化完成: model_version={}, sample_size={}, max_attempts={:?}",
            artifact.version(),
            config.sample_size,
            config.max_attempts
        );

        Self {
            db_path,
            recommend_api,
            component_repo,
            quote_repo,
            config_manager,
            config,
            artifact,
        }
    }
}

/// 解析模型文件路径（相对路径以数据库所在目录为基准）
pub fn resolve_model_path(db_path: &str, model_path: &str) -> PathBuf {
    let model_path = Path::new(model_path);
    if model_path.is_absolute() {
        return model_path.to_path_buf();
    }
    match Path::new(db_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(model_path),
        _ => model_path.to_path_buf(),
    }
}

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 PC_BUILD_DB_PATH（若设置）
/// - 否则: 用户数据目录/pc-build-recommender/pc_build.db
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("PC_BUILD_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./pc_build.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("pc-build-recommender");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("pc_build.db");
        }
    }

    path.to_string_lossy().to_string()
}
