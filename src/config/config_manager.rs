// ==========================================
// 整机配置推荐系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::config_reader::AssemblyConfigReader;
use crate::engine::retry::RetryPolicy;
use crate::engine::sampler::DEFAULT_SAMPLE_SIZE;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 默认模型文件路径
pub const DEFAULT_MODEL_PATH: &str = "pc_build_model.json";

// ==========================================
// RecommenderConfig - 推荐引擎配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    pub sample_size: usize,
    pub max_attempts: Option<u32>, // None = 不限
    pub model_path: String,
}

impl RecommenderConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            sample_size: self.sample_size,
        }
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            max_attempts: None,
            model_path: DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 汇总读取推荐引擎配置
    pub fn load_recommender_config(&self) -> Result<RecommenderConfig, Box<dyn Error>> {
        Ok(RecommenderConfig {
            sample_size: self.get_sample_size()?,
            max_attempts: self.get_max_attempts()?,
            model_path: self.get_model_path()?,
        })
    }
}

impl AssemblyConfigReader for ConfigManager {
    fn get_sample_size(&self) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::SAMPLE_SIZE,
            &DEFAULT_SAMPLE_SIZE.to_string(),
        )?;
        let size: usize = value
            .trim()
            .parse()
            .map_err(|e| format!("{} 解析失败: {} ({})", config_keys::SAMPLE_SIZE, value, e))?;
        if size == 0 {
            return Err(format!("{} 必须大于 0", config_keys::SAMPLE_SIZE).into());
        }
        Ok(size)
    }

    fn get_max_attempts(&self) -> Result<Option<u32>, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::MAX_ATTEMPTS, "0")?;
        let max: u32 = value
            .trim()
            .parse()
            .map_err(|e| format!("{} 解析失败: {} ({})", config_keys::MAX_ATTEMPTS, value, e))?;
        // 0 表示不限
        Ok((max > 0).then_some(max))
    }

    fn get_model_path(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::MODEL_PATH, DEFAULT_MODEL_PATH)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 选配
    pub const SAMPLE_SIZE: &str = "recommender.sample_size";
    pub const MAX_ATTEMPTS: &str = "recommender.max_attempts";

    // 模型
    pub const MODEL_PATH: &str = "recommender.model_path";
}
