// ==========================================
// 整机配置推荐系统 - 确认报价数据仓储
// ==========================================
// 红线: 只追加，不更新、不删除
// ==========================================

use crate::domain::recommendation::{ConfirmedQuote, Recommendation};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// ConfirmedQuoteRepository - 确认报价仓储
// ==========================================
pub struct ConfirmedQuoteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ConfirmedQuoteRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入确认报价
    ///
    /// # 返回
    /// - Ok(String): 生成的 quote_id
    pub fn insert(&self, components: &Recommendation) -> RepositoryResult<String> {
        let quote_id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(components)?;
        let created_at = Utc::now().to_rfc3339();

        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO confirmed_quotes (quote_id, components, created_at) VALUES (?1, ?2, ?3)",
            params![quote_id, body, created_at],
        )?;

        Ok(quote_id)
    }

    /// 按 quote_id 查询
    pub fn find_by_id(&self, quote_id: &str) -> RepositoryResult<Option<ConfirmedQuote>> {
        let conn = self.get_conn()?;
        let row: Option<(String, String, String)> = conn
            .query_row(
                "SELECT quote_id, components, created_at FROM confirmed_quotes WHERE quote_id = ?1",
                params![quote_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        row.map(Self::to_quote).transpose()
    }

    /// 最近的确认报价（按创建时间倒序）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ConfirmedQuote>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT quote_id, components, created_at
            FROM confirmed_quotes
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<SqliteResult<Vec<(String, String, String)>>>()?;

        rows.into_iter().map(Self::to_quote).collect()
    }

    /// 报价总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM confirmed_quotes", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    fn to_quote((quote_id, body, created_at): (String, String, String)) -> RepositoryResult<ConfirmedQuote> {
        let components: Recommendation = serde_json::from_str(&body)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| RepositoryError::FieldValueError {
                field: "created_at".to_string(),
                message: e.to_string(),
            })?
            .with_timezone(&Utc);

        Ok(ConfirmedQuote {
            quote_id,
            components,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::SelectedComponent;
    use crate::domain::types::ComponentType;

    fn setup() -> ConfirmedQuoteRepository {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        ConfirmedQuoteRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_insert_returns_distinct_ids() {
        let repo = setup();
        let mut rec = Recommendation::new();
        rec.insert(
            ComponentType::Cpu,
            SelectedComponent { name: "i5".into(), price: 200.0, id: "1".into() },
        );
        rec.attach_total(200.0);

        let a = repo.insert(&rec).unwrap();
        let b = repo.insert(&rec).unwrap();
        assert_ne!(a, b);
        assert_eq!(repo.count().unwrap(), 2);

        let stored = repo.find_by_id(&a).unwrap().unwrap();
        assert_eq!(stored.components, rec);
        assert_eq!(repo.list_recent(10).unwrap().len(), 2);
        assert!(repo.find_by_id("missing").unwrap().is_none());
    }
}
