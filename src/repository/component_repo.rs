// ==========================================
// 整机配置推荐系统 - 部件目录数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化
// ==========================================

use crate::domain::component::Component;
use crate::domain::types::ComponentType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// components 表原始行（type 字段尚未解析）
struct ComponentRow {
    component_id: String,
    name: String,
    manufacturer: Option<String>,
    price: f64,
    component_type: String,
}

impl ComponentRow {
    fn into_component(self) -> RepositoryResult<Component> {
        let component_type: ComponentType =
            self.component_type
                .parse()
                .map_err(|e: crate::domain::types::UnknownComponentType| {
                    RepositoryError::FieldValueError {
                        field: "type".to_string(),
                        message: format!("component_id={}: {}", self.component_id, e),
                    }
                })?;

        Ok(Component {
            component_id: self.component_id,
            name: self.name,
            manufacturer: self.manufacturer,
            price: self.price,
            component_type,
        })
    }
}

// ==========================================
// ComponentRepository - 部件目录仓储
// ==========================================

/// 部件目录仓储
/// 职责: 管理 components 表的查询与写入
pub struct ComponentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ComponentRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按类型随机抽取部件ID
    ///
    /// # 参数
    /// - component_type: 部件类型
    /// - count: 抽样上限（库存不足时返回更少）
    pub fn sample_ids_by_type(
        &self,
        component_type: ComponentType,
        count: usize,
    ) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT component_id FROM components WHERE type = ?1 ORDER BY RANDOM() LIMIT ?2",
        )?;

        let ids = stmt
            .query_map(params![component_type.as_str(), count as i64], |row| row.get(0))?
            .collect::<SqliteResult<Vec<String>>>()?;

        Ok(ids)
    }

    /// 按部件ID查询
    ///
    /// # 返回
    /// - Ok(Some(Component)): 找到部件
    /// - Ok(None): 未找到
    pub fn find_by_id(&self, component_id: &str) -> RepositoryResult<Option<Component>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT component_id, name, manufacturer, price, type
                FROM components
                WHERE component_id = ?1
                "#,
                params![component_id],
                |row| {
                    Ok(ComponentRow {
                        component_id: row.get(0)?,
                        name: row.get(1)?,
                        manufacturer: row.get(2)?,
                        price: row.get(3)?,
                        component_type: row.get(4)?,
                    })
                },
            )
            .optional()?;

        row.map(ComponentRow::into_component).transpose()
    }

    /// 插入单个部件
    pub fn insert(&self, component: &Component) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO components (component_id, name, manufacturer, price, type)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                component.component_id,
                component.name,
                component.manufacturer,
                component.price,
                component.component_type.as_str(),
            ],
        )?;
        Ok(())
    }

    /// 批量插入部件（单事务）
    ///
    /// # 返回
    /// - Ok(usize): 插入条数
    pub fn batch_insert(&self, components: &[Component]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO components (component_id, name, manufacturer, price, type)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for c in components {
                count += stmt.execute(params![
                    c.component_id,
                    c.name,
                    c.manufacturer,
                    c.price,
                    c.component_type.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(count)
    }
}
