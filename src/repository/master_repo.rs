// ==========================================
// 客车弹簧故障管理系统 - 主数据仓储
// ==========================================
// 职责: 管理 spring_types / defect_types / inspection_activities /
//       inspectors 四张主数据表
// 说明: 主数据整体作为一份快照被引擎消费 (engine::snapshot),
//       所以四张表集中在一个仓储里,加载顺序与查询排序固定
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::defect::DefectType;
use crate::domain::inspection::InspectionActivity;
use crate::domain::report::Inspector;
use crate::domain::spring::SpringTypeDefinition;
use crate::domain::types::ActivityKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub struct MasterDataRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MasterDataRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_tables()?;
        Ok(repo)
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_tables()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保主数据表存在（如果不存在则创建）
    fn ensure_tables(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS spring_types (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              spring_type TEXT NOT NULL UNIQUE,
              coach_types TEXT NOT NULL DEFAULT '[]',
              max_per_bogie INTEGER
            );

            CREATE TABLE IF NOT EXISTS defect_types (
              defect_code TEXT PRIMARY KEY,
              defect_name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS inspection_activities (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              activity_text TEXT NOT NULL,
              sequence_number INTEGER NOT NULL,
              activity_type TEXT NOT NULL,
              is_active INTEGER NOT NULL DEFAULT 1
            );

            CREATE TABLE IF NOT EXISTS inspectors (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              name TEXT NOT NULL,
              is_active INTEGER NOT NULL DEFAULT 1
            );

            CREATE INDEX IF NOT EXISTS idx_activities_seq
              ON inspection_activities(sequence_number);
            "#,
        )?;
        Ok(())
    }

    // ==========================================
    // spring_types
    // ==========================================

    /// 新增弹簧类型主数据
    ///
    /// coach_types 以 JSON 数组文本存储（与托管后端的数组列对齐）
    pub fn insert_spring_type(
        &self,
        spring_type: &str,
        coach_types: &[&str],
        max_per_bogie: Option<u32>,
    ) -> RepositoryResult<i64> {
        let coach_types_json = serde_json::to_string(coach_types)
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO spring_types (spring_type, coach_types, max_per_bogie) VALUES (?1, ?2, ?3)",
            params![spring_type, coach_types_json, max_per_bogie],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 按 id 排序返回全部弹簧类型
    pub fn list_spring_types(&self) -> RepositoryResult<Vec<SpringTypeDefinition>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, spring_type, coach_types, max_per_bogie FROM spring_types ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<u32>>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut result = Vec::with_capacity(rows.len());
        for (id, spring_type, coach_types_json, max_per_bogie) in rows {
            let coach_types: Vec<String> =
                serde_json::from_str(&coach_types_json).map_err(|e| {
                    RepositoryError::ValidationError(format!(
                        "spring_types.coach_types 非法 JSON (id={}): {}",
                        id, e
                    ))
                })?;
            result.push(SpringTypeDefinition {
                id,
                spring_type,
                coach_types,
                max_per_bogie,
            });
        }
        Ok(result)
    }

    // ==========================================
    // defect_types
    // ==========================================

    pub fn insert_defect_type(&self, defect_code: &str, defect_name: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO defect_types (defect_code, defect_name) VALUES (?1, ?2)",
            params![defect_code, defect_name],
        )?;
        Ok(())
    }

    /// 按 defect_code 排序返回全部缺陷类型
    pub fn list_defect_types(&self) -> RepositoryResult<Vec<DefectType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn
            .prepare("SELECT defect_code, defect_name FROM defect_types ORDER BY defect_code")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DefectType {
                    defect_code: row.get(0)?,
                    defect_name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // ==========================================
    // inspection_activities
    // ==========================================

    pub fn insert_activity(
        &self,
        activity_text: &str,
        sequence_number: i32,
        activity_type: ActivityKind,
        is_active: bool,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO inspection_activities (activity_text, sequence_number, activity_type, is_active) \
             VALUES (?1, ?2, ?3, ?4)",
            params![activity_text, sequence_number, activity_type.to_string(), is_active],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 按 sequence_number 排序返回全部检查活动
    pub fn list_activities(&self) -> RepositoryResult<Vec<InspectionActivity>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, activity_text, sequence_number, activity_type, is_active \
             FROM inspection_activities ORDER BY sequence_number",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i32>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, bool>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut result = Vec::with_capacity(rows.len());
        for (id, activity_text, sequence_number, kind_raw, is_active) in rows {
            let activity_type = match kind_raw.as_str() {
                "VISUAL_INSPECTION" => ActivityKind::VisualInspection,
                "MUST_DO" => ActivityKind::MustDo,
                other => {
                    return Err(RepositoryError::ValidationError(format!(
                        "inspection_activities.activity_type 非法值 (id={}): {}",
                        id, other
                    )))
                }
            };
            result.push(InspectionActivity {
                id,
                activity_text,
                sequence_number,
                activity_type,
                is_active,
            });
        }
        Ok(result)
    }

    // ==========================================
    // inspectors
    // ==========================================

    pub fn insert_inspector(&self, name: &str, is_active: bool) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO inspectors (name, is_active) VALUES (?1, ?2)",
            params![name, is_active],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 仅启用的检验员,按姓名排序
    pub fn list_active_inspectors(&self) -> RepositoryResult<Vec<Inspector>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, is_active FROM inspectors WHERE is_active = 1 ORDER BY name",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Inspector {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    is_active: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
