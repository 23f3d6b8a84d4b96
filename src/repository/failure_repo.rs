// ==========================================
// 客车弹簧故障管理系统 - 故障记录仓储
// ==========================================
// 职责: 管理 spring_failures 表 (新增/查询/更新/删除)
// 说明: 报告核心对故障行只读;写入路径只服务录入界面
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::defect::{NewSpringFailure, SpringFailure};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

pub struct SpringFailureRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SpringFailureRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_table()?;
        Ok(repo)
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保表存在（如果不存在则创建）
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS spring_failures (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              coach_no TEXT NOT NULL,
              coach_code TEXT,
              coach_type TEXT,
              schedule TEXT,
              division TEXT,
              bogie_number TEXT,
              receipt_date TEXT,
              secondary_suspension_type TEXT,
              type_of_spring TEXT,
              colour_of_spring TEXT,
              type_of_failure TEXT,
              location TEXT,
              location_in_bogie TEXT,
              remarks TEXT,
              mfg TEXT,
              defect_count INTEGER NOT NULL DEFAULT 1
            );

            CREATE INDEX IF NOT EXISTS idx_spring_failures_coach
              ON spring_failures(coach_no);
            "#,
        )?;
        Ok(())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<SpringFailure> {
        Ok(SpringFailure {
            id: row.get(0)?,
            coach_no: row.get(1)?,
            coach_code: row.get(2)?,
            coach_type: row.get(3)?,
            schedule: row.get(4)?,
            division: row.get(5)?,
            bogie_number: row.get(6)?,
            receipt_date: row.get(7)?,
            secondary_suspension_type: row.get(8)?,
            type_of_spring: row.get(9)?,
            colour_of_spring: row.get(10)?,
            type_of_failure: row.get(11)?,
            location: row.get(12)?,
            location_in_bogie: row.get(13)?,
            remarks: row.get(14)?,
            mfg: row.get(15)?,
            defect_count: row.get(16)?,
        })
    }

    const SELECT_COLUMNS: &'static str = "id, coach_no, coach_code, coach_type, schedule, division, \
        bogie_number, receipt_date, secondary_suspension_type, type_of_spring, colour_of_spring, \
        type_of_failure, location, location_in_bogie, remarks, mfg, defect_count";

    /// 新增故障记录,返回分配的 id
    pub fn insert(&self, failure: &NewSpringFailure) -> RepositoryResult<i64> {
        if failure.coach_no.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "coach_no 不能为空".to_string(),
            ));
        }
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO spring_failures (
              coach_no, coach_code, coach_type, schedule, division, bogie_number,
              receipt_date, secondary_suspension_type, type_of_spring, colour_of_spring,
              type_of_failure, location, location_in_bogie, remarks, mfg, defect_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                failure.coach_no.trim(),
                failure.coach_code,
                failure.coach_type,
                failure.schedule,
                failure.division,
                failure.bogie_number,
                failure.receipt_date,
                failure.secondary_suspension_type,
                failure.type_of_spring,
                failure.colour_of_spring,
                failure.type_of_failure,
                failure.location,
                failure.location_in_bogie,
                failure.remarks,
                failure.mfg,
                failure.defect_count,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 全部故障记录,按 id 排序
    pub fn list_all(&self) -> RepositoryResult<Vec<SpringFailure>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM spring_failures ORDER BY id",
            Self::SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 指定车号的故障记录,按 id 排序
    pub fn list_by_coach(&self, coach_no: &str) -> RepositoryResult<Vec<SpringFailure>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM spring_failures WHERE coach_no = ?1 ORDER BY id",
            Self::SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![coach_no], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 出现过故障记录的车号全集 (去重排序)
    pub fn list_coach_numbers(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT coach_no FROM spring_failures ORDER BY coach_no")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 按 id 更新整行 (id 字段定位,其余字段覆盖)
    pub fn update(&self, failure: &SpringFailure) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            r#"
            UPDATE spring_failures SET
              coach_no = ?2, coach_code = ?3, coach_type = ?4, schedule = ?5,
              division = ?6, bogie_number = ?7, receipt_date = ?8,
              secondary_suspension_type = ?9, type_of_spring = ?10,
              colour_of_spring = ?11, type_of_failure = ?12, location = ?13,
              location_in_bogie = ?14, remarks = ?15, mfg = ?16, defect_count = ?17
            WHERE id = ?1
            "#,
            params![
                failure.id,
                failure.coach_no,
                failure.coach_code,
                failure.coach_type,
                failure.schedule,
                failure.division,
                failure.bogie_number,
                failure.receipt_date,
                failure.secondary_suspension_type,
                failure.type_of_spring,
                failure.colour_of_spring,
                failure.type_of_failure,
                failure.location,
                failure.location_in_bogie,
                failure.remarks,
                failure.mfg,
                failure.defect_count,
            ],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "SpringFailure".to_string(),
                id: failure.id.to_string(),
            });
        }
        Ok(())
    }

    /// 按 id 删除
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute("DELETE FROM spring_failures WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "SpringFailure".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
