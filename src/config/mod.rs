// ==========================================
// 客车弹簧故障管理系统 - 配置层
// ==========================================
// 职责: 数据库路径解析等运行配置
// 优先级: 环境变量 > 用户数据目录 > 当前目录回退
// ==========================================

use std::path::PathBuf;

/// 运行配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite 数据库文件路径
    pub db_path: String,
}

impl AppConfig {
    /// 解析运行配置
    pub fn resolve() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }

    /// 指定数据库路径的配置 (CLI 显式传参)
    pub fn with_db_path(db_path: &str) -> Self {
        Self {
            db_path: db_path.to_string(),
        }
    }
}

/// 解析默认数据库路径
///
/// 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
pub fn default_db_path() -> String {
    if let Ok(path) = std::env::var("COACH_SPRING_IMS_DB") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值,后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./coach_spring_ims.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("coach-spring-ims");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("coach_spring_ims.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path_not_empty() {
        let path = default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }
}
