// ==========================================
// 客车弹簧故障管理系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换下层错误为用户可见的错误消息
// 工具: thiserror 派生宏
// ==========================================

use crate::report::error::RenderError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 业务规则错误 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ===== 下层错误透传 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
