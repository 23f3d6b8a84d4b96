// ==========================================
// 客车弹簧故障管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供表现层调用
// ==========================================

pub mod error;
pub mod dashboard_api;
pub mod failure_api;
pub mod report_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use dashboard_api::{CountEntry, CrosstabEntry, DashboardApi, DashboardSummary};
pub use failure_api::FailureApi;
pub use report_api::{GeneratedReport, ReportApi, ReportRequest};
