// ==========================================
// 客车弹簧故障管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + printpdf
// 系统定位: 弹簧故障记录 + 汇总统计 + 检修报告生成
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 报告层 - PDF 文档组装
pub mod report;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ActivityKind, CellStatus, SignatureRole};

// 领域实体
pub use domain::{
    BogieDefect, DefectCodeIndex, DefectRecord, DefectType, InspectionActivity, InspectionReport,
    InspectionRow, Inspector, NewSpringFailure, Signature, SignatureImages, SpringConfiguration,
    SpringFailure, SpringTypeDefinition,
};

// 引擎
pub use engine::{
    normalize_signature_date, ChecklistBuilder, DefectAggregator, MasterDataSnapshot,
    SpringConfigResolver,
};

// 报告
pub use report::ReportRenderer;

// API
pub use api::{DashboardApi, FailureApi, ReportApi, ReportRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "客车弹簧故障管理系统";
