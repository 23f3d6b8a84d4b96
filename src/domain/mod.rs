// ==========================================
// 客车弹簧故障管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod defect;
pub mod inspection;
pub mod report;
pub mod spring;
pub mod types;

// 重导出核心类型
pub use defect::{
    BogieDefect, DefectCodeIndex, DefectRecord, DefectType, NewSpringFailure, SpringFailure,
};
pub use inspection::{AnswerCell, InspectionActivity, InspectionRow};
pub use report::{InspectionReport, Inspector, Signature, SignatureImages};
pub use spring::{position_key, SpringConfiguration, SpringCount, SpringTypeDefinition};
pub use types::{ActivityKind, CellStatus, SignatureRole};
