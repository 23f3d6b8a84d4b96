// ==========================================
// 客车弹簧故障管理系统 - 报告文档层
// ==========================================
// 职责: 把组装完成的检修报告渲染为可打印的 PDF 文档
// 红线: 本层不落盘;输出是内存字节,保存动作属于调用方
// ==========================================

pub mod error;
pub mod layout;
pub mod pdf;

// 重导出核心类型
pub use error::{RenderError, RenderResult};
pub use pdf::ReportRenderer;
