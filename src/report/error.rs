// ==========================================
// 客车弹簧故障管理系统 - 报告渲染错误类型
// ==========================================
// 工具: thiserror 派生宏
// 传播策略: 签名图片解码失败在内部吸收 (图片槽置空),
//           其余失败整体上抛: 要么完整文档,要么无文档
// ==========================================

use thiserror::Error;

/// 报告渲染错误类型
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF 文档生成失败: {0}")]
    Pdf(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<printpdf::Error> for RenderError {
    fn from(err: printpdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// Result 类型别名
pub type RenderResult<T> = Result<T, RenderError>;
