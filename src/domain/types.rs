// ==========================================
// 客车弹簧故障管理系统 - 领域类型定义
// ==========================================
// 职责: 检查活动类型、检查单元格状态、签名角色等封闭枚举
// 红线: 单元格状态是封闭枚举,不是自由文本
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 检查活动类型 (Activity Kind)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    VisualInspection, // 目视检查
    MustDo,           // 必做项目
}

impl ActivityKind {
    /// 该类型单元格的默认状态
    ///
    /// 目视检查默认 Satisfactory, 必做项目默认 Done
    pub fn default_status(&self) -> CellStatus {
        match self {
            ActivityKind::VisualInspection => CellStatus::Satisfactory,
            ActivityKind::MustDo => CellStatus::Done,
        }
    }

    /// 该类型允许的非空状态全集
    pub fn allowed_statuses(&self) -> &'static [CellStatus] {
        match self {
            ActivityKind::VisualInspection => {
                &[CellStatus::Satisfactory, CellStatus::Unsatisfactory]
            }
            ActivityKind::MustDo => &[CellStatus::Done, CellStatus::NotDone],
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::VisualInspection => write!(f, "VISUAL_INSPECTION"),
            ActivityKind::MustDo => write!(f, "MUST_DO"),
        }
    }
}

// ==========================================
// 检查单元格状态 (Cell Status)
// ==========================================
// 目视检查: {Satisfactory, Unsatisfactory, 空}
// 必做项目: {Done, NotDone, 空}
// 空单元格在报告定稿时回退到类型默认值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellStatus {
    #[serde(rename = "")]
    Empty, // 未填写
    Satisfactory,
    Unsatisfactory,
    Done,
    #[serde(rename = "Not Done")]
    NotDone,
}

impl CellStatus {
    /// 定稿合并规则: 空单元格回退到类型默认值,非空值原样保留
    pub fn finalize(self, kind: ActivityKind) -> CellStatus {
        match self {
            CellStatus::Empty => kind.default_status(),
            other => other,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellStatus::Empty)
    }
}

impl Default for CellStatus {
    fn default() -> Self {
        CellStatus::Empty
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellStatus::Empty => write!(f, ""),
            CellStatus::Satisfactory => write!(f, "Satisfactory"),
            CellStatus::Unsatisfactory => write!(f, "Unsatisfactory"),
            CellStatus::Done => write!(f, "Done"),
            CellStatus::NotDone => write!(f, "Not Done"),
        }
    }
}

// ==========================================
// 签名角色 (Signature Role)
// ==========================================
// 报告固定两个签名位: 弹簧车间 / 验收检查
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureRole {
    SpringShop, // SSE SPRING SHOP
    Inspection, // SSE / INSPECTION
}

impl SignatureRole {
    /// 报告中的角色标题 (文档固定文案)
    pub fn heading(&self) -> &'static str {
        match self {
            SignatureRole::SpringShop => "Prepared By (SSE SPRING SHOP)",
            SignatureRole::Inspection => "Checked By (SSE / INSPECTION)",
        }
    }
}

impl fmt::Display for SignatureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureRole::SpringShop => write!(f, "SPRING_SHOP"),
            SignatureRole::Inspection => write!(f, "INSPECTION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_merge_is_exhaustive() {
        // 空 → 类型默认
        assert_eq!(
            CellStatus::Empty.finalize(ActivityKind::VisualInspection),
            CellStatus::Satisfactory
        );
        assert_eq!(
            CellStatus::Empty.finalize(ActivityKind::MustDo),
            CellStatus::Done
        );

        // 非空原样保留
        for kind in [ActivityKind::VisualInspection, ActivityKind::MustDo] {
            for status in kind.allowed_statuses() {
                assert_eq!(status.finalize(kind), *status);
            }
        }
    }

    #[test]
    fn test_cell_status_display_matches_document_literals() {
        assert_eq!(CellStatus::NotDone.to_string(), "Not Done");
        assert_eq!(CellStatus::Empty.to_string(), "");
    }
}
