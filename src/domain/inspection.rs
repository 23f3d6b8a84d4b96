// ==========================================
// 客车弹簧故障管理系统 - 检查领域模型
// ==========================================
// 职责: 检查活动主数据 + 检查清单行
// 红线: 答案键集合与弹簧配置键集合必须完全一致 (同一归一化规则)
// ==========================================

use crate::domain::spring::SpringConfiguration;
use crate::domain::types::{ActivityKind, CellStatus};
use serde::{Deserialize, Serialize};

// ==========================================
// InspectionActivity - 检查活动主数据
// ==========================================
// 来源: inspection_activities 表,按 sequence_number 排序,会话内只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionActivity {
    pub id: i64,                  // 主键
    pub activity_text: String,    // 活动描述
    pub sequence_number: i32,     // 排序号
    pub activity_type: ActivityKind, // 活动类型 (目视 / 必做)
    pub is_active: bool,          // 启用标志
}

// ==========================================
// InspectionRow - 检查清单行
// ==========================================
// 一行对应一个检查活动,每个弹簧部位一个答案单元格。
// 可变: 报告定稿前允许人工编辑答案与备注,构建器只提供默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRow {
    pub activity_id: Option<i64>,  // 关联活动 id (人工新增行可为空)
    pub activity_text: String,     // 活动描述
    pub remarks: String,           // 备注 (默认为空)
    pub answers: Vec<AnswerCell>,  // 按配置顺序的答案单元格
}

/// 一个答案单元格: 部位查找键 + 状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCell {
    pub position_key: String,
    pub status: CellStatus,
}

impl InspectionRow {
    /// 按部位查找键读取答案,缺失视为空
    pub fn answer_for(&self, position_key: &str) -> CellStatus {
        self.answers
            .iter()
            .find(|c| c.position_key == position_key)
            .map(|c| c.status)
            .unwrap_or(CellStatus::Empty)
    }

    /// 写入答案; 键不存在时追加 (人工加列场景)
    pub fn set_answer(&mut self, position_key: &str, status: CellStatus) {
        if let Some(cell) = self
            .answers
            .iter_mut()
            .find(|c| c.position_key == position_key)
        {
            cell.status = status;
        } else {
            self.answers.push(AnswerCell {
                position_key: position_key.to_string(),
                status,
            });
        }
    }

    /// 答案键集合是否与给定配置一致 (同序)
    pub fn matches_configuration(&self, config: &SpringConfiguration) -> bool {
        let keys = config.position_keys();
        self.answers.len() == keys.len()
            && self
                .answers
                .iter()
                .zip(keys.iter())
                .all(|(cell, key)| &cell.position_key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_for_missing_key_is_empty() {
        let row = InspectionRow {
            activity_id: Some(1),
            activity_text: "Check spring seating".to_string(),
            remarks: String::new(),
            answers: vec![AnswerCell {
                position_key: "primary".to_string(),
                status: CellStatus::Satisfactory,
            }],
        };

        assert_eq!(row.answer_for("primary"), CellStatus::Satisfactory);
        assert_eq!(row.answer_for("secondaryouter"), CellStatus::Empty);
    }

    #[test]
    fn test_set_answer_appends_unknown_key() {
        let mut row = InspectionRow {
            activity_id: None,
            activity_text: "Manual row".to_string(),
            remarks: String::new(),
            answers: Vec::new(),
        };
        row.set_answer("primary", CellStatus::Unsatisfactory);

        assert_eq!(row.answer_for("primary"), CellStatus::Unsatisfactory);
    }
}
