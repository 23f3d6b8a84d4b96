// ==========================================
// 客车弹簧故障管理系统 - 检查清单构建引擎
// ==========================================
// 职责: 为检查活动生成默认答案行;报告定稿时执行空值合并
// 红线: 构建器只提供默认值,不校验人工编辑的内容
// ==========================================

use crate::domain::inspection::{AnswerCell, InspectionActivity, InspectionRow};
use crate::domain::spring::{position_key, SpringConfiguration};
use crate::domain::types::{ActivityKind, CellStatus};
use tracing::instrument;

// ==========================================
// ChecklistBuilder - 检查清单构建引擎
// ==========================================
pub struct ChecklistBuilder {}

impl ChecklistBuilder {
    /// 创建新的检查清单构建引擎
    pub fn new() -> Self {
        Self {}
    }

    /// 生成默认检查行: 每个活动一行,每个弹簧部位一个单元格
    ///
    /// 单元格全部初始化为 default_status,备注为空。
    /// 部位查找键由显示名经统一归一化得到 (domain::spring::position_key)。
    #[instrument(skip(self, activities, config), fields(activities = activities.len(), positions = config.len()))]
    pub fn build_default(
        &self,
        activities: &[InspectionActivity],
        config: &SpringConfiguration,
        default_status: CellStatus,
    ) -> Vec<InspectionRow> {
        activities
            .iter()
            .map(|act| InspectionRow {
                activity_id: Some(act.id),
                activity_text: act.activity_text.clone(),
                remarks: String::new(),
                answers: config
                    .iter()
                    .map(|entry| AnswerCell {
                        position_key: position_key(&entry.spring_type),
                        status: default_status,
                    })
                    .collect(),
            })
            .collect()
    }

    /// 按活动类型的默认状态生成默认检查行
    pub fn build_default_for_kind(
        &self,
        activities: &[InspectionActivity],
        config: &SpringConfiguration,
        kind: ActivityKind,
    ) -> Vec<InspectionRow> {
        self.build_default(activities, config, kind.default_status())
    }

    /// 定稿合并: 空单元格回退到类型默认值,非空编辑值原样保留
    ///
    /// 在报告生成时对人工编辑后的行执行;备注不参与合并。
    pub fn finalize_rows(&self, rows: &mut [InspectionRow], kind: ActivityKind) {
        for row in rows.iter_mut() {
            for cell in row.answers.iter_mut() {
                cell.status = cell.status.finalize(kind);
            }
        }
    }
}

impl Default for ChecklistBuilder {
    fn default() -> Self {
        Self::new()
    }
}
