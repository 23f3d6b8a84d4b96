// ==========================================
// 客车弹簧故障管理系统 - 缺陷分组引擎
// ==========================================
// 职责: 按转向架划分缺陷记录,换算缺陷显示名
// 红线: 划分全覆盖且互斥;转向架号缺失/非 "2" 一律归转向架 1,
//       这是有意偏向转向架 1 的默认规则,不报错不"修正"
// ==========================================

use crate::domain::defect::{BogieDefect, DefectCodeIndex, DefectRecord};
use tracing::instrument;

// ==========================================
// DefectAggregator - 缺陷分组引擎
// ==========================================
pub struct DefectAggregator {}

impl DefectAggregator {
    /// 创建新的缺陷分组引擎
    pub fn new() -> Self {
        Self {}
    }

    /// 按转向架划分缺陷记录
    ///
    /// 规则: bogie_number 经 trim 后字面等于 "2" → 转向架 2,
    /// 其余（含空/缺失）→ 转向架 1。
    /// 保证 len(b1) + len(b2) == len(输入)。
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn partition(
        &self,
        records: Vec<DefectRecord>,
    ) -> (Vec<DefectRecord>, Vec<DefectRecord>) {
        let mut bogie1 = Vec::new();
        let mut bogie2 = Vec::new();
        for record in records {
            let is_bogie2 = record
                .bogie_number
                .as_deref()
                .map(|b| b.trim() == "2")
                .unwrap_or(false);
            if is_bogie2 {
                bogie2.push(record);
            } else {
                bogie1.push(record);
            }
        }
        (bogie1, bogie2)
    }

    /// 缺陷记录换算为报告条目 (代码 → 显示名,未登记代码原样保留)
    pub fn display_rows(
        &self,
        records: &[DefectRecord],
        index: &DefectCodeIndex,
    ) -> Vec<BogieDefect> {
        records
            .iter()
            .map(|r| BogieDefect {
                spring_type: r.spring_type.clone(),
                spring_number: r.spring_number.clone(),
                defect_display: index.display_for(&r.defect_code),
                location: r.location.clone(),
            })
            .collect()
    }

    /// 划分 + 显示名换算一步到位 (对外接口形态)
    pub fn partition_display(
        &self,
        records: Vec<DefectRecord>,
        index: &DefectCodeIndex,
    ) -> (Vec<BogieDefect>, Vec<BogieDefect>) {
        let (bogie1, bogie2) = self.partition(records);
        (
            self.display_rows(&bogie1, index),
            self.display_rows(&bogie2, index),
        )
    }
}

impl Default for DefectAggregator {
    fn default() -> Self {
        Self::new()
    }
}
