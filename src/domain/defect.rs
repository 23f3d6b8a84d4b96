// ==========================================
// 客车弹簧故障管理系统 - 缺陷领域模型
// ==========================================
// 职责: 故障记录 (spring_failures 行)、缺陷类型主数据、
//       报告用的缺陷观察记录与转向架分组条目
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// DefectType - 缺陷类型主数据
// ==========================================
// 来源: defect_types 表,按 defect_code 排序,会话内只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectType {
    pub defect_code: String, // 缺陷代码
    pub defect_name: String, // 缺陷显示名
}

/// 缺陷代码 → 显示名 索引
///
/// 未登记的代码回退为原始代码,从不报错。
#[derive(Debug, Clone, Default)]
pub struct DefectCodeIndex {
    names: HashMap<String, String>,
}

impl DefectCodeIndex {
    pub fn from_types(types: &[DefectType]) -> Self {
        Self {
            names: types
                .iter()
                .map(|t| (t.defect_code.clone(), t.defect_name.clone()))
                .collect(),
        }
    }

    /// 代码对应的显示名,缺失时原样返回代码
    pub fn display_for(&self, defect_code: &str) -> String {
        self.names
            .get(defect_code)
            .cloned()
            .unwrap_or_else(|| defect_code.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ==========================================
// SpringFailure - 故障记录 (存储行)
// ==========================================
// 对齐 spring_failures 表。可选字段建模为 Option,不用松散映射。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringFailure {
    pub id: i64,                                   // 主键
    pub coach_no: String,                          // 车号 (必填)
    pub coach_code: Option<String>,                // 客车代码
    pub coach_type: Option<String>,                // 客车类型 (VB / LHB)
    pub schedule: Option<String>,                  // 检修规程
    pub division: Option<String>,                  // 所属路局/分部
    pub bogie_number: Option<String>,              // 转向架号 (自由文本)
    pub receipt_date: Option<NaiveDate>,           // 到达日期
    pub secondary_suspension_type: Option<String>, // 二系悬挂类型
    pub type_of_spring: Option<String>,            // 弹簧部位
    pub colour_of_spring: Option<String>,          // 弹簧颜色标记
    pub type_of_failure: Option<String>,           // 缺陷代码
    pub location: Option<String>,                  // 弹簧上的缺陷位置
    pub location_in_bogie: Option<String>,         // 转向架内位置 (弹簧号)
    pub remarks: Option<String>,                   // 备注
    pub mfg: Option<String>,                       // 制造厂
    pub defect_count: i64,                         // 同转向架同缺陷重复计数
}

/// 新增故障记录的输入 (id 由存储分配)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSpringFailure {
    pub coach_no: String,
    pub coach_code: Option<String>,
    pub coach_type: Option<String>,
    pub schedule: Option<String>,
    pub division: Option<String>,
    pub bogie_number: Option<String>,
    pub receipt_date: Option<NaiveDate>,
    pub secondary_suspension_type: Option<String>,
    pub type_of_spring: Option<String>,
    pub colour_of_spring: Option<String>,
    pub type_of_failure: Option<String>,
    pub location: Option<String>,
    pub location_in_bogie: Option<String>,
    pub remarks: Option<String>,
    pub mfg: Option<String>,
    pub defect_count: i64,
}

// ==========================================
// DefectRecord - 报告用缺陷观察记录
// ==========================================
// 由故障行投影而来,只携带报告需要的字段。对本核心只读。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectRecord {
    pub spring_type: String,          // 弹簧部位
    pub spring_number: String,        // 转向架内位置 (弹簧号)
    pub defect_code: String,          // 缺陷代码
    pub location: String,             // 弹簧上的缺陷位置
    pub bogie_number: Option<String>, // 转向架号 (缺省归转向架 1)
}

impl DefectRecord {
    /// 从故障行投影
    ///
    /// 字段映射: type_of_spring → spring_type,
    /// location_in_bogie → spring_number, type_of_failure → defect_code
    pub fn from_failure(failure: &SpringFailure) -> Self {
        Self {
            spring_type: failure.type_of_spring.clone().unwrap_or_default(),
            spring_number: failure.location_in_bogie.clone().unwrap_or_default(),
            defect_code: failure.type_of_failure.clone().unwrap_or_default(),
            location: failure.location.clone().unwrap_or_default(),
            bogie_number: failure.bogie_number.clone(),
        }
    }
}

// ==========================================
// BogieDefect - 转向架分组后的缺陷条目
// ==========================================
// 缺陷代码已换算为显示名,可直接进入报告表格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BogieDefect {
    pub spring_type: String,
    pub spring_number: String,
    pub defect_display: String,
    pub location: String,
}
