// ==========================================
// 客车弹簧故障管理系统 - 报告领域模型
// ==========================================
// 职责: 检验员主数据、签名元数据、组装完成的检修报告
// 红线: 报告组装完成后不再修改,渲染后即丢弃,从不落库
// ==========================================

use crate::domain::defect::DefectRecord;
use crate::domain::inspection::InspectionRow;
use crate::domain::spring::SpringConfiguration;
use serde::{Deserialize, Serialize};

// ==========================================
// Inspector - 检验员主数据
// ==========================================
// 来源: inspectors 表,仅启用者,按姓名排序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspector {
    pub id: i64,         // 主键
    pub name: String,    // 姓名
    pub is_active: bool, // 启用标志
}

// ==========================================
// Signature - 签名元数据
// ==========================================
// 日期在进入报告前已经过归一化 (engine::dates)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: Option<String>, // 签名人 (缺省渲染横线占位)
    pub date: Option<String>, // 签名日期 (缺省渲染横线占位)
}

/// 两个签名位的原始图片字节 (PNG / JPEG)
///
/// 解码失败只丢弃对应图片槽,绝不中断整份文档的组装。
#[derive(Debug, Clone, Default)]
pub struct SignatureImages {
    pub spring_shop: Option<Vec<u8>>,
    pub inspection: Option<Vec<u8>>,
}

impl SignatureImages {
    pub fn is_empty(&self) -> bool {
        self.spring_shop.is_none() && self.inspection.is_none()
    }
}

// ==========================================
// InspectionReport - 组装完成的检修报告
// ==========================================
// 聚合: 车辆标识块 + 弹簧配置 + 4 份检查清单 + 分转向架缺陷 + 签名。
// 缺陷按原始记录携带,显示名换算发生在分组与渲染处。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionReport {
    // ===== 车辆标识块 =====
    pub coach_number: String,        // 车号
    pub coach_code: String,          // 客车代码
    pub coach_type: String,          // 客车类型
    pub secondary_type: String,      // 二系悬挂类型 (显示原文,未归一化)
    pub bogie1_number: String,       // 转向架 1 编号 (缺省 "Bogie 1")
    pub bogie2_number: String,       // 转向架 2 编号 (可为空)
    pub date_of_receipt: String,     // 到达日期 (ISO 串,渲染只取日期部分)
    pub inspector_name: String,      // 检验员姓名

    // ===== 弹簧配置 =====
    pub spring_counts: SpringConfiguration,

    // ===== 检查清单 (定稿后的行) =====
    pub bogie1_inspections: Vec<InspectionRow>, // 目视检查 - 转向架 1
    pub bogie2_inspections: Vec<InspectionRow>, // 目视检查 - 转向架 2
    pub bogie1_must_do: Vec<InspectionRow>,     // 必做项目 - 转向架 1
    pub bogie2_must_do: Vec<InspectionRow>,     // 必做项目 - 转向架 2

    // ===== 分转向架缺陷 =====
    pub bogie1_defects: Vec<DefectRecord>,
    pub bogie2_defects: Vec<DefectRecord>,

    // ===== 签名 =====
    pub sig_shop: Signature,
    pub sig_inspection: Signature,
}

impl InspectionReport {
    /// 缺陷总数 (两个转向架合计)
    pub fn total_defects(&self) -> usize {
        self.bogie1_defects.len() + self.bogie2_defects.len()
    }

    /// 渲染用的到达日期 (仅日期部分,前 10 个字符)
    pub fn receipt_date_display(&self) -> &str {
        self.date_of_receipt
            .get(..10)
            .unwrap_or(&self.date_of_receipt)
    }
}
