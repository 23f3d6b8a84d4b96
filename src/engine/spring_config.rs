// ==========================================
// 客车弹簧故障管理系统 - 弹簧配置解析引擎
// ==========================================
// 职责: 由客车类型 + 二系悬挂类型推导期望的弹簧部位集合
// 输入: coach_type + secondary_type + spring_types 主数据
// 输出: SpringConfiguration (插入有序)
// 红线: AIR/COIL 子串规则按字面保留,不做"修正"
// ==========================================

use crate::domain::spring::{SpringConfiguration, SpringTypeDefinition};
use tracing::instrument;

/// COIL 规则强制补齐的二系部位及数量
const COIL_SECONDARY_POSITIONS: [(&str, u32); 2] =
    [("Secondary Outer", 2), ("Secondary Inner", 2)];

// ==========================================
// SpringConfigResolver - 弹簧配置解析引擎
// ==========================================
pub struct SpringConfigResolver {}

impl SpringConfigResolver {
    /// 创建新的弹簧配置解析引擎
    pub fn new() -> Self {
        Self {}
    }

    /// 解析弹簧配置
    ///
    /// 规则（按主数据表顺序执行）:
    /// 1) 二系悬挂类型仅为比较目的做 trim + 大写归一化,显示值不受影响
    /// 2) 主数据中适用于该客车类型的定义逐条加入;
    ///    若归一化二系含 "AIR" 且部位名含 "secondary"（忽略大小写）则跳过
    ///    （空气弹簧客车没有二系螺旋弹簧）
    /// 3) 若归一化二系含 "COIL": 幂等补齐 Secondary Outer / Secondary Inner 各 2,
    ///    已有显式值不覆盖
    ///
    /// 边界: 未知客车类型得到空配置,不报错。
    /// 结果顺序确定,直接驱动文档列顺序。
    #[instrument(skip(self, spring_types), fields(count = spring_types.len()))]
    pub fn resolve(
        &self,
        coach_type: &str,
        secondary_type: &str,
        spring_types: &[SpringTypeDefinition],
    ) -> SpringConfiguration {
        let secondary_normalized = secondary_type.trim().to_uppercase();
        let is_air = secondary_normalized.contains("AIR");

        let mut config = SpringConfiguration::new();

        for definition in spring_types {
            if !definition.applies_to(coach_type) {
                continue;
            }

            if is_air && definition.spring_type.to_lowercase().contains("secondary") {
                continue;
            }

            config.insert(&definition.spring_type, definition.per_bogie());
        }

        if secondary_normalized.contains("COIL") {
            for (name, qty) in COIL_SECONDARY_POSITIONS {
                config.insert_if_absent(name, qty);
            }
        }

        config
    }

    /// 由客车代码推断客车类型 (代码含 VB → VB; 含 LHB/LW → LHB; 其余按 LHB)
    ///
    /// 用于故障行缺失 coach_type 时的报告兜底。
    pub fn infer_coach_type_from_code(&self, coach_code: &str) -> &'static str {
        let code = coach_code.trim().to_uppercase();
        if code.contains("VB") {
            "VB"
        } else {
            "LHB"
        }
    }
}

impl Default for SpringConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}
