// ==========================================
// 客车弹簧故障管理系统 - 弹簧领域模型
// ==========================================
// 职责: 弹簧类型主数据 + 弹簧配置 (部位 → 每转向架数量)
// 红线: 弹簧配置的插入顺序决定报告列顺序,不得使用无序映射
// ==========================================

use serde::{Deserialize, Serialize};

/// 未指定 max_per_bogie 时的默认每转向架数量
pub const DEFAULT_PER_BOGIE: u32 = 4;

/// 部位名称 → 查找键 的统一归一化规则
///
/// 小写 + 去除内部空格。解析器输出、检查行答案、报告渲染
/// 三处必须使用同一个函数,否则列与答案会错位。
pub fn position_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

// ==========================================
// SpringTypeDefinition - 弹簧类型主数据
// ==========================================
// 来源: spring_types 表,按 id 排序加载,会话内只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringTypeDefinition {
    pub id: i64,                       // 主键
    pub spring_type: String,           // 弹簧部位显示名 (如 "Primary", "Secondary Outer")
    pub coach_types: Vec<String>,      // 适用客车类型集合 (如 ["VB", "LHB"])
    pub max_per_bogie: Option<u32>,    // 每转向架最大数量 (缺省按 4)
}

impl SpringTypeDefinition {
    pub fn applies_to(&self, coach_type: &str) -> bool {
        self.coach_types.iter().any(|c| c == coach_type)
    }

    pub fn per_bogie(&self) -> u32 {
        self.max_per_bogie.unwrap_or(DEFAULT_PER_BOGIE)
    }
}

// ==========================================
// SpringConfiguration - 弹簧配置
// ==========================================
// 部位名 → 每转向架数量 的插入有序映射。
// 每次报告请求重新计算,从不落库。
//
// 语义对齐普通字典: 重复插入同名部位只覆盖数量,
// 不改变该部位原有的插入位置。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpringConfiguration {
    entries: Vec<SpringCount>,
}

/// 配置中的一项: 部位名 + 每转向架数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringCount {
    pub spring_type: String,
    pub per_bogie: u32,
}

impl SpringConfiguration {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 插入或覆盖 (保持原插入位置)
    pub fn insert(&mut self, spring_type: &str, per_bogie: u32) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.spring_type == spring_type)
        {
            existing.per_bogie = per_bogie;
        } else {
            self.entries.push(SpringCount {
                spring_type: spring_type.to_string(),
                per_bogie,
            });
        }
    }

    /// 仅在部位不存在时插入 (幂等,不覆盖已有显式值)
    pub fn insert_if_absent(&mut self, spring_type: &str, per_bogie: u32) {
        if !self.contains(spring_type) {
            self.entries.push(SpringCount {
                spring_type: spring_type.to_string(),
                per_bogie,
            });
        }
    }

    pub fn contains(&self, spring_type: &str) -> bool {
        self.entries.iter().any(|e| e.spring_type == spring_type)
    }

    pub fn get(&self, spring_type: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.spring_type == spring_type)
            .map(|e| e.per_bogie)
    }

    /// 按插入顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = &SpringCount> {
        self.entries.iter()
    }

    /// 按插入顺序返回全部部位显示名
    pub fn position_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.spring_type.as_str()).collect()
    }

    /// 按插入顺序返回全部查找键 (归一化后)
    pub fn position_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| position_key(&e.spring_type))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_key_normalization() {
        assert_eq!(position_key("Secondary Outer"), "secondaryouter");
        assert_eq!(position_key("Primary"), "primary");
    }

    #[test]
    fn test_insert_overwrites_value_but_keeps_order() {
        let mut config = SpringConfiguration::new();
        config.insert("Primary", 4);
        config.insert("Secondary Outer", 2);
        config.insert("Primary", 8);

        assert_eq!(config.position_names(), vec!["Primary", "Secondary Outer"]);
        assert_eq!(config.get("Primary"), Some(8));
    }

    #[test]
    fn test_insert_if_absent_is_idempotent() {
        let mut config = SpringConfiguration::new();
        config.insert("Secondary Outer", 4);
        config.insert_if_absent("Secondary Outer", 2);
        config.insert_if_absent("Secondary Inner", 2);

        assert_eq!(config.get("Secondary Outer"), Some(4));
        assert_eq!(config.get("Secondary Inner"), Some(2));
    }
}
