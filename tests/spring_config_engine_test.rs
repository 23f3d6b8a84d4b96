// ==========================================
// SpringConfigResolver 引擎测试
// ==========================================
// 测试目标: 验证弹簧配置解析规则
// 覆盖范围: AIR 排除 / COIL 补齐 / 未知车型 / 幂等与顺序
// ==========================================

use coach_spring_ims::domain::SpringTypeDefinition;
use coach_spring_ims::engine::SpringConfigResolver;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建测试用的弹簧类型定义
fn definition(id: i64, name: &str, coach_types: &[&str], max: Option<u32>) -> SpringTypeDefinition {
    SpringTypeDefinition {
        id,
        spring_type: name.to_string(),
        coach_types: coach_types.iter().map(|c| c.to_string()).collect(),
        max_per_bogie: max,
    }
}

fn master_vb() -> Vec<SpringTypeDefinition> {
    vec![
        definition(1, "Primary", &["VB"], Some(4)),
        definition(2, "Secondary Outer", &["VB"], Some(2)),
        definition(3, "Secondary Inner", &["VB"], Some(2)),
        definition(4, "Axle Box", &["LHB"], Some(4)),
    ]
}

// ==========================================
// 测试用例 1: AIR 规则排除二系部位
// ==========================================

#[test]
fn test_air_secondary_excludes_secondary_positions() {
    let resolver = SpringConfigResolver::new();
    let master = vec![
        definition(1, "Primary", &["VB"], Some(4)),
        definition(2, "Secondary Outer", &["VB"], Some(2)),
    ];

    let config = resolver.resolve("VB", "Air Spring", &master);

    assert_eq!(config.position_names(), vec!["Primary"]);
    assert_eq!(config.get("Primary"), Some(4));
    for name in config.position_names() {
        assert!(!name.to_lowercase().contains("secondary"));
    }
}

// ==========================================
// 测试用例 2: COIL 规则幂等补齐
// ==========================================

#[test]
fn test_coil_secondary_forces_secondary_positions_even_with_empty_master() {
    let resolver = SpringConfigResolver::new();

    let config = resolver.resolve("VB", "coil spring", &[]);

    assert_eq!(config.get("Secondary Outer"), Some(2));
    assert_eq!(config.get("Secondary Inner"), Some(2));
    assert_eq!(config.len(), 2);
}

#[test]
fn test_coil_rule_does_not_overwrite_explicit_master_value() {
    let resolver = SpringConfigResolver::new();
    let master = vec![definition(1, "Secondary Outer", &["VB"], Some(6))];

    let config = resolver.resolve("VB", "Coil Spring", &master);

    // 主数据显式值保留,只补缺失的 Secondary Inner
    assert_eq!(config.get("Secondary Outer"), Some(6));
    assert_eq!(config.get("Secondary Inner"), Some(2));
}

// ==========================================
// 测试用例 3: 未知车型 → 空配置
// ==========================================

#[test]
fn test_unknown_coach_type_yields_empty_configuration() {
    let resolver = SpringConfigResolver::new();

    let config = resolver.resolve("EMU", "Air Spring", &master_vb());

    assert!(config.is_empty());
}

// ==========================================
// 测试用例 4: 确定性与幂等
// ==========================================

#[test]
fn test_resolve_is_idempotent_and_order_stable() {
    let resolver = SpringConfigResolver::new();
    let master = master_vb();

    let first = resolver.resolve("VB", "Coil Spring", &master);
    let second = resolver.resolve("VB", "Coil Spring", &master);

    assert_eq!(first, second);
    // 主数据表顺序驱动列顺序
    assert_eq!(
        first.position_names(),
        vec!["Primary", "Secondary Outer", "Secondary Inner"]
    );
}

// ==========================================
// 测试用例 5: 二系归一化只影响比较
// ==========================================

#[test]
fn test_secondary_normalization_is_comparison_only() {
    let resolver = SpringConfigResolver::new();
    let master = master_vb();

    // 大小写混杂 + 两侧空白,规则仍命中
    let config = resolver.resolve("VB", "  aIr SPRING  ", &master);

    assert_eq!(config.position_names(), vec!["Primary"]);
}

// ==========================================
// 测试用例 6: max_per_bogie 缺省按 4
// ==========================================

#[test]
fn test_missing_max_per_bogie_defaults_to_four() {
    let resolver = SpringConfigResolver::new();
    let master = vec![definition(1, "Primary", &["LHB"], None)];

    let config = resolver.resolve("LHB", "", &master);

    assert_eq!(config.get("Primary"), Some(4));
}

// ==========================================
// 测试用例 7: 客车类型推断
// ==========================================

#[test]
fn test_infer_coach_type_from_code() {
    let resolver = SpringConfigResolver::new();

    assert_eq!(resolver.infer_coach_type_from_code("VB-GS"), "VB");
    assert_eq!(resolver.infer_coach_type_from_code("LWSCN"), "LHB");
    assert_eq!(resolver.infer_coach_type_from_code(""), "LHB");
}
