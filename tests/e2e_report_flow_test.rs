// ==========================================
// 报告生成全流程端到端测试
// ==========================================
// 测试目标: 故障行 → 快照 → 配置解析 → 清单定稿 → 分组 → PDF
// 覆盖范围: 默认流程 / 人工编辑 / 转向架修正 / 降级与错误路径
// ==========================================


use coach_spring_ims::api::{ApiError, ReportApi, ReportRequest};
use coach_spring_ims::domain::types::{ActivityKind, CellStatus};
use coach_spring_ims::engine::{ChecklistBuilder, MasterDataSnapshot, SpringConfigResolver};
use std::collections::HashMap;
use std::sync::Arc;
use test_helpers::{demo_failure, seeded_repos};

// ==========================================
// 测试用例 1: 默认请求生成完整报告
// ==========================================

#[test]
fn test_generate_with_defaults() {
    let (_temp, master, failure_repo) = seeded_repos(&[
        demo_failure("45001", Some("1"), "Primary", "CRK"),
        demo_failure("45001", Some("2"), "Secondary Outer", "COR"),
        demo_failure("45001", None, "Primary", "UNREGISTERED"),
    ])
    .unwrap();

    let snapshot = MasterDataSnapshot::load(&master).unwrap();
    let api = ReportApi::new(Arc::new(failure_repo));

    let generated = api
        .generate(
            &snapshot,
            ReportRequest {
                coach_no: "45001".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(generated.pdf.starts_with(b"%PDF"));
    assert_eq!(generated.defect_count, 3);
    assert_eq!(generated.coach_no, "45001");
    assert_eq!(generated.file_name, "inspection_VB-GS_45001.pdf");
}

// ==========================================
// 测试用例 2: 人工编辑 + 转向架修正 + 签名
// ==========================================

#[test]
fn test_generate_with_edits_and_overrides() {
    let (_temp, master, failure_repo) = seeded_repos(&[
        demo_failure("45001", Some("1"), "Primary", "CRK"),
        demo_failure("45001", Some("1"), "Primary", "COR"),
    ])
    .unwrap();

    let snapshot = MasterDataSnapshot::load(&master).unwrap();
    let resolver = SpringConfigResolver::new();
    let builder = ChecklistBuilder::new();
    let config = resolver.resolve("VB", "Coil Spring", &snapshot.spring_types);

    // 录入界面看到的默认清单,人工清空一格、改一格
    let mut edited = builder.build_default_for_kind(
        &snapshot.visual_activities,
        &config,
        ActivityKind::VisualInspection,
    );
    edited[0].set_answer("primary", CellStatus::Empty);
    edited[0].set_answer("secondaryouter", CellStatus::Unsatisfactory);
    edited[0].remarks = "Shifted seating".to_string();

    let mut overrides = HashMap::new();
    overrides.insert(1usize, "2".to_string()); // 第二条故障行改归转向架 2

    let inspector_id = snapshot.inspectors.first().map(|i| i.id);

    let api = ReportApi::new(Arc::new(failure_repo));
    let generated = api
        .generate(
            &snapshot,
            ReportRequest {
                coach_no: "45001".to_string(),
                bogie1_number: Some("B-101".to_string()),
                bogie2_number: Some("B-102".to_string()),
                inspector_id,
                bogie_overrides: overrides,
                sig_shop_name: Some("A. Verma".to_string()),
                sig_shop_date: Some("2026-07-20".to_string()),
                sig_inspection_date: Some("not-a-date".to_string()),
                visual_bogie1: Some(edited),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(generated.pdf.starts_with(b"%PDF"));
    assert_eq!(generated.defect_count, 2);
}

// ==========================================
// 测试用例 3: 空快照降级仍可生成
// ==========================================

#[test]
fn test_generate_with_empty_snapshot_degrades() {
    let (_temp, _master, failure_repo) =
        seeded_repos(&[demo_failure("45001", Some("1"), "Primary", "CRK")]).unwrap();

    let api = ReportApi::new(Arc::new(failure_repo));
    let generated = api
        .generate(
            &MasterDataSnapshot::empty(),
            ReportRequest {
                coach_no: "45001".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    // 主数据缺失: 配置仍由 COIL 规则补齐,清单为空,文档完整
    assert!(generated.pdf.starts_with(b"%PDF"));
    assert_eq!(generated.defect_count, 1);
}

// ==========================================
// 测试用例 4: 错误路径
// ==========================================

#[test]
fn test_generate_rejects_blank_coach_no() {
    let (_temp, _master, failure_repo) = seeded_repos(&[]).unwrap();
    let api = ReportApi::new(Arc::new(failure_repo));

    let result = api.generate(
        &MasterDataSnapshot::empty(),
        ReportRequest {
            coach_no: "   ".to_string(),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_generate_unknown_coach_is_not_found() {
    let (_temp, master, failure_repo) =
        seeded_repos(&[demo_failure("45001", Some("1"), "Primary", "CRK")]).unwrap();
    let snapshot = MasterDataSnapshot::load(&master).unwrap();
    let api = ReportApi::new(Arc::new(failure_repo));

    let result = api.generate(
        &snapshot,
        ReportRequest {
            coach_no: "99999".to_string(),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

// ==========================================
// 测试用例 5: 快照拆分与检验员查找
// ==========================================

#[test]
fn test_snapshot_splits_activities_and_resolves_inspector() {
    let (_temp, master, _failure_repo) = seeded_repos(&[]).unwrap();
    let snapshot = MasterDataSnapshot::load(&master).unwrap();

    // 停用活动被过滤
    assert_eq!(snapshot.visual_activities.len(), 2);
    assert_eq!(snapshot.mustdo_activities.len(), 2);
    assert!(snapshot
        .visual_activities
        .iter()
        .all(|a| a.is_active && a.activity_type == ActivityKind::VisualInspection));

    // 检验员查找: 命中返回姓名,未命中返回空串
    let first = &snapshot.inspectors[0];
    assert_eq!(snapshot.inspector_name(Some(first.id)), first.name);
    assert_eq!(snapshot.inspector_name(Some(-1)), "");
    assert_eq!(snapshot.inspector_name(None), "");
}
