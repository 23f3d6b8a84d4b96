// ==========================================
// DashboardApi 汇总统计测试
// ==========================================
// 测试目标: 验证计数、榜单与交叉表与写入的记录一致
// ==========================================


use coach_spring_ims::api::DashboardApi;
use coach_spring_ims::repository::SpringFailureRepository;
use std::sync::Arc;
use test_helpers::{create_test_db, demo_failure};

#[test]
fn test_summary_counts_match_fixtures() {
    let (_temp, db_path) = create_test_db().unwrap();
    let repo = Arc::new(SpringFailureRepository::new(&db_path).unwrap());

    repo.insert(&demo_failure("45001", Some("1"), "Primary", "CRK"))
        .unwrap();
    repo.insert(&demo_failure("45001", Some("2"), "Primary", "CRK"))
        .unwrap();
    repo.insert(&demo_failure("45002", None, "Secondary Outer", "COR"))
        .unwrap();

    let api = DashboardApi::new(repo);
    let summary = api.summary().unwrap();

    assert_eq!(summary.total_failures, 3);
    // demo_failure 固定 coach_code = "VB-GS"
    assert_eq!(summary.unique_coach_codes, 1);
    assert_eq!(summary.failure_type_count, 2);
    assert_eq!(summary.spring_type_count, 2);

    // 榜单按计数降序
    assert_eq!(summary.top_defect_types[0].key, "CRK");
    assert_eq!(summary.top_defect_types[0].count, 2);
    assert_eq!(summary.top_defect_types[1].key, "COR");

    assert_eq!(summary.failures_by_spring_type[0].key, "Primary");
    assert_eq!(summary.failures_by_spring_type[0].count, 2);

    assert_eq!(summary.failures_by_coach_type.len(), 1);
    assert_eq!(summary.failures_by_coach_type[0].key, "VB");
    assert_eq!(summary.failures_by_coach_type[0].count, 3);

    // 交叉表: VB × {COR, CRK}
    assert_eq!(summary.coach_type_defect_crosstab.len(), 2);
    assert_eq!(summary.coach_type_defect_crosstab[0].defect_type, "COR");
    assert_eq!(summary.coach_type_defect_crosstab[1].defect_type, "CRK");
    assert_eq!(summary.coach_type_defect_crosstab[1].count, 2);
}

#[test]
fn test_summary_on_empty_store() {
    let (_temp, db_path) = create_test_db().unwrap();
    let repo = Arc::new(SpringFailureRepository::new(&db_path).unwrap());

    let api = DashboardApi::new(repo);
    let summary = api.summary().unwrap();

    assert_eq!(summary.total_failures, 0);
    assert!(summary.top_defect_types.is_empty());
    assert!(summary.coach_type_defect_crosstab.is_empty());
}
