// ==========================================
// FailureApi 故障记录测试
// ==========================================
// 测试目标: 验证录入校验、字段规整与 CRUD 透传
// ==========================================


use coach_spring_ims::api::{ApiError, FailureApi};
use coach_spring_ims::domain::NewSpringFailure;
use coach_spring_ims::repository::SpringFailureRepository;
use std::sync::Arc;
use test_helpers::{create_test_db, demo_failure};

fn api() -> (tempfile::NamedTempFile, FailureApi) {
    let (temp, db_path) = create_test_db().unwrap();
    let repo = Arc::new(SpringFailureRepository::new(&db_path).unwrap());
    (temp, FailureApi::new(repo))
}

// ==========================================
// 测试用例 1: 必填校验
// ==========================================

#[test]
fn test_add_requires_coach_no_and_coach_type() {
    let (_temp, api) = api();

    let mut missing_no = demo_failure("  ", None, "Primary", "CRK");
    missing_no.coach_no = "  ".to_string();
    assert!(matches!(
        api.add(missing_no),
        Err(ApiError::InvalidInput(_))
    ));

    let mut missing_type = demo_failure("45001", None, "Primary", "CRK");
    missing_type.coach_type = None;
    assert!(matches!(
        api.add(missing_type),
        Err(ApiError::InvalidInput(_))
    ));
}

// ==========================================
// 测试用例 2: 字段规整 (trim / 空串归 None / 计数下限)
// ==========================================

#[test]
fn test_add_normalizes_fields() {
    let (_temp, api) = api();

    let id = api
        .add(NewSpringFailure {
            coach_no: "  45001  ".to_string(),
            coach_type: Some("VB".to_string()),
            coach_code: Some("   ".to_string()),
            bogie_number: Some(" 2 ".to_string()),
            type_of_spring: Some(" Primary ".to_string()),
            defect_count: 0,
            ..Default::default()
        })
        .unwrap();
    assert!(id > 0);

    let rows = api.list_by_coach("45001").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].coach_no, "45001");
    assert_eq!(rows[0].coach_code, None);
    assert_eq!(rows[0].bogie_number.as_deref(), Some("2"));
    assert_eq!(rows[0].type_of_spring.as_deref(), Some("Primary"));
    assert_eq!(rows[0].defect_count, 1);
}

// ==========================================
// 测试用例 3: 更新与删除透传
// ==========================================

#[test]
fn test_update_and_delete() {
    let (_temp, api) = api();

    api.add(demo_failure("45001", Some("1"), "Primary", "CRK"))
        .unwrap();
    api.add(demo_failure("45002", Some("2"), "Primary", "COR"))
        .unwrap();

    assert_eq!(api.list().unwrap().len(), 2);
    assert_eq!(api.list_coach_numbers().unwrap(), vec!["45001", "45002"]);

    let mut row = api.list_by_coach("45001").unwrap().remove(0);
    row.remarks = Some("re-checked".to_string());
    api.update(&row).unwrap();
    assert_eq!(
        api.list_by_coach("45001").unwrap()[0].remarks.as_deref(),
        Some("re-checked")
    );

    api.delete(row.id).unwrap();
    assert!(api.list_by_coach("45001").unwrap().is_empty());

    // 空车号查询被拒绝
    assert!(matches!(
        api.list_by_coach("  "),
        Err(ApiError::InvalidInput(_))
    ));
}
