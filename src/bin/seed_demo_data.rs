// Small dev utility: seed the master tables and a few demo failure rows.
//
// Usage:
//   cargo run --bin seed_demo_data -- [db_path]
//
// This is intentionally lightweight and does not start the CLI proper.

use chrono::NaiveDate;
use coach_spring_ims::config::default_db_path;
use coach_spring_ims::domain::NewSpringFailure;
use coach_spring_ims::domain::types::ActivityKind;
use coach_spring_ims::repository::{MasterDataRepository, SpringFailureRepository};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(default_db_path);

    let master = MasterDataRepository::new(&db_path)?;
    let failures = SpringFailureRepository::new(&db_path)?;

    // 弹簧类型主数据
    master.insert_spring_type("Primary", &["VB", "LHB"], Some(4))?;
    master.insert_spring_type("Secondary Outer", &["VB"], Some(2))?;
    master.insert_spring_type("Secondary Inner", &["VB"], Some(2))?;

    // 缺陷类型主数据
    master.insert_defect_type("CRK", "Crack")?;
    master.insert_defect_type("COR", "Corrosion")?;
    master.insert_defect_type("BRK", "Breakage")?;
    master.insert_defect_type("SAG", "Free Height Loss")?;

    // 检查活动主数据
    master.insert_activity(
        "Check spring seating and alignment",
        10,
        ActivityKind::VisualInspection,
        true,
    )?;
    master.insert_activity(
        "Check for visible cracks and corrosion",
        20,
        ActivityKind::VisualInspection,
        true,
    )?;
    master.insert_activity("Clean spring surface", 10, ActivityKind::MustDo, true)?;
    master.insert_activity("Gauge free height", 20, ActivityKind::MustDo, true)?;

    // 检验员主数据
    master.insert_inspector("R. Sharma", true)?;
    master.insert_inspector("S. Kumar", true)?;

    // 演示故障记录
    let receipt = NaiveDate::from_ymd_opt(2026, 7, 15);
    failures.insert(&NewSpringFailure {
        coach_no: "45001".to_string(),
        coach_code: Some("VB-GS".to_string()),
        coach_type: Some("VB".to_string()),
        bogie_number: Some("1".to_string()),
        receipt_date: receipt,
        secondary_suspension_type: Some("Coil Spring".to_string()),
        type_of_spring: Some("Primary".to_string()),
        colour_of_spring: Some("Green".to_string()),
        type_of_failure: Some("CRK".to_string()),
        location: Some("Coil 3".to_string()),
        location_in_bogie: Some("L1".to_string()),
        defect_count: 1,
        ..Default::default()
    })?;
    failures.insert(&NewSpringFailure {
        coach_no: "45001".to_string(),
        coach_code: Some("VB-GS".to_string()),
        coach_type: Some("VB".to_string()),
        bogie_number: Some("2".to_string()),
        receipt_date: receipt,
        secondary_suspension_type: Some("Coil Spring".to_string()),
        type_of_spring: Some("Secondary Outer".to_string()),
        colour_of_spring: Some("Yellow".to_string()),
        type_of_failure: Some("COR".to_string()),
        location: Some("End coil".to_string()),
        location_in_bogie: Some("R2".to_string()),
        defect_count: 1,
        ..Default::default()
    })?;

    println!("seeded db at {}", db_path);
    Ok(())
}
