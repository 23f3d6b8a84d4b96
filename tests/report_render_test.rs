// ==========================================
// ReportRenderer 渲染测试
// ==========================================
// 测试目标: 验证 PDF 文档生成的完整性与降级行为
// 覆盖范围: 正常渲染 / 无缺陷提示路径 / 空配置 / 坏签名图片
// ==========================================

use coach_spring_ims::domain::types::{ActivityKind, CellStatus};
use coach_spring_ims::domain::{
    DefectCodeIndex, DefectRecord, DefectType, InspectionActivity, InspectionReport, Signature,
    SignatureImages, SpringTypeDefinition,
};
use coach_spring_ims::engine::{ChecklistBuilder, SpringConfigResolver};
use coach_spring_ims::report::ReportRenderer;

// ==========================================
// 测试辅助函数
// ==========================================

fn definition(id: i64, name: &str, coach_types: &[&str], max: Option<u32>) -> SpringTypeDefinition {
    SpringTypeDefinition {
        id,
        spring_type: name.to_string(),
        coach_types: coach_types.iter().map(|c| c.to_string()).collect(),
        max_per_bogie: max,
    }
}

fn activity(id: i64, text: &str, seq: i32, kind: ActivityKind) -> InspectionActivity {
    InspectionActivity {
        id,
        activity_text: text.to_string(),
        sequence_number: seq,
        activity_type: kind,
        is_active: true,
    }
}

fn defect(bogie: &str, code: &str) -> DefectRecord {
    DefectRecord {
        spring_type: "Primary".to_string(),
        spring_number: "L1".to_string(),
        defect_code: code.to_string(),
        location: "Coil 3".to_string(),
        bogie_number: Some(bogie.to_string()),
    }
}

fn index() -> DefectCodeIndex {
    DefectCodeIndex::from_types(&[DefectType {
        defect_code: "CRK".to_string(),
        defect_name: "Crack".to_string(),
    }])
}

/// 组装一份带缺陷与清单的标准测试报告
fn build_report(with_defects: bool) -> InspectionReport {
    let resolver = SpringConfigResolver::new();
    let builder = ChecklistBuilder::new();
    let master = vec![
        definition(1, "Primary", &["VB"], Some(4)),
        definition(2, "Secondary Outer", &["VB"], Some(2)),
        definition(3, "Secondary Inner", &["VB"], Some(2)),
    ];
    let config = resolver.resolve("VB", "Coil Spring", &master);

    let visual_acts = vec![
        activity(1, "Check spring seating and alignment", 10, ActivityKind::VisualInspection),
        activity(2, "Check for visible cracks and corrosion", 20, ActivityKind::VisualInspection),
    ];
    let mustdo_acts = vec![
        activity(3, "Clean spring surface", 10, ActivityKind::MustDo),
        activity(4, "Gauge free height", 20, ActivityKind::MustDo),
    ];

    let visual_rows =
        builder.build_default_for_kind(&visual_acts, &config, ActivityKind::VisualInspection);
    let mustdo_rows = builder.build_default_for_kind(&mustdo_acts, &config, ActivityKind::MustDo);

    let (bogie1_defects, bogie2_defects) = if with_defects {
        (vec![defect("1", "CRK"), defect("", "UNREGISTERED")], vec![defect("2", "CRK")])
    } else {
        (Vec::new(), Vec::new())
    };

    InspectionReport {
        coach_number: "45001".to_string(),
        coach_code: "VB-GS".to_string(),
        coach_type: "VB".to_string(),
        secondary_type: "Coil Spring".to_string(),
        bogie1_number: "B-101".to_string(),
        bogie2_number: "B-102".to_string(),
        date_of_receipt: "2026-07-15T00:00:00".to_string(),
        inspector_name: "R. Sharma".to_string(),
        spring_counts: config,
        bogie1_inspections: visual_rows.clone(),
        bogie2_inspections: visual_rows,
        bogie1_must_do: mustdo_rows.clone(),
        bogie2_must_do: mustdo_rows,
        bogie1_defects,
        bogie2_defects,
        sig_shop: Signature {
            name: Some("A. Verma".to_string()),
            date: Some("2026-07-20".to_string()),
        },
        sig_inspection: Signature::default(),
    }
}

// ==========================================
// 测试用例 1: 正常渲染产生完整 PDF
// ==========================================

#[test]
fn test_render_produces_pdf_bytes() {
    let renderer = ReportRenderer::new();
    let report = build_report(true);

    let bytes = renderer
        .render(&report, &index(), &SignatureImages::default())
        .expect("render should succeed");

    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 1_000);
}

// ==========================================
// 测试用例 2: 无缺陷走提示路径
// ==========================================

#[test]
fn test_render_without_defects_uses_notice_path() {
    let renderer = ReportRenderer::new();
    let report = build_report(false);
    assert_eq!(report.total_defects(), 0);

    let bytes = renderer
        .render(&report, &index(), &SignatureImages::default())
        .expect("empty defect list must not fail rendering");

    assert!(bytes.starts_with(b"%PDF"));
}

// ==========================================
// 测试用例 3: 空配置省略配置表仍可渲染
// ==========================================

#[test]
fn test_render_with_empty_configuration() {
    let renderer = ReportRenderer::new();
    let mut report = build_report(false);
    report.spring_counts = Default::default();
    report.bogie1_inspections = Vec::new();
    report.bogie2_inspections = Vec::new();
    report.bogie1_must_do = Vec::new();
    report.bogie2_must_do = Vec::new();

    let bytes = renderer
        .render(&report, &index(), &SignatureImages::default())
        .expect("empty configuration must not fail rendering");

    assert!(bytes.starts_with(b"%PDF"));
}

// ==========================================
// 测试用例 4: 坏签名图片只丢槽不失败
// ==========================================

#[test]
fn test_bad_signature_image_is_skipped() {
    let renderer = ReportRenderer::new();
    let report = build_report(true);

    let images = SignatureImages {
        spring_shop: Some(vec![0xde, 0xad, 0xbe, 0xef]),
        inspection: Some(b"definitely not an image".to_vec()),
    };

    let bytes = renderer
        .render(&report, &index(), &images)
        .expect("bad image bytes must not abort assembly");

    assert!(bytes.starts_with(b"%PDF"));
}

// ==========================================
// 测试用例 5: 人工编辑值出现在渲染输入中不改变完整性
// ==========================================

#[test]
fn test_render_with_edited_cells_and_long_remarks() {
    let renderer = ReportRenderer::new();
    let mut report = build_report(true);

    report.bogie1_inspections[0].set_answer("primary", CellStatus::Unsatisfactory);
    report.bogie1_inspections[0].remarks =
        "Spring seating shifted towards the flange; re-seated and re-checked after cleaning, \
         recommend follow-up gauging at next schedule"
            .to_string();

    let bytes = renderer
        .render(&report, &index(), &SignatureImages::default())
        .expect("edited rows must render");

    assert!(bytes.starts_with(b"%PDF"));
}
