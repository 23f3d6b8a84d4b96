// ==========================================
// 客车弹簧故障管理系统 - 报告生成 API
// ==========================================
// 职责: 报告生成管线的编排入口
// 流程: 故障行 → 弹簧配置解析 → 检查清单定稿 → 缺陷分组 →
//       签名归一化 → PDF 渲染
// 红线: 主数据快照由调用方持有并传入,本层不做进程级缓存
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::defect::DefectRecord;
use crate::domain::inspection::InspectionRow;
use crate::domain::report::{InspectionReport, Signature, SignatureImages};
use crate::domain::types::ActivityKind;
use crate::engine::checklist::ChecklistBuilder;
use crate::engine::dates::normalize_signature_date;
use crate::engine::defects::DefectAggregator;
use crate::engine::snapshot::MasterDataSnapshot;
use crate::engine::spring_config::SpringConfigResolver;
use crate::report::pdf::ReportRenderer;
use crate::repository::failure_repo::SpringFailureRepository;
use chrono::NaiveTime;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// 二系悬挂类型缺失时的报告兜底值
const DEFAULT_SECONDARY_TYPE: &str = "Air Spring";

/// 转向架 1 编号缺省时的文档标签
const DEFAULT_BOGIE1_LABEL: &str = "Bogie 1";

// ==========================================
// ReportRequest - 一次报告生成请求
// ==========================================
// 清单字段为 None 时使用默认清单;编辑后的行在生成时统一定稿合并
#[derive(Debug, Default)]
pub struct ReportRequest {
    pub coach_no: String,
    pub bogie1_number: Option<String>,            // 报告用转向架 1 编号
    pub bogie2_number: Option<String>,            // 报告用转向架 2 编号
    pub inspector_id: Option<i64>,                // 检验员
    pub bogie_overrides: HashMap<usize, String>,  // 故障行下标 → 修正后的转向架号
    pub sig_shop_name: Option<String>,
    pub sig_shop_date: Option<String>,
    pub sig_inspection_name: Option<String>,
    pub sig_inspection_date: Option<String>,
    pub visual_bogie1: Option<Vec<InspectionRow>>,
    pub visual_bogie2: Option<Vec<InspectionRow>>,
    pub mustdo_bogie1: Option<Vec<InspectionRow>>,
    pub mustdo_bogie2: Option<Vec<InspectionRow>>,
    pub images: SignatureImages,
}

/// 生成完成的报告 (PDF 字节 + 元信息)
#[derive(Debug)]
pub struct GeneratedReport {
    pub report_id: Uuid,
    pub file_name: String,
    pub coach_no: String,
    pub defect_count: usize,
    pub pdf: Vec<u8>,
}

// ==========================================
// ReportApi - 报告生成 API
// ==========================================
pub struct ReportApi {
    failure_repo: Arc<SpringFailureRepository>,
    resolver: SpringConfigResolver,
    builder: ChecklistBuilder,
    aggregator: DefectAggregator,
    renderer: ReportRenderer,
}

impl ReportApi {
    /// 创建新的报告生成 API
    pub fn new(failure_repo: Arc<SpringFailureRepository>) -> Self {
        Self {
            failure_repo,
            resolver: SpringConfigResolver::new(),
            builder: ChecklistBuilder::new(),
            aggregator: DefectAggregator::new(),
            renderer: ReportRenderer::new(),
        }
    }

    /// 生成一份检修报告
    ///
    /// # 参数
    /// - snapshot: 调用方持有的主数据快照
    /// - request: 报告请求 (车号必填)
    ///
    /// # 返回
    /// - Ok(GeneratedReport): 完整 PDF 字节与元信息
    /// - Err(ApiError): 车号为空 / 无故障记录 / 渲染失败
    #[instrument(skip(self, snapshot, request), fields(coach = %request.coach_no))]
    pub fn generate(
        &self,
        snapshot: &MasterDataSnapshot,
        request: ReportRequest,
    ) -> ApiResult<GeneratedReport> {
        let coach_no = request.coach_no.trim().to_string();
        if coach_no.is_empty() {
            return Err(ApiError::InvalidInput("车号不能为空".to_string()));
        }

        let failures = self.failure_repo.list_by_coach(&coach_no)?;
        if failures.is_empty() {
            return Err(ApiError::NotFound(format!(
                "车号 {} 没有故障记录",
                coach_no
            )));
        }

        // 车辆基础信息取首条故障行,缺失字段按既有规则兜底
        let first = &failures[0];
        let coach_code = first.coach_code.clone().unwrap_or_default();
        let coach_type = first
            .coach_type
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| {
                self.resolver
                    .infer_coach_type_from_code(&coach_code)
                    .to_string()
            });
        let secondary_type = first
            .secondary_suspension_type
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SECONDARY_TYPE.to_string());
        let date_of_receipt = first
            .receipt_date
            .map(|d| {
                d.and_time(NaiveTime::MIN)
                    .format("%Y-%m-%dT%H:%M:%S")
                    .to_string()
            })
            .unwrap_or_default();

        // 录入界面与文档必须使用同一份解析结果
        let spring_counts =
            self.resolver
                .resolve(&coach_type, &secondary_type, &snapshot.spring_types);

        // 缺陷记录投影 + 行级转向架号修正
        let mut records: Vec<DefectRecord> =
            failures.iter().map(DefectRecord::from_failure).collect();
        for (idx, corrected) in &request.bogie_overrides {
            if let Some(record) = records.get_mut(*idx) {
                record.bogie_number = Some(corrected.clone());
            }
        }
        let (bogie1_defects, bogie2_defects) = self.aggregator.partition(records);

        // 检查清单: 人工编辑优先,否则默认;统一定稿合并
        let bogie1_inspections = self.finalized_rows(
            request.visual_bogie1,
            snapshot,
            &spring_counts,
            ActivityKind::VisualInspection,
        );
        let bogie2_inspections = self.finalized_rows(
            request.visual_bogie2,
            snapshot,
            &spring_counts,
            ActivityKind::VisualInspection,
        );
        let bogie1_must_do = self.finalized_rows(
            request.mustdo_bogie1,
            snapshot,
            &spring_counts,
            ActivityKind::MustDo,
        );
        let bogie2_must_do = self.finalized_rows(
            request.mustdo_bogie2,
            snapshot,
            &spring_counts,
            ActivityKind::MustDo,
        );

        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let report = InspectionReport {
            coach_number: coach_no.clone(),
            coach_code: coach_code.clone(),
            coach_type,
            secondary_type,
            bogie1_number: non_blank(request.bogie1_number)
                .unwrap_or_else(|| DEFAULT_BOGIE1_LABEL.to_string()),
            bogie2_number: non_blank(request.bogie2_number).unwrap_or_default(),
            date_of_receipt,
            inspector_name: snapshot.inspector_name(request.inspector_id),
            spring_counts,
            bogie1_inspections,
            bogie2_inspections,
            bogie1_must_do,
            bogie2_must_do,
            bogie1_defects,
            bogie2_defects,
            sig_shop: Signature {
                name: non_blank(request.sig_shop_name),
                date: normalize_signature_date(request.sig_shop_date.as_deref()),
            },
            sig_inspection: Signature {
                name: non_blank(request.sig_inspection_name),
                date: normalize_signature_date(request.sig_inspection_date.as_deref()),
            },
        };

        let index = snapshot.defect_code_index();
        let pdf = self.renderer.render(&report, &index, &request.images)?;

        let generated = GeneratedReport {
            report_id: Uuid::new_v4(),
            file_name: format!("inspection_{}_{}.pdf", coach_code, coach_no),
            coach_no,
            defect_count: report.total_defects(),
            pdf,
        };
        tracing::info!(
            report_id = %generated.report_id,
            defects = generated.defect_count,
            bytes = generated.pdf.len(),
            "检修报告生成完成"
        );
        Ok(generated)
    }

    /// 取编辑后的行或默认行,并执行定稿合并
    fn finalized_rows(
        &self,
        edited: Option<Vec<InspectionRow>>,
        snapshot: &MasterDataSnapshot,
        config: &crate::domain::spring::SpringConfiguration,
        kind: ActivityKind,
    ) -> Vec<InspectionRow> {
        let activities = match kind {
            ActivityKind::VisualInspection => &snapshot.visual_activities,
            ActivityKind::MustDo => &snapshot.mustdo_activities,
        };
        let mut rows =
            edited.unwrap_or_else(|| self.builder.build_default_for_kind(activities, config, kind));
        self.builder.finalize_rows(&mut rows, kind);
        rows
    }
}
