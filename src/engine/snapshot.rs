// ==========================================
// 客车弹簧故障管理系统 - 主数据快照
// ==========================================
// 职责: 聚合引擎所需的全部主数据为一份调用方持有的快照
// 红线: 不做进程级单例;刷新节奏由调用方决定
// 说明: 活动按类型 + 启用标志在加载时拆分,顺序保持 sequence_number
// ==========================================

use crate::domain::defect::{DefectCodeIndex, DefectType};
use crate::domain::inspection::InspectionActivity;
use crate::domain::report::Inspector;
use crate::domain::spring::SpringTypeDefinition;
use crate::domain::types::ActivityKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::master_repo::MasterDataRepository;
use chrono::{DateTime, Utc};
use tracing::instrument;

/// 调用方持有的主数据快照
///
/// 每次报告请求消费同一份快照,保证录入界面看到的弹簧配置
/// 与最终文档中的配置完全一致。
#[derive(Debug, Clone, Default)]
pub struct MasterDataSnapshot {
    pub spring_types: Vec<SpringTypeDefinition>,
    pub defect_types: Vec<DefectType>,
    pub visual_activities: Vec<InspectionActivity>,  // 目视检查,启用,按序
    pub mustdo_activities: Vec<InspectionActivity>,  // 必做项目,启用,按序
    pub inspectors: Vec<Inspector>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl MasterDataSnapshot {
    /// 空快照 (主数据加载失败后的降级运行入口)
    pub fn empty() -> Self {
        Self::default()
    }

    /// 从主数据仓储加载一份快照
    ///
    /// 任何一张表加载失败都表达为 MissingMasterData 上抛;
    /// 调用方可选择用 `empty()` 降级继续。
    #[instrument(skip(repo))]
    pub fn load(repo: &MasterDataRepository) -> RepositoryResult<Self> {
        let spring_types = repo
            .list_spring_types()
            .map_err(|e| missing("spring_types", e))?;
        let defect_types = repo
            .list_defect_types()
            .map_err(|e| missing("defect_types", e))?;
        let activities = repo
            .list_activities()
            .map_err(|e| missing("inspection_activities", e))?;
        let inspectors = repo
            .list_active_inspectors()
            .map_err(|e| missing("inspectors", e))?;

        let (visual_activities, mustdo_activities) = split_activities(activities);

        tracing::debug!(
            spring_types = spring_types.len(),
            defect_types = defect_types.len(),
            visual = visual_activities.len(),
            mustdo = mustdo_activities.len(),
            inspectors = inspectors.len(),
            "主数据快照加载完成"
        );

        Ok(Self {
            spring_types,
            defect_types,
            visual_activities,
            mustdo_activities,
            inspectors,
            loaded_at: Some(Utc::now()),
        })
    }

    /// 缺陷代码 → 显示名 索引
    pub fn defect_code_index(&self) -> DefectCodeIndex {
        DefectCodeIndex::from_types(&self.defect_types)
    }

    /// 按 id 查检验员姓名,未找到返回空串
    pub fn inspector_name(&self, inspector_id: Option<i64>) -> String {
        inspector_id
            .and_then(|id| self.inspectors.iter().find(|i| i.id == id))
            .map(|i| i.name.clone())
            .unwrap_or_default()
    }
}

/// 启用的活动按类型拆分,保持加载顺序
fn split_activities(
    activities: Vec<InspectionActivity>,
) -> (Vec<InspectionActivity>, Vec<InspectionActivity>) {
    let mut visual = Vec::new();
    let mut mustdo = Vec::new();
    for act in activities.into_iter().filter(|a| a.is_active) {
        match act.activity_type {
            ActivityKind::VisualInspection => visual.push(act),
            ActivityKind::MustDo => mustdo.push(act),
        }
    }
    (visual, mustdo)
}

fn missing(table: &str, err: RepositoryError) -> RepositoryError {
    RepositoryError::MissingMasterData {
        table: table.to_string(),
        message: err.to_string(),
    }
}
