// ==========================================
// 客车弹簧故障管理系统 - 汇总统计 API
// ==========================================
// 职责: 故障记录的聚合统计 (计数与交叉表)
// 说明: 只输出数值,图表渲染属于表现层,不在本系统范围
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::defect::SpringFailure;
use crate::repository::failure_repo::SpringFailureRepository;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

/// Top 缺陷类型榜单长度
const TOP_DEFECT_LIMIT: usize = 10;

/// 一项计数条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub key: String,
    pub count: i64,
}

/// 客车类型 × 缺陷类型 交叉表条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrosstabEntry {
    pub coach_type: String,
    pub defect_type: String,
    pub count: i64,
}

/// 汇总统计结果
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_failures: usize,
    pub unique_coach_codes: usize,
    pub failure_type_count: usize,
    pub spring_type_count: usize,
    pub top_defect_types: Vec<CountEntry>,       // 最多 10 项,按计数降序
    pub failures_by_spring_type: Vec<CountEntry>,
    pub failures_by_coach_type: Vec<CountEntry>,
    pub coach_type_defect_crosstab: Vec<CrosstabEntry>,
}

// ==========================================
// DashboardApi - 汇总统计 API
// ==========================================
pub struct DashboardApi {
    failure_repo: Arc<SpringFailureRepository>,
}

impl DashboardApi {
    /// 创建新的汇总统计 API
    pub fn new(failure_repo: Arc<SpringFailureRepository>) -> Self {
        Self { failure_repo }
    }

    /// 计算全量故障记录的汇总统计
    ///
    /// 计数按行,不乘 defect_count;空值不参与分布统计。
    #[instrument(skip(self))]
    pub fn summary(&self) -> ApiResult<DashboardSummary> {
        let failures = self.failure_repo.list_all()?;

        let mut top_defect_types = value_counts(&failures, |f| f.type_of_failure.as_deref());
        top_defect_types.truncate(TOP_DEFECT_LIMIT);

        Ok(DashboardSummary {
            total_failures: failures.len(),
            unique_coach_codes: unique_count(&failures, |f| f.coach_code.as_deref()),
            failure_type_count: unique_count(&failures, |f| f.type_of_failure.as_deref()),
            spring_type_count: unique_count(&failures, |f| f.type_of_spring.as_deref()),
            top_defect_types,
            failures_by_spring_type: value_counts(&failures, |f| f.type_of_spring.as_deref()),
            failures_by_coach_type: value_counts(&failures, |f| f.coach_type.as_deref()),
            coach_type_defect_crosstab: crosstab(&failures),
        })
    }
}

/// 非空取值的出现次数,按计数降序、同计数按键名升序
fn value_counts<'a, F>(failures: &'a [SpringFailure], pick: F) -> Vec<CountEntry>
where
    F: Fn(&'a SpringFailure) -> Option<&'a str>,
{
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for failure in failures {
        if let Some(value) = pick(failure).map(str::trim).filter(|v| !v.is_empty()) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(key, count)| CountEntry {
            key: key.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    entries
}

fn unique_count<'a, F>(failures: &'a [SpringFailure], pick: F) -> usize
where
    F: Fn(&'a SpringFailure) -> Option<&'a str>,
{
    let mut seen: Vec<&str> = failures
        .iter()
        .filter_map(|f| pick(f).map(str::trim).filter(|v| !v.is_empty()))
        .collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// 客车类型 × 缺陷类型 交叉计数,按 (客车类型, 缺陷类型) 升序
fn crosstab(failures: &[SpringFailure]) -> Vec<CrosstabEntry> {
    let mut counts: HashMap<(&str, &str), i64> = HashMap::new();
    for failure in failures {
        let coach_type = failure
            .coach_type
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());
        let defect_type = failure
            .type_of_failure
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let (Some(ct), Some(dt)) = (coach_type, defect_type) {
            *counts.entry((ct, dt)).or_insert(0) += 1;
        }
    }
    let mut entries: Vec<CrosstabEntry> = counts
        .into_iter()
        .map(|((coach_type, defect_type), count)| CrosstabEntry {
            coach_type: coach_type.to_string(),
            defect_type: defect_type.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| {
        a.coach_type
            .cmp(&b.coach_type)
            .then_with(|| a.defect_type.cmp(&b.defect_type))
    });
    entries
}
