// ==========================================
// 客车弹簧故障管理系统 - 故障记录 API
// ==========================================
// 职责: 故障记录的录入/查询/更新/删除,含输入校验与字段规整
// 说明: 字符串字段统一 trim,空串归一为 None (与托管后端语义一致)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::defect::{NewSpringFailure, SpringFailure};
use crate::repository::failure_repo::SpringFailureRepository;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// FailureApi - 故障记录 API
// ==========================================
pub struct FailureApi {
    failure_repo: Arc<SpringFailureRepository>,
}

impl FailureApi {
    /// 创建新的故障记录 API
    pub fn new(failure_repo: Arc<SpringFailureRepository>) -> Self {
        Self { failure_repo }
    }

    /// 新增故障记录
    ///
    /// 校验: coach_no 与 coach_type 必填; defect_count 至少为 1
    #[instrument(skip(self, failure), fields(coach = %failure.coach_no))]
    pub fn add(&self, failure: NewSpringFailure) -> ApiResult<i64> {
        if failure.coach_no.trim().is_empty() {
            return Err(ApiError::InvalidInput("车号不能为空".to_string()));
        }
        if failure
            .coach_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .is_none()
        {
            return Err(ApiError::InvalidInput("客车类型不能为空".to_string()));
        }

        let normalized = normalize(failure);
        let id = self.failure_repo.insert(&normalized)?;
        tracing::info!(id, "故障记录已新增");
        Ok(id)
    }

    /// 全部故障记录
    pub fn list(&self) -> ApiResult<Vec<SpringFailure>> {
        Ok(self.failure_repo.list_all()?)
    }

    /// 指定车号的故障记录
    pub fn list_by_coach(&self, coach_no: &str) -> ApiResult<Vec<SpringFailure>> {
        let coach_no = coach_no.trim();
        if coach_no.is_empty() {
            return Err(ApiError::InvalidInput("车号不能为空".to_string()));
        }
        Ok(self.failure_repo.list_by_coach(coach_no)?)
    }

    /// 出现过故障记录的车号全集
    pub fn list_coach_numbers(&self) -> ApiResult<Vec<String>> {
        Ok(self.failure_repo.list_coach_numbers()?)
    }

    /// 按 id 更新整行
    pub fn update(&self, failure: &SpringFailure) -> ApiResult<()> {
        if failure.coach_no.trim().is_empty() {
            return Err(ApiError::InvalidInput("车号不能为空".to_string()));
        }
        Ok(self.failure_repo.update(failure)?)
    }

    /// 按 id 删除
    pub fn delete(&self, id: i64) -> ApiResult<()> {
        Ok(self.failure_repo.delete(id)?)
    }
}

/// 字段规整: trim 所有字符串,空串归一为 None,defect_count 下限 1
fn normalize(failure: NewSpringFailure) -> NewSpringFailure {
    let clean = |v: Option<String>| -> Option<String> {
        v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    };

    NewSpringFailure {
        coach_no: failure.coach_no.trim().to_string(),
        coach_code: clean(failure.coach_code),
        coach_type: clean(failure.coach_type),
        schedule: clean(failure.schedule),
        division: clean(failure.division),
        bogie_number: clean(failure.bogie_number),
        receipt_date: failure.receipt_date,
        secondary_suspension_type: clean(failure.secondary_suspension_type),
        type_of_spring: clean(failure.type_of_spring),
        colour_of_spring: clean(failure.colour_of_spring),
        type_of_failure: clean(failure.type_of_failure),
        location: clean(failure.location),
        location_in_bogie: clean(failure.location_in_bogie),
        remarks: clean(failure.remarks),
        mfg: clean(failure.mfg),
        defect_count: failure.defect_count.max(1),
    }
}
