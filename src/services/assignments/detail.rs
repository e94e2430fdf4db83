use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::errors::AssignHubError;
use crate::models::ApiResponse;
use crate::models::assignments::{lifecycle::AssignmentState, responses::AssignmentDetail};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignHubError::not_found("Assignment not found"))?;

    // 状态由提交与评分记录推导
    let has_submission = storage
        .get_submission_by_assignment_id(assignment_id)
        .await?
        .is_some();
    let has_grade = storage
        .get_grade_by_assignment_id(assignment_id)
        .await?
        .is_some();

    let detail = AssignmentDetail {
        assignment,
        state: AssignmentState::derive(has_submission, has_grade),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Query successful")))
}
