use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::errors::AssignHubError;
use crate::models::ApiResponse;
use crate::policy::{Action, Policy, Resource};
use crate::services::current_user;

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignHubError::not_found("Assignment not found"))?;

    Policy::for_request(request).authorize(
        &user,
        Action::DeleteAssignment,
        Resource::Assignment(&assignment),
    )?;

    // 提交与评分随作业一并删除
    if !storage.delete_assignment(assignment_id).await? {
        return Err(AssignHubError::not_found("Assignment not found").into());
    }

    tracing::info!("Assignment {} deleted by teacher {}", assignment_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted successfully")))
}
