use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::errors::AssignHubError;
use crate::models::ApiResponse;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::policy::{Action, Policy, Resource};
use crate::services::current_user;
use crate::utils::validate::validate_title;

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    mut req: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignHubError::not_found("Assignment not found"))?;

    Policy::for_request(request).authorize(
        &user,
        Action::UpdateAssignment,
        Resource::Assignment(&assignment),
    )?;

    if let Some(title) = req.title.as_mut() {
        *title = title.trim().to_string();
        validate_title(title).map_err(AssignHubError::validation)?;
    }

    let updated = storage
        .update_assignment(assignment_id, req)
        .await?
        .ok_or_else(|| AssignHubError::not_found("Assignment not found"))?;

    tracing::info!("Assignment {} updated by teacher {}", assignment_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Assignment updated successfully",
    )))
}
