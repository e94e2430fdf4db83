use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::errors::AssignHubError;
use crate::models::ApiResponse;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::policy::{Action, Policy, Resource};
use crate::services::current_user;
use crate::utils::validate::validate_title;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    Policy::for_request(request).authorize(&user, Action::CreateAssignment, Resource::Collection)?;

    req.title = req.title.trim().to_string();
    validate_title(&req.title).map_err(AssignHubError::validation)?;

    // 指派对象必须是已存在的学生
    match storage.get_user_by_id(req.assigned_to).await? {
        Some(assignee) if assignee.is_student() => {}
        _ => {
            return Err(AssignHubError::validation(format!(
                "assigned_to must reference an existing student, got {}",
                req.assigned_to
            ))
            .into());
        }
    }

    let assignment = storage.create_assignment(user.id, req).await?;
    tracing::info!(
        "Assignment {} created by teacher {} for student {}",
        assignment.id,
        user.id,
        assignment.assigned_to
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        assignment,
        "Assignment created successfully",
    )))
}
