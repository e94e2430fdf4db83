use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::AssignHubError;
use crate::models::ApiResponse;
use crate::models::assignments::lifecycle::AssignmentState;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::policy::{Action, Policy, Resource};
use crate::services::current_user;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let policy = Policy::for_request(request);

    policy.authorize(&user, Action::CreateSubmission, Resource::Collection)?;

    if req.solution_text.trim().is_empty() {
        return Err(AssignHubError::validation("solution_text must not be empty").into());
    }

    let assignment = storage
        .get_assignment_by_id(req.assignment_id)
        .await?
        .ok_or_else(|| {
            AssignHubError::validation(format!("Assignment {} does not exist", req.assignment_id))
        })?;

    // 只有被指派的学生可以提交
    policy.authorize(
        &user,
        Action::CreateSubmission,
        Resource::Assignment(&assignment),
    )?;

    let has_submission = storage
        .get_submission_by_assignment_id(assignment.id)
        .await?
        .is_some();
    let has_grade = storage
        .get_grade_by_assignment_id(assignment.id)
        .await?
        .is_some();
    AssignmentState::derive(has_submission, has_grade).submit()?;

    // 并发重复提交由唯一索引拦截，返回 Conflict
    let submission = storage.create_submission(user.id, req).await?;
    tracing::info!(
        "Submission {} created by student {} for assignment {}",
        submission.id,
        user.id,
        submission.assignment_id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        submission,
        "Submission created successfully",
    )))
}
