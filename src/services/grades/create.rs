use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::errors::AssignHubError;
use crate::models::ApiResponse;
use crate::models::assignments::lifecycle::AssignmentState;
use crate::models::grades::requests::CreateGradeRequest;
use crate::policy::{Action, Policy, Resource};
use crate::services::current_user;

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    req: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let policy = Policy::for_request(request);

    policy.authorize(&user, Action::CreateGrade, Resource::Collection)?;

    let assignment = storage
        .get_assignment_by_id(req.assignment_id)
        .await?
        .ok_or_else(|| {
            AssignHubError::validation(format!("Assignment {} does not exist", req.assignment_id))
        })?;

    // 只有作业创建者可以评分
    policy.authorize(&user, Action::CreateGrade, Resource::Assignment(&assignment))?;

    // graded_to 由作业推导，显式传入时必须一致
    if let Some(graded_to) = req.graded_to
        && graded_to != assignment.assigned_to
    {
        return Err(AssignHubError::validation(
            "graded_to must be the student the assignment is assigned to",
        )
        .into());
    }

    let has_submission = storage
        .get_submission_by_assignment_id(assignment.id)
        .await?
        .is_some();
    let has_grade = storage
        .get_grade_by_assignment_id(assignment.id)
        .await?
        .is_some();
    AssignmentState::derive(has_submission, has_grade)
        .grade(policy.require_submission_before_grade)?;

    let grade = storage
        .create_grade(user.id, assignment.assigned_to, req)
        .await?;
    tracing::info!(
        "Grade {} ({}) given by teacher {} for assignment {}",
        grade.id,
        grade.score,
        user.id,
        grade.assignment_id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade created successfully")))
}
