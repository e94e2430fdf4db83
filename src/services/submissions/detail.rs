use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::AssignHubError;
use crate::models::ApiResponse;

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| AssignHubError::not_found("Submission not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "Query successful")))
}
