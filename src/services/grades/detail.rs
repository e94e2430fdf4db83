use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::errors::AssignHubError;
use crate::models::ApiResponse;

pub async fn get_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let grade = storage
        .get_grade_by_id(grade_id)
        .await?
        .ok_or_else(|| AssignHubError::not_found("Grade not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Query successful")))
}
