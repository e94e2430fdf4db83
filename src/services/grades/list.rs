use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::requests::GradeListQuery;
use crate::models::{ApiResponse, PaginationQuery};
use crate::policy::{Action, Policy, Resource};
use crate::services::current_user;

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = GradeListQuery {
        pagination: query,
        ..Default::default()
    };

    let response = storage.list_grades_with_pagination(list_query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Query successful")))
}

/// 列出当前学生收到的评分
pub async fn list_grades_for_student(
    service: &GradeService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    Policy::for_request(request).authorize(
        &user,
        Action::ListGradesForStudent,
        Resource::Collection,
    )?;

    let list_query = GradeListQuery {
        pagination: query,
        graded_to: Some(user.id),
        ..Default::default()
    };

    let response = storage.list_grades_with_pagination(list_query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Query successful")))
}
