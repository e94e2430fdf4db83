use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::requests::SubmissionListQuery;
use crate::models::{ApiResponse, PaginationQuery};
use crate::policy::{Action, Policy, Resource};
use crate::services::current_user;

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = SubmissionListQuery {
        pagination: query,
        ..Default::default()
    };

    let response = storage.list_submissions_with_pagination(list_query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Query successful")))
}

/// 列出当前教师所创建作业的提交
pub async fn list_submissions_for_teacher(
    service: &SubmissionService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    Policy::for_request(request).authorize(
        &user,
        Action::ListSubmissionsForTeacher,
        Resource::Collection,
    )?;

    let list_query = SubmissionListQuery {
        pagination: query,
        teacher_id: Some(user.id),
        ..Default::default()
    };

    let response = storage.list_submissions_with_pagination(list_query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Query successful")))
}
