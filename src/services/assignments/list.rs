use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::requests::{AssignmentListParams, AssignmentListQuery};
use crate::policy::{Action, Policy, Resource};
use crate::services::current_user;

/// 列出全部作业（任何已登录用户）
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = AssignmentListQuery {
        pagination: query.pagination,
        search: query.search,
        ..Default::default()
    };

    let response = storage.list_assignments_with_pagination(list_query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Query successful")))
}

/// 列出指派给当前学生的作业
pub async fn list_assignments_for_student(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    Policy::for_request(request).authorize(
        &user,
        Action::ListAssignmentsForStudent,
        Resource::Collection,
    )?;

    let list_query = AssignmentListQuery {
        pagination: query.pagination,
        assigned_to: Some(user.id),
        search: query.search,
        ..Default::default()
    };

    let response = storage.list_assignments_with_pagination(list_query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Query successful")))
}
