use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission};
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::policy::Action;
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出全部作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

// 列出指派给当前学生的作业
pub async fn list_assignments_for_student(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments_for_student(&req, query.into_inner())
        .await
}

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, body.into_inner())
        .await
}

// 获取作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, path.0).await
}

// 更新作业（PUT 与 PATCH 均为部分更新）
pub async fn update_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, path.0, body.into_inner())
        .await
}

// 删除作业（连同提交与评分）
pub async fn delete_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, path.0).await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/assignmentapi")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出作业 - 所有登录用户可访问
                    .route(web::get().to(list_assignments))
                    // 创建作业 - 仅教师
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(RequirePermission::new(Action::CreateAssignment)),
                    ),
            )
            // 学生作业列表 - 仅学生，需在 /{id} 之前注册
            .service(
                web::resource("/list-for-student")
                    .route(web::get().to(list_assignments_for_student))
                    .wrap(RequirePermission::new(Action::ListAssignmentsForStudent)),
            )
            .service(
                web::resource("/{id}")
                    // 获取作业详情 - 所有登录用户可访问
                    .route(web::get().to(get_assignment))
                    // 更新作业 - 仅教师（归属检查在业务层）
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(RequirePermission::new(Action::UpdateAssignment)),
                    )
                    .route(
                        web::patch()
                            .to(update_assignment)
                            .wrap(RequirePermission::new(Action::UpdateAssignment)),
                    )
                    // 删除作业 - 仅教师
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(RequirePermission::new(Action::DeleteAssignment)),
                    ),
            ),
    );

    // 兼容旧路径（旧客户端使用拼写错误的 list-assingment）
    for path in ["/list-assignment", "/list-assingment"] {
        cfg.service(
            web::resource(path)
                .route(web::get().to(list_assignments_for_student))
                .wrap(RequirePermission::new(Action::ListAssignmentsForStudent))
                .wrap(middlewares::RequireJWT),
        );
    }
}
