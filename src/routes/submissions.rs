use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission};
use crate::models::PaginationQuery;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::policy::Action;
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 列出全部提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

// 列出当前教师作业下的提交
pub async fn list_submissions_for_teacher(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions_for_teacher(&req, query.into_inner())
        .await
}

// 提交作业
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, path.0).await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/submissionapi")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_submissions))
                    // 提交 - 仅学生（是否为被指派学生在业务层检查）
                    .route(
                        web::post()
                            .to(create_submission)
                            .wrap(RequirePermission::new(Action::CreateSubmission)),
                    ),
            )
            .service(
                web::resource("/list-for-teacher")
                    .route(web::get().to(list_submissions_for_teacher))
                    .wrap(RequirePermission::new(Action::ListSubmissionsForTeacher)),
            )
            .service(web::resource("/{id}").route(web::get().to(get_submission))),
    );

    // 兼容旧路径
    cfg.service(
        web::resource("/list-submission")
            .route(web::get().to(list_submissions_for_teacher))
            .wrap(RequirePermission::new(Action::ListSubmissionsForTeacher))
            .wrap(middlewares::RequireJWT),
    );
}
