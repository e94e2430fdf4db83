use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission};
use crate::models::PaginationQuery;
use crate::models::grades::requests::CreateGradeRequest;
use crate::policy::Action;
use crate::services::GradeService;
use crate::utils::SafeIDI64;

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// 列出全部评分
pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

// 列出当前学生的评分
pub async fn list_grades_for_student(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .list_grades_for_student(&req, query.into_inner())
        .await
}

// 评分
pub async fn create_grade(
    req: HttpRequest,
    body: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(&req, body.into_inner()).await
}

// 获取评分详情
pub async fn get_grade(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(&req, path.0).await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/gradeapi")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_grades))
                    // 评分 - 仅教师（是否为作业创建者在业务层检查）
                    .route(
                        web::post()
                            .to(create_grade)
                            .wrap(RequirePermission::new(Action::CreateGrade)),
                    ),
            )
            .service(
                web::resource("/list-for-student")
                    .route(web::get().to(list_grades_for_student))
                    .wrap(RequirePermission::new(Action::ListGradesForStudent)),
            )
            .service(web::resource("/{id}").route(web::get().to(get_grade))),
    );

    // 兼容旧路径
    cfg.service(
        web::resource("/view-grade")
            .route(web::get().to(list_grades_for_student))
            .wrap(RequirePermission::new(Action::ListGradesForStudent))
            .wrap(middlewares::RequireJWT),
    );
}
