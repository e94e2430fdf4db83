use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{LoginRequest, RefreshTokenRequest};
use crate::models::users::requests::RegisterRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

// 请求体可省略，此时从 cookie 读取 refresh token
pub async fn refresh_token(
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> ActixResult<HttpResponse> {
    let refresh_request = body.map(|b| b.into_inner()).unwrap_or_default();
    AUTH_SERVICE.refresh_token(refresh_request, &req).await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn verify_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_token(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .service(
            web::scope("/api/auth")
                // 与 /login 等价的令牌获取入口
                .route("/token", web::post().to(login))
                .route("/token/refresh", web::post().to(refresh_token))
                .service(
                    web::resource("/verify-token")
                        .wrap(middlewares::RequireJWT)
                        .route(web::get().to(verify_token)),
                )
                .service(
                    web::resource("/me")
                        .wrap(middlewares::RequireJWT)
                        .route(web::get().to(get_user)),
                ),
        );
}
