use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt;
use crate::utils::password::verify_password;
use crate::utils::validate::normalize_email;

use super::AuthService;

const LOGIN_FAILED_MESSAGE: &str = "Email or password is incorrect";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    // 1. 根据邮箱获取用户信息
    let email = normalize_email(&login_request.email);
    let user = match storage.get_user_by_email(&email).await? {
        Some(user) if user.is_active => user,
        Some(user) => {
            tracing::info!("Login rejected for inactive user {}", user.id);
            return Ok(login_failed());
        }
        None => return Ok(login_failed()),
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        tracing::info!("Login failed for user {}: wrong password", user.id);
        return Ok(login_failed());
    }

    // 3. 生成令牌对
    let token_pair = user.generate_token_pair()?;
    tracing::info!("User {} logged in successfully", user.id);

    let refresh_cookie = jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access: token_pair.access_token,
        refresh: token_pair.refresh_token,
        expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}

fn login_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        LOGIN_FAILED_MESSAGE,
    ))
}
