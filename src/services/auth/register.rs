use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::AssignHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::RegisterResponse,
    users::requests::{CreateUserRequest, RegisterRequest},
};
use crate::storage::Storage;
use crate::utils::jwt;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    normalize_email, validate_email, validate_name, validate_password_simple,
};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let email = normalize_email(&register_request.email);
    let name = register_request.name.trim().to_string();

    // 1. 验证邮箱
    if let Err(msg) = validate_email(&email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }

    // 2. 验证姓名
    if let Err(msg) = validate_name(&name) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }

    // 3. 验证密码策略
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    // 4. 检查邮箱是否已存在
    if let Err(response) = check_email_exists(&storage, &email).await {
        return Ok(response);
    }

    // 5. 哈希密码并创建用户
    let password_hash = hash_password(&register_request.password)?;
    let create_request = CreateUserRequest {
        email,
        name,
        password_hash,
        role: register_request.role,
        is_admin: false,
    };

    let user = match storage.create_user(create_request).await {
        Ok(user) => user,
        // 并发注册时由唯一索引兜底
        Err(AssignHubError::Conflict(msg)) => {
            return Ok(bad_request(ErrorCode::UserEmailAlreadyExists, msg));
        }
        Err(e) => {
            tracing::error!("Failed to register user: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            );
        }
    };

    // 6. 签发令牌
    let token_pair = user.generate_token_pair()?;
    tracing::info!("User {} registered as {}", user.id, user.role);

    let refresh_cookie = jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = RegisterResponse {
        user,
        access: token_pair.access_token,
        refresh: token_pair.refresh_token,
    };

    Ok(HttpResponse::Created()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Registration successful")))
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(bad_request(
            ErrorCode::UserEmailAlreadyExists,
            "A user with this email already exists",
        )),
        Ok(None) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to check email during registration: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            )
        }
    }
}

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}
