use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AssignHubError;
use crate::models::auth::{
    RefreshTokenRequest,
    responses::{RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    refresh_request: RefreshTokenRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 优先使用请求体中的 refresh，其次是 cookie
    let refresh_token = refresh_request
        .refresh
        .filter(|token| !token.trim().is_empty())
        .or_else(|| jwt::JwtUtils::extract_refresh_token_from_cookie(request));

    let Some(refresh_token) = refresh_token else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Refresh token is required",
        )));
    };

    let user = match resolve_refresh_user(service, &refresh_token, request).await {
        Ok(user) => user,
        Err(e) if e.is_internal() => return Err(e.into()),
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();

            return Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                ),
            ));
        }
    };

    let access = jwt::JwtUtils::generate_access_token(user.id, &user.role.to_string())
        .map_err(AssignHubError::from)?;

    let response = RefreshTokenResponse {
        access,
        expires_in: config.jwt.access_token_expiry * 60,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Token refreshed successfully",
    )))
}

// 校验 refresh token 并确认用户仍然存在且处于启用状态
async fn resolve_refresh_user(
    service: &AuthService,
    refresh_token: &str,
    request: &HttpRequest,
) -> Result<crate::models::users::entities::User, AssignHubError> {
    let claims = jwt::JwtUtils::verify_refresh_token(refresh_token)
        .map_err(|e| AssignHubError::authentication(format!("Invalid refresh token: {e}")))?;
    let user_id = claims
        .user_id()
        .map_err(|_| AssignHubError::authentication("Invalid user ID in refresh token"))?;

    let storage = service.get_storage(request)?;
    match storage.get_user_by_id(user_id).await? {
        Some(user) if user.is_active => Ok(user),
        Some(_) => Err(AssignHubError::authentication("User is not active")),
        None => Err(AssignHubError::authentication("User not found")),
    }
}

pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = crate::services::current_user(request)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse { user },
        "User information retrieved successfully",
    )))
}
