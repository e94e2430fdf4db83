use crate::models::users::entities::User;
use serde::Serialize;

// 注册响应：用户信息 + 令牌对
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    pub access: String,
    pub refresh: String,
}

// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct TokenVerificationResponse {
    pub is_valid: bool,
}
