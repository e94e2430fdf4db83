use super::entities::UserRole;
use serde::Deserialize;

// 用户注册请求（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
}

// 用户创建请求（用于存储层，password 已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_admin: bool,
}
