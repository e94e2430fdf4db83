use serde::Deserialize;

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// 邮箱
    pub email: String,
    /// 密码
    pub password: String,
}

// 刷新令牌请求，refresh 缺省时回退到 cookie
#[derive(Debug, Default, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}
