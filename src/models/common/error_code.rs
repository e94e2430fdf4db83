use serde::Serialize;

/// 业务错误码，随响应体中的 `code` 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证相关
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserEmailInvalid = 2002,
    UserEmailAlreadyExists = 2003,
    UserPasswordInvalid = 2004,
    UserNameInvalid = 2005,
}
