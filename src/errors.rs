//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称，
//! 并通过 `ResponseError` 映射为 HTTP 状态码与统一响应结构。

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_assignhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum AssignHubError {
            $($variant(String),)*
        }

        impl AssignHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AssignHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AssignHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AssignHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AssignHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AssignHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_assignhub_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
    Conflict("E011", "Conflict Error"),
    TokenIssue("E012", "Token Issue Error"),
}

impl AssignHubError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AssignHubError::Validation(_) => ErrorCode::BadRequest,
            AssignHubError::Authentication(_) => ErrorCode::Unauthorized,
            AssignHubError::Authorization(_) => ErrorCode::Forbidden,
            AssignHubError::NotFound(_) => ErrorCode::NotFound,
            AssignHubError::Conflict(_) => ErrorCode::Conflict,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 是否为服务端内部错误（详情只记录日志，不返回给客户端）
    pub fn is_internal(&self) -> bool {
        self.error_code() == ErrorCode::InternalServerError
    }
}

impl fmt::Display for AssignHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AssignHubError {}

impl ResponseError for AssignHubError {
    fn status_code(&self) -> StatusCode {
        match self {
            AssignHubError::Validation(_) => StatusCode::BAD_REQUEST,
            AssignHubError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AssignHubError::Authorization(_) => StatusCode::FORBIDDEN,
            AssignHubError::NotFound(_) => StatusCode::NOT_FOUND,
            AssignHubError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_internal() {
            tracing::error!("{} [{}]", self.format_simple(), self.code());
            "Internal server error"
        } else {
            self.message()
        };

        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.error_code(), message))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AssignHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        AssignHubError::DatabaseOperation(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AssignHubError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AssignHubError::TokenIssue(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssignHubError>;
