use actix_web::{
    HttpRequest,
    error::{JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::errors::AssignHubError;

/// JSON 请求体解析错误处理器，统一返回 400
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload error on {}: {}", req.path(), err);

    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        other => format!("Invalid JSON payload: {other}"),
    };

    AssignHubError::validation(message).into()
}

/// 查询参数解析错误处理器，统一返回 400
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Query parameter error on {}: {}", req.path(), err);

    AssignHubError::validation(format!("Invalid query parameters: {err}")).into()
}
