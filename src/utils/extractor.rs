//! 安全的路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则返回 400 而不是 actix 默认的 404。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::errors::AssignHubError;

/// 解析路径参数为正整数 ID
pub fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, AssignHubError> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| AssignHubError::validation(format!("Missing path parameter: {name}")))?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AssignHubError::validation(format!(
            "Invalid {name}: '{raw}', expected a positive integer"
        ))),
    }
}

/// 路径中的 `{id}` 参数
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            parse_path_id(req, "id")
                .map(SafeIDI64)
                .map_err(actix_web::Error::from),
        )
    }
}
