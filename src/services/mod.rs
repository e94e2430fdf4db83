pub mod assignments;
pub mod auth;
pub mod grades;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use grades::GradeService;
pub use submissions::SubmissionService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::errors::{AssignHubError, Result};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::storage::Storage;

// 从 app_data 中获取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AssignHubError::database_connection("Storage not found in app data"))
}

// 获取 RequireJWT 写入的当前用户
pub(crate) fn current_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user_claims(request)
        .ok_or_else(|| AssignHubError::authentication("Unauthorized access, please login"))
}
