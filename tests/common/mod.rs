//! 集成测试公共设施：内存 SQLite 存储、应用构建与请求辅助宏

#![allow(unused_macros, unused_imports, dead_code)]

use std::sync::Arc;

use rust_assignhub::storage::{Storage, create_storage_with_connection};
use sea_orm::{ConnectOptions, Database};

pub const PASSWORD: &str = "Secret123";

/// 创建已迁移的内存数据库存储
///
/// 内存库只存在于单个连接中，连接池必须固定为 1。
pub async fn setup_storage() -> Arc<dyn Storage> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("failed to open in-memory sqlite");
    create_storage_with_connection(db)
        .await
        .expect("failed to migrate in-memory sqlite")
}

/// 构建与生产环境一致的路由与错误处理器
macro_rules! init_app {
    ($storage:expr) => {
        init_app!($storage, rust_assignhub::policy::Policy::default())
    };
    ($storage:expr, $policy:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(rust_assignhub::utils::query_error_handler),
                )
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(rust_assignhub::utils::json_error_handler),
                )
                .app_data(actix_web::web::Data::new($storage.clone()))
                .app_data(actix_web::web::Data::new($policy))
                .configure(rust_assignhub::routes::configure_auth_routes)
                .configure(rust_assignhub::routes::configure_assignments_routes)
                .configure(rust_assignhub::routes::configure_submissions_routes)
                .configure(rust_assignhub::routes::configure_grades_routes),
        )
        .await
    };
}

/// 发送请求并返回 (状态码, JSON 响应体)
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}

/// 注册用户并返回 (用户 ID, access token)
macro_rules! register_user {
    ($app:expr, $email:expr, $role:expr) => {{
        let (status, body) = call_json!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/register")
                .set_json(serde_json::json!({
                    "email": $email,
                    "name": "Test User",
                    "password": common::PASSWORD,
                    "role": $role,
                }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{body}");
        let id = body["data"]["user"]["id"].as_i64().expect("user id");
        let access = body["data"]["access"]
            .as_str()
            .expect("access token")
            .to_string();
        (id, access)
    }};
}

/// 以 Bearer 方式附加令牌
macro_rules! authed {
    ($req:expr, $token:expr) => {
        $req.insert_header(("Authorization", format!("Bearer {}", $token)))
    };
}

/// 教师创建作业并返回作业 ID
macro_rules! create_assignment {
    ($app:expr, $teacher_token:expr, $student_id:expr) => {{
        let (status, body) = call_json!(
            $app,
            authed!(
                actix_web::test::TestRequest::post().uri("/assignmentapi"),
                $teacher_token
            )
            .set_json(serde_json::json!({
                "title": "Essay",
                "description": "Write about ownership",
                "assigned_to": $student_id,
            }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().expect("assignment id")
    }};
}

pub(crate) use authed;
pub(crate) use call_json;
pub(crate) use create_assignment;
pub(crate) use init_app;
pub(crate) use register_user;
