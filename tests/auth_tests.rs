mod common;

use actix_web::{cookie::Cookie, http::StatusCode, test};
use serde_json::json;

use common::{authed, call_json, init_app, register_user};

#[actix_web::test]
async fn test_register_returns_user_and_tokens() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri("/register").set_json(json!({
            "email": "alice@Example.COM",
            "name": "  Alice  ",
            "password": common::PASSWORD,
            "role": "student",
        }))
    );

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 0);
    let user = &body["data"]["user"];
    assert_eq!(user["email"], "alice@example.com");
    assert_eq!(user["name"], "Alice");
    assert_eq!(user["role"], "student");
    assert!(user.get("password_hash").is_none());
    assert!(body["data"]["access"].as_str().is_some());
    assert!(body["data"]["refresh"].as_str().is_some());
}

#[actix_web::test]
async fn test_register_duplicate_email_is_rejected() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);

    register_user!(app, "bob@example.com", "teacher");

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri("/register").set_json(json!({
            "email": "bob@example.com",
            "name": "Another Bob",
            "password": common::PASSWORD,
            "role": "student",
        }))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2003);
    assert_eq!(storage.count_users().await.expect("count"), 1);
}

#[actix_web::test]
async fn test_register_validation_errors() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);

    let cases = [
        json!({"email": "not-an-email", "name": "X", "password": common::PASSWORD, "role": "student"}),
        json!({"email": "x@example.com", "name": "   ", "password": common::PASSWORD, "role": "student"}),
        json!({"email": "x@example.com", "name": "X", "password": "short", "role": "student"}),
        json!({"email": "x@example.com", "name": "X", "password": common::PASSWORD, "role": "admin"}),
        json!({"email": "x@example.com", "name": "X", "password": common::PASSWORD}),
    ];

    for case in cases {
        let (status, body) = call_json!(
            app,
            test::TestRequest::post().uri("/register").set_json(&case)
        );
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case} -> {body}");
        assert_ne!(body["code"], 0);
    }

    assert_eq!(storage.count_users().await.expect("count"), 0);
}

#[actix_web::test]
async fn test_login_with_wrong_password_issues_nothing() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    register_user!(app, "carol@example.com", "teacher");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"email": "carol@example.com", "password": "Wrong1234"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.response().cookies().next().is_none());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.get("data").is_none());
    assert_eq!(body["code"], 2000);
}

#[actix_web::test]
async fn test_login_unknown_email() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);

    let (status, _) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"email": "nobody@example.com", "password": common::PASSWORD}))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_and_token_alias() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (id, _) = register_user!(app, "dave@example.com", "student");

    for uri in ["/login", "/api/auth/token"] {
        let (status, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri(uri)
                .set_json(json!({"email": "dave@EXAMPLE.com", "password": common::PASSWORD}))
        );
        assert_eq!(status, StatusCode::OK, "{uri}: {body}");
        assert_eq!(body["data"]["user"]["id"], id);
        assert_eq!(body["data"]["expires_in"], 15 * 60);
        assert!(body["data"]["access"].as_str().is_some());
        assert!(body["data"]["refresh"].as_str().is_some());
    }
}

#[actix_web::test]
async fn test_me_and_verify_token() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (id, access) = register_user!(app, "erin@example.com", "teacher");

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/api/auth/me"), access)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["id"], id);
    assert_eq!(body["data"]["user"]["role"], "teacher");

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/api/auth/verify-token"), access)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_valid"], true);

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/api/auth/me"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);
}

#[actix_web::test]
async fn test_refresh_from_body_and_cookie() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "email": "frank@example.com",
                "name": "Frank",
                "password": common::PASSWORD,
                "role": "student",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .map(|c| c.value().to_string())
        .expect("refresh cookie");
    let body: serde_json::Value = test::read_body_json(resp).await;
    let refresh = body["data"]["refresh"].as_str().expect("refresh").to_string();
    assert_eq!(cookie, refresh);

    // 请求体
    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/token/refresh")
            .set_json(json!({ "refresh": refresh }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    let new_access = body["data"]["access"].as_str().expect("access").to_string();

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/api/auth/me"), new_access)
    );
    assert_eq!(status, StatusCode::OK);

    // cookie
    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/token/refresh")
            .cookie(Cookie::new("refresh_token", cookie))
    );
    assert_eq!(status, StatusCode::OK, "{body}");

    // 两者都没有
    let (status, _) = call_json!(
        app,
        test::TestRequest::post().uri("/api/auth/token/refresh")
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_token_types_are_not_interchangeable() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri("/register").set_json(json!({
            "email": "grace@example.com",
            "name": "Grace",
            "password": common::PASSWORD,
            "role": "teacher",
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let access = body["data"]["access"].as_str().expect("access").to_string();
    let refresh = body["data"]["refresh"].as_str().expect("refresh").to_string();

    // refresh token 不能当作 access token
    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/api/auth/me"), refresh)
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // access token 不能用于刷新
    let (status, _) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/token/refresh")
            .set_json(json!({ "refresh": access }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_malformed_json_uses_envelope() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/login")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);
}
