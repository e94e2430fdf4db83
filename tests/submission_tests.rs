mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{authed, call_json, create_assignment, init_app, register_user};
use rust_assignhub::errors::AssignHubError;
use rust_assignhub::models::assignments::requests::CreateAssignmentRequest;
use rust_assignhub::models::submissions::requests::{CreateSubmissionRequest, SubmissionListQuery};
use rust_assignhub::models::users::entities::UserRole;
use rust_assignhub::models::users::requests::CreateUserRequest;

#[actix_web::test]
async fn test_second_submission_is_conflict() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (_, teacher) = register_user!(app, "t1@example.com", "teacher");
    let (student_id, student) = register_user!(app, "s1@example.com", "student");
    let assignment_id = create_assignment!(app, teacher, student_id);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), student).set_json(json!({
            "assignment_id": assignment_id,
            "solution_text": "Borrowing rules explained",
        }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["assignment_id"], assignment_id);
    assert_eq!(body["data"]["submitted_by"], student_id);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), student).set_json(json!({
            "assignment": assignment_id,
            "solution_text": "Second attempt",
        }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1009);

    let page = storage
        .list_submissions_with_pagination(SubmissionListQuery::default())
        .await
        .expect("list submissions");
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].solution_text, "Borrowing rules explained");
}

#[actix_web::test]
async fn test_only_assigned_student_can_submit() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (_, teacher) = register_user!(app, "t2@example.com", "teacher");
    let (student_id, _) = register_user!(app, "s2@example.com", "student");
    let (_, outsider) = register_user!(app, "s3@example.com", "student");
    let assignment_id = create_assignment!(app, teacher, student_id);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), outsider).set_json(json!({
            "assignment_id": assignment_id,
            "solution_text": "Not mine",
        }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 1003);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), teacher).set_json(json!({
            "assignment_id": assignment_id,
            "solution_text": "Teacher answer",
        }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let found = storage
        .get_submission_by_assignment_id(assignment_id)
        .await
        .expect("query submission");
    assert!(found.is_none());
}

#[actix_web::test]
async fn test_submission_validation() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (_, teacher) = register_user!(app, "t3@example.com", "teacher");
    let (student_id, student) = register_user!(app, "s4@example.com", "student");
    let assignment_id = create_assignment!(app, teacher, student_id);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), student).set_json(json!({
            "assignment_id": assignment_id,
            "solution_text": "  ",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), student).set_json(json!({
            "assignment_id": 31337,
            "solution_text": "Answer",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), student)
            .set_json(json!({"solution_text": "Answer"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);
}

#[actix_web::test]
async fn test_submission_moves_assignment_to_submitted() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (_, teacher) = register_user!(app, "t4@example.com", "teacher");
    let (student_id, student) = register_user!(app, "s5@example.com", "student");
    let assignment_id = create_assignment!(app, teacher, student_id);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), student).set_json(json!({
            "assignment_id": assignment_id,
            "solution_text": "Done",
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let submission_id = body["data"]["id"].as_i64().expect("submission id");

    let (_, body) = call_json!(
        app,
        authed!(
            test::TestRequest::get().uri(&format!("/assignmentapi/{assignment_id}")),
            teacher
        )
    );
    assert_eq!(body["data"]["state"], "submitted");

    let (status, body) = call_json!(
        app,
        authed!(
            test::TestRequest::get().uri(&format!("/submissionapi/{submission_id}")),
            teacher
        )
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["solution_text"], "Done");

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/submissionapi/999"), teacher)
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_for_teacher_only_shows_own_assignments() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (_, alice) = register_user!(app, "alice@example.com", "teacher");
    let (_, bob) = register_user!(app, "bob@example.com", "teacher");
    let (student_id, student) = register_user!(app, "s6@example.com", "student");

    let for_alice = create_assignment!(app, alice, student_id);
    let for_bob = create_assignment!(app, bob, student_id);
    for assignment_id in [for_alice, for_bob] {
        let (status, _) = call_json!(
            app,
            authed!(test::TestRequest::post().uri("/submissionapi"), student).set_json(json!({
                "assignment_id": assignment_id,
                "solution_text": "Answer",
            }))
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = call_json!(
        app,
        authed!(
            test::TestRequest::get().uri("/submissionapi/list-for-teacher"),
            alice
        )
    );
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["assignment_id"], for_alice);

    // 旧路径
    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/list-submission"), bob)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["assignment_id"], for_bob);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/submissionapi"), student)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 2);

    let (status, _) = call_json!(
        app,
        authed!(
            test::TestRequest::get().uri("/submissionapi/list-for-teacher"),
            student
        )
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_storage_rejects_duplicate_submission() {
    let storage = common::setup_storage().await;
    let teacher = storage
        .create_user(CreateUserRequest {
            email: "t5@example.com".to_string(),
            name: "Teacher".to_string(),
            password_hash: "unused".to_string(),
            role: UserRole::Teacher,
            is_admin: false,
        })
        .await
        .expect("create teacher");
    let student = storage
        .create_user(CreateUserRequest {
            email: "s7@example.com".to_string(),
            name: "Student".to_string(),
            password_hash: "unused".to_string(),
            role: UserRole::Student,
            is_admin: false,
        })
        .await
        .expect("create student");
    let assignment = storage
        .create_assignment(
            teacher.id,
            CreateAssignmentRequest {
                title: "Essay".to_string(),
                description: String::new(),
                assigned_to: student.id,
            },
        )
        .await
        .expect("create assignment");

    let submit = |text: &str| CreateSubmissionRequest {
        assignment_id: assignment.id,
        solution_text: text.to_string(),
    };

    // 绕过服务层状态检查，模拟并发提交中的后到者
    storage
        .create_submission(student.id, submit("first"))
        .await
        .expect("first submission");
    let second = storage.create_submission(student.id, submit("second")).await;
    assert!(
        matches!(second, Err(AssignHubError::Conflict(_))),
        "{second:?}"
    );

    let stored = storage
        .get_submission_by_assignment_id(assignment.id)
        .await
        .expect("query submission")
        .expect("submission exists");
    assert_eq!(stored.solution_text, "first");
}
