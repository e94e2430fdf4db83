mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{authed, call_json, create_assignment, init_app, register_user};
use rust_assignhub::errors::AssignHubError;
use rust_assignhub::models::assignments::requests::CreateAssignmentRequest;
use rust_assignhub::models::grades::requests::CreateGradeRequest;
use rust_assignhub::models::users::entities::UserRole;
use rust_assignhub::models::users::requests::CreateUserRequest;
use rust_assignhub::policy::Policy;

#[actix_web::test]
async fn test_only_creator_can_grade() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (_, creator) = register_user!(app, "t1@example.com", "teacher");
    let (_, other) = register_user!(app, "t2@example.com", "teacher");
    let (student_id, student) = register_user!(app, "s1@example.com", "student");
    let assignment_id = create_assignment!(app, creator, student_id);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), other)
            .set_json(json!({"assignment_id": assignment_id, "score": 90}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 1003);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), student)
            .set_json(json!({"assignment_id": assignment_id, "score": 100}))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let grade = storage
        .get_grade_by_assignment_id(assignment_id)
        .await
        .expect("query grade");
    assert!(grade.is_none());
}

#[actix_web::test]
async fn test_grade_without_submission_allowed_by_default() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (teacher_id, teacher) = register_user!(app, "t3@example.com", "teacher");
    let (student_id, _) = register_user!(app, "s2@example.com", "student");
    let assignment_id = create_assignment!(app, teacher, student_id);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), teacher)
            .set_json(json!({"assignment": assignment_id, "score": 75}))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["score"], 75);
    assert_eq!(body["data"]["graded_by"], teacher_id);
    assert_eq!(body["data"]["graded_to"], student_id);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), teacher)
            .set_json(json!({"assignment_id": assignment_id, "score": 80}))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1009);

    let grade = storage
        .get_grade_by_assignment_id(assignment_id)
        .await
        .expect("query grade")
        .expect("grade exists");
    assert_eq!(grade.score, 75);
}

#[actix_web::test]
async fn test_grade_requires_submission_when_enabled() {
    let storage = common::setup_storage().await;
    let policy = Policy {
        require_submission_before_grade: true,
        ..Policy::default()
    };
    let app = init_app!(storage, policy);
    let (_, teacher) = register_user!(app, "t4@example.com", "teacher");
    let (student_id, student) = register_user!(app, "s3@example.com", "student");
    let assignment_id = create_assignment!(app, teacher, student_id);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), teacher)
            .set_json(json!({"assignment_id": assignment_id, "score": 60}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), student).set_json(json!({
            "assignment_id": assignment_id,
            "solution_text": "Finished",
        }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), teacher)
            .set_json(json!({"assignment_id": assignment_id, "score": 60}))
    );
    assert_eq!(status, StatusCode::CREATED);
}

#[actix_web::test]
async fn test_graded_to_must_match_assignee() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (_, teacher) = register_user!(app, "t5@example.com", "teacher");
    let (student_id, _) = register_user!(app, "s4@example.com", "student");
    let (other_id, _) = register_user!(app, "s5@example.com", "student");
    let assignment_id = create_assignment!(app, teacher, student_id);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), teacher).set_json(json!({
            "assignment_id": assignment_id,
            "score": 88,
            "graded_to": other_id,
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), teacher)
            .set_json(json!({"assignment_id": 5150, "score": 88}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), teacher).set_json(json!({
            "assignment_id": assignment_id,
            "score": 88,
            "graded_to": student_id,
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["graded_to"], student_id);
}

#[actix_web::test]
async fn test_grading_closes_assignment() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (_, teacher) = register_user!(app, "t6@example.com", "teacher");
    let (student_id, student) = register_user!(app, "s6@example.com", "student");
    let assignment_id = create_assignment!(app, teacher, student_id);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/gradeapi"), teacher)
            .set_json(json!({"assignment_id": assignment_id, "score": 95}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let grade_id = body["data"]["id"].as_i64().expect("grade id");

    let (_, body) = call_json!(
        app,
        authed!(
            test::TestRequest::get().uri(&format!("/assignmentapi/{assignment_id}")),
            student
        )
    );
    assert_eq!(body["data"]["state"], "graded");

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::post().uri("/submissionapi"), student).set_json(json!({
            "assignment_id": assignment_id,
            "solution_text": "Too late",
        }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call_json!(
        app,
        authed!(
            test::TestRequest::get().uri(&format!("/gradeapi/{grade_id}")),
            student
        )
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score"], 95);
}

#[actix_web::test]
async fn test_list_for_student_only_shows_own_grades() {
    let storage = common::setup_storage().await;
    let app = init_app!(storage);
    let (_, teacher) = register_user!(app, "t7@example.com", "teacher");
    let (x_id, x) = register_user!(app, "x@example.com", "student");
    let (y_id, y) = register_user!(app, "y@example.com", "student");

    for (student_id, score) in [(x_id, 70), (y_id, 85)] {
        let assignment_id = create_assignment!(app, teacher, student_id);
        let (status, _) = call_json!(
            app,
            authed!(test::TestRequest::post().uri("/gradeapi"), teacher)
                .set_json(json!({"assignment_id": assignment_id, "score": score}))
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/gradeapi/list-for-student"), x)
    );
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["graded_to"], x_id);
    assert_eq!(items[0]["score"], 70);

    // 旧路径
    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/view-grade"), y)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["score"], 85);

    let (status, _) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/view-grade"), teacher)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call_json!(
        app,
        authed!(test::TestRequest::get().uri("/gradeapi"), teacher)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 2);
}

#[actix_web::test]
async fn test_storage_rejects_duplicate_grade() {
    let storage = common::setup_storage().await;
    let teacher = storage
        .create_user(CreateUserRequest {
            email: "t8@example.com".to_string(),
            name: "Teacher".to_string(),
            password_hash: "unused".to_string(),
            role: UserRole::Teacher,
            is_admin: false,
        })
        .await
        .expect("create teacher");
    let student = storage
        .create_user(CreateUserRequest {
            email: "s8@example.com".to_string(),
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
                title: "Quiz".to_string(),
                description: String::new(),
                assigned_to: student.id,
            },
        )
        .await
        .expect("create assignment");

    let grade = |score: i32| CreateGradeRequest {
        assignment_id: assignment.id,
        score,
        graded_to: None,
    };

    // 绕过服务层状态检查，模拟并发评分中的后到者
    storage
        .create_grade(teacher.id, student.id, grade(90))
        .await
        .expect("first grade");
    let second = storage.create_grade(teacher.id, student.id, grade(40)).await;
    assert!(
        matches!(second, Err(AssignHubError::Conflict(_))),
        "{second:?}"
    );

    let stored = storage
        .get_grade_by_assignment_id(assignment.id)
        .await
        .expect("query grade")
        .expect("grade exists");
    assert_eq!(stored.score, 90);
}
