mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_token, create_level, create_student, create_subject, create_teacher, enroll, send,
    setup_test_app, student_token,
};
use serde_json::json;

#[tokio::test]
async fn test_teacher_crud() {
    let (app, store) = setup_test_app();
    let level = create_level(&store, "Grade 12").await;
    let token = admin_token();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/teachers",
        Some(&token),
        Some(json!({ "fullName": "Maria Santos", "levelId": level.level_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Teacher created successfully");
    assert_eq!(body["data"]["levelName"], "Grade 12");
    let id = body["data"]["teacherId"].as_i64().unwrap();
    let uri = format!("/api/teachers/{}", id);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "teacherId": id, "fullName": "Maria L. Santos", "levelId": level.level_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fullName"], "Maria L. Santos");

    let (status, body) = send(&app, Method::GET, "/api/teachers", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Teacher deleted successfully");

    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Teacher not found");
}

#[tokio::test]
async fn test_create_teacher_with_unknown_level() {
    let (app, _store) = setup_test_app();
    let token = admin_token();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/teachers",
        Some(&token),
        Some(json!({ "fullName": "Maria Santos", "levelId": 77 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Level does not exist");
}

#[tokio::test]
async fn test_subject_crud_and_blocked_delete() {
    let (app, store) = setup_test_app();
    let level = create_level(&store, "Grade 12").await;
    let teacher = create_teacher(&store, level.level_id, "Maria Santos").await;
    let student = create_student(&store, level.level_id, "ana@gsc.edu").await;
    let token = admin_token();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/subjects",
        Some(&token),
        Some(json!({ "subjectName": "Algebra", "teacherId": teacher.teacher_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Subject created successfully");
    assert_eq!(body["data"]["teacherName"], "Maria Santos");
    let subject_id = body["data"]["subjectId"].as_i64().unwrap() as i32;

    let subject = store.subjects.find(subject_id).await.unwrap().unwrap();
    enroll(&store, student.student_id, &subject).await;

    let uri = format!("/api/subjects/{}", subject_id);
    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot delete subject. Subject may have enrollments.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/subjects",
        Some(&token),
        Some(json!({ "subjectName": "Physics", "teacherId": 404 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Teacher does not exist");
}

#[tokio::test]
async fn test_lookups() {
    let (app, _store) = setup_test_app();
    let token = admin_token();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/levels",
        Some(&token),
        Some(json!({ "levelName": "  College - 2nd Year  " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Level created successfully");
    assert_eq!(body["data"]["levelName"], "College - 2nd Year");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/levels",
        Some(&token),
        Some(json!({ "levelName": "College - 2nd Year" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Level already exists");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sections",
        Some(&token),
        Some(json!({ "sectionName": "Rizal" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sectionName"], "Rizal");

    let (status, body) = send(&app, Method::GET, "/api/sections", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/api/roles", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Student", "Admin", "Super Admin"]);

    let (status, _) = send(&app, Method::GET, "/api/levels", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_evaluation_flow() {
    let (app, store) = setup_test_app();
    let level = create_level(&store, "Grade 12").await;
    let santos = create_teacher(&store, level.level_id, "Maria Santos").await;
    let lim = create_teacher(&store, level.level_id, "Jose Lim").await;
    let algebra = create_subject(&store, santos.teacher_id, "Algebra").await;
    let student = create_student(&store, level.level_id, "ana@gsc.edu").await;
    enroll(&store, student.student_id, &algebra).await;
    let token = student_token(student.student_id);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/evaluations",
        Some(&token),
        Some(json!({ "teacherId": lim.teacher_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You are not enrolled with this teacher");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/evaluations",
        Some(&token),
        Some(json!({ "teacherId": santos.teacher_id, "comments": "  Clear lectures  " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Evaluation submitted successfully");
    assert_eq!(body["data"]["comments"], "Clear lectures");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/evaluations",
        Some(&token),
        Some(json!({ "teacherId": santos.teacher_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You have already evaluated this teacher");

    let (status, _) = send(&app, Method::GET, "/api/evaluations", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = admin_token();
    let (status, body) = send(&app, Method::GET, "/api/evaluations", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let evaluations = body["data"].as_array().unwrap();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0]["teacherName"], "Maria Santos");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/evaluations",
        Some(&admin),
        Some(json!({ "teacherId": santos.teacher_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _store) = setup_test_app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Teval API");
    assert!(body["paths"].get("/api/students").is_some());
}
