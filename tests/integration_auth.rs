mod common;

use axum::http::{Method, StatusCode};
use common::{app_for, create_level, jwt_config, send};
use serde_json::json;
use teval_auth::{Role, verify_token};
use teval_core::hash_password;
use teval_db::{MemoryStore, Store};
use teval_models::{NewAdmin, NewStudent, system_roles};

async fn seeded_app() -> (axum::Router, Store) {
    let store = Store::memory(MemoryStore::new());
    let level = create_level(&store, "College - 1st Year").await;

    store
        .admins
        .insert(NewAdmin {
            full_name: "Registrar".to_string(),
            email: "registrar@gsc.edu".to_string(),
            password: hash_password("adminpass123").unwrap(),
            role_id: system_roles::ADMIN,
        })
        .await
        .unwrap();

    store
        .students
        .insert(NewStudent {
            full_name: "Ana Cruz".to_string(),
            email: "ana@gsc.edu".to_string(),
            password: Some(hash_password("studentpass123").unwrap()),
            level_id: level.level_id,
            section_id: None,
            college_year_level: 1,
            role_id: system_roles::STUDENT,
        })
        .await
        .unwrap();

    store
        .students
        .insert(NewStudent {
            full_name: "Ben Reyes".to_string(),
            email: "ben@gsc.edu".to_string(),
            password: None,
            level_id: level.level_id,
            section_id: None,
            college_year_level: 1,
            role_id: system_roles::STUDENT,
        })
        .await
        .unwrap();

    (app_for(store.clone()), store)
}

async fn login(app: &axum::Router, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

#[tokio::test]
async fn test_admin_login() {
    let (app, _store) = seeded_app().await;

    let (status, body) = login(&app, "registrar@gsc.edu", "adminpass123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert_eq!(body["data"]["role"], "Admin");

    let token = body["data"]["accessToken"].as_str().unwrap();
    let claims = verify_token(token, &jwt_config()).unwrap();
    assert_eq!(claims.role(), Role::Admin);
    assert_eq!(claims.email, "registrar@gsc.edu");
}

#[tokio::test]
async fn test_student_login_reaches_dashboard() {
    let (app, store) = seeded_app().await;
    let student = store
        .students
        .find_by_email("ana@gsc.edu")
        .await
        .unwrap()
        .unwrap();

    let (status, body) = login(&app, "ana@gsc.edu", "studentpass123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Student");

    let token = body["data"]["accessToken"].as_str().unwrap();
    let (status, body) = send(&app, Method::GET, "/api/dashboard", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["view"], "student");
    assert_eq!(body["data"]["studentId"], student.student_id);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let (app, _store) = seeded_app().await;

    for (email, password) in [
        ("ana@gsc.edu", "wrong-password"),
        ("nobody@gsc.edu", "studentpass123"),
        ("ben@gsc.edu", "anything"),
    ] {
        let (status, body) = login(&app, email, password).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{email}");
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn test_login_validation() {
    let (app, _store) = seeded_app().await;

    let (status, body) = login(&app, "ana@gsc.edu", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ana@gsc.edu" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "password is required");
}
