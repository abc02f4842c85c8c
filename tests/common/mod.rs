#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use teval::router::init_router;
use teval::state::AppState;
use teval_auth::{create_access_token, role};
use teval_config::{CorsConfig, JwtConfig};
use teval_db::{MemoryStore, Store};
use teval_models::{
    Level, NewEnrollment, NewEvaluation, NewStudent, NewSubject, NewTeacher, Student, Subject,
    Teacher, system_roles,
};
use tower::ServiceExt;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

/// A fresh in-memory store and an app serving it.
pub fn setup_test_app() -> (Router, Store) {
    let store = Store::memory(MemoryStore::new());
    (app_for(store.clone()), store)
}

pub fn app_for(store: Store) -> Router {
    let state = AppState::new(
        store,
        jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    );
    init_router(state)
}

pub fn admin_token() -> String {
    create_access_token(1, "registrar@gsc.edu", role::ADMIN, &jwt_config()).unwrap()
}

pub fn super_admin_token() -> String {
    create_access_token(2, "principal@gsc.edu", role::SUPER_ADMIN, &jwt_config()).unwrap()
}

pub fn student_token(student_id: i32) -> String {
    create_access_token(student_id, "student@gsc.edu", role::STUDENT, &jwt_config()).unwrap()
}

pub fn token_with_role(role: &str) -> String {
    create_access_token(99, "someone@gsc.edu", role, &jwt_config()).unwrap()
}

/// Sends one request and returns the status and the parsed JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn create_level(store: &Store, name: &str) -> Level {
    store.lookups.insert_level(name).await.unwrap()
}

pub async fn create_teacher(store: &Store, level_id: i32, full_name: &str) -> Teacher {
    store
        .teachers
        .insert(NewTeacher {
            full_name: full_name.to_string(),
            level_id,
        })
        .await
        .unwrap()
}

pub async fn create_subject(store: &Store, teacher_id: i32, name: &str) -> Subject {
    store
        .subjects
        .insert(NewSubject {
            subject_name: name.to_string(),
            teacher_id,
        })
        .await
        .unwrap()
}

pub async fn create_student(store: &Store, level_id: i32, email: &str) -> Student {
    store
        .students
        .insert(NewStudent {
            full_name: "Ana Cruz".to_string(),
            email: email.to_string(),
            password: None,
            level_id,
            section_id: None,
            college_year_level: 0,
            role_id: system_roles::STUDENT,
        })
        .await
        .unwrap()
}

pub async fn enroll(store: &Store, student_id: i32, subject: &Subject) {
    store
        .enrollments
        .insert_many(&[NewEnrollment {
            student_id,
            subject_id: subject.subject_id,
            teacher_id: subject.teacher_id,
        }])
        .await
        .unwrap();
}

pub async fn evaluate(store: &Store, student_id: i32, teacher_id: i32) {
    store
        .evaluations
        .insert(NewEvaluation {
            student_id,
            teacher_id,
            comments: None,
        })
        .await
        .unwrap();
}
