//! Fixtures for service tests, backed by the in-memory store.

use teval_db::{MemoryStore, Store};
use teval_models::{
    Level, NewEnrollment, NewEvaluation, NewStudent, NewSubject, NewTeacher, Student, Subject,
    Teacher, system_roles,
};

pub fn store() -> Store {
    Store::memory(MemoryStore::new())
}

pub async fn level(store: &Store, name: &str) -> Level {
    store.lookups.insert_level(name).await.unwrap()
}

pub async fn teacher(store: &Store, level_id: i32, full_name: &str) -> Teacher {
    store
        .teachers
        .insert(NewTeacher {
            full_name: full_name.to_string(),
            level_id,
        })
        .await
        .unwrap()
}

pub async fn subject(store: &Store, teacher_id: i32, name: &str) -> Subject {
    store
        .subjects
        .insert(NewSubject {
            subject_name: name.to_string(),
            teacher_id,
        })
        .await
        .unwrap()
}

pub async fn student(store: &Store, level_id: i32, email: &str) -> Student {
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
