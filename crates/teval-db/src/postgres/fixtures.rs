//! Rows shared by the PostgreSQL repository tests.

use teval_models::{NewStudent, NewSubject, NewTeacher, system_roles};

use super::PgStore;
use crate::repository::{LookupRepository, StudentRepository, SubjectRepository, TeacherRepository};

/// One student, one teacher, and one subject owned by that teacher, all at one level.
pub struct Seeded {
    pub level_id: i32,
    pub student_id: i32,
    pub teacher_id: i32,
    pub subject_id: i32,
}

pub fn new_student(email: &str, level_id: i32) -> NewStudent {
    NewStudent {
        full_name: "Ana Cruz".into(),
        email: email.into(),
        password: None,
        level_id,
        section_id: None,
        college_year_level: 0,
        role_id: system_roles::STUDENT,
    }
}

pub async fn seed(store: &PgStore) -> Seeded {
    let level = store.insert_level("Grade 10").await.unwrap();
    let teacher = TeacherRepository::insert(
        store,
        NewTeacher {
            full_name: "Maria Santos".into(),
            level_id: level.level_id,
        },
    )
    .await
    .unwrap();
    let subject = SubjectRepository::insert(
        store,
        NewSubject {
            subject_name: "Algebra".into(),
            teacher_id: teacher.teacher_id,
        },
    )
    .await
    .unwrap();
    let student = StudentRepository::insert(store, new_student("ana@gsc.edu", level.level_id))
        .await
        .unwrap();

    Seeded {
        level_id: level.level_id,
        student_id: student.student_id,
        teacher_id: teacher.teacher_id,
        subject_id: subject.subject_id,
    }
}
