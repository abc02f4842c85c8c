//! Repository traits: the operations the services need from the data store.
//!
//! Every method either succeeds, returns an empty result (`None`, `false`,
//! empty `Vec`), or fails with a [`RepositoryError`]. Deletes and updates report
//! whether a row was touched instead of failing when it is absent.

use async_trait::async_trait;
use teval_models::{
    AdminAccount, Enrollment, EnrollmentDetails, Evaluation, EvaluationDetails, Level, NewAdmin,
    NewEnrollment, NewEvaluation, NewStudent, NewSubject, NewTeacher, RoleRecord, Section,
    Student, StudentDetails, Subject, SubjectDetails, Teacher, TeacherWithLevel,
};

use crate::error::RepositoryResult;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list_details(&self) -> RepositoryResult<Vec<StudentDetails>>;
    async fn find(&self, student_id: i32) -> RepositoryResult<Option<Student>>;
    async fn find_details(&self, student_id: i32) -> RepositoryResult<Option<StudentDetails>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Student>>;
    /// Case-insensitive; `excluding` skips the student being updated.
    async fn email_exists(&self, email: &str, excluding: Option<i32>) -> RepositoryResult<bool>;
    async fn exists(&self, student_id: i32) -> RepositoryResult<bool>;
    async fn insert(&self, student: NewStudent) -> RepositoryResult<Student>;
    /// Replaces every column. Fails with `ConcurrencyConflict` when no row was written.
    async fn update(&self, student: &Student) -> RepositoryResult<()>;
    /// Fails with `ForeignKeyViolation` while enrollments or evaluations reference the student.
    async fn delete(&self, student_id: i32) -> RepositoryResult<bool>;
    async fn count(&self) -> RepositoryResult<i64>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn list_with_level(&self) -> RepositoryResult<Vec<TeacherWithLevel>>;
    async fn find(&self, teacher_id: i32) -> RepositoryResult<Option<Teacher>>;
    async fn find_with_level(&self, teacher_id: i32) -> RepositoryResult<Option<TeacherWithLevel>>;
    /// Ordered by teacher id.
    async fn find_many_with_level(&self, teacher_ids: &[i32])
    -> RepositoryResult<Vec<TeacherWithLevel>>;
    async fn insert(&self, teacher: NewTeacher) -> RepositoryResult<Teacher>;
    async fn update(&self, teacher: &Teacher) -> RepositoryResult<bool>;
    async fn delete(&self, teacher_id: i32) -> RepositoryResult<bool>;
    async fn count(&self) -> RepositoryResult<i64>;
}

#[async_trait]
pub trait SubjectRepository: Send + Sync {
    async fn list_details(&self) -> RepositoryResult<Vec<SubjectDetails>>;
    async fn find(&self, subject_id: i32) -> RepositoryResult<Option<Subject>>;
    async fn find_details(&self, subject_id: i32) -> RepositoryResult<Option<SubjectDetails>>;
    async fn insert(&self, subject: NewSubject) -> RepositoryResult<Subject>;
    async fn update(&self, subject: &Subject) -> RepositoryResult<bool>;
    async fn delete(&self, subject_id: i32) -> RepositoryResult<bool>;
}

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn list_details(&self) -> RepositoryResult<Vec<EnrollmentDetails>>;
    async fn find(&self, enrollment_id: i32) -> RepositoryResult<Option<Enrollment>>;
    async fn find_details(&self, enrollment_id: i32)
    -> RepositoryResult<Option<EnrollmentDetails>>;
    async fn find_details_many(
        &self,
        enrollment_ids: &[i32],
    ) -> RepositoryResult<Vec<EnrollmentDetails>>;
    async fn exists_for(&self, student_id: i32, subject_id: i32) -> RepositoryResult<bool>;
    /// Persists the batch atomically. Pairs that already exist are skipped,
    /// so the result may be shorter than the input.
    async fn insert_many(&self, enrollments: &[NewEnrollment])
    -> RepositoryResult<Vec<Enrollment>>;
    async fn update(&self, enrollment: &Enrollment) -> RepositoryResult<bool>;
    async fn delete(&self, enrollment_id: i32) -> RepositoryResult<bool>;
    /// Teacher ids of the student's enrollments, in enrollment order.
    async fn teacher_ids_for_student(&self, student_id: i32) -> RepositoryResult<Vec<i32>>;
}

#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    async fn list_details(&self) -> RepositoryResult<Vec<EvaluationDetails>>;
    async fn insert(&self, evaluation: NewEvaluation) -> RepositoryResult<Evaluation>;
    async fn count(&self) -> RepositoryResult<i64>;
    async fn teacher_ids_for_student(&self, student_id: i32) -> RepositoryResult<Vec<i32>>;
}

#[async_trait]
pub trait LookupRepository: Send + Sync {
    async fn levels(&self) -> RepositoryResult<Vec<Level>>;
    async fn find_level(&self, level_id: i32) -> RepositoryResult<Option<Level>>;
    async fn insert_level(&self, level_name: &str) -> RepositoryResult<Level>;
    async fn sections(&self) -> RepositoryResult<Vec<Section>>;
    async fn insert_section(&self, section_name: &str) -> RepositoryResult<Section>;
    async fn roles(&self) -> RepositoryResult<Vec<RoleRecord>>;
}

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<AdminAccount>>;
    async fn insert(&self, admin: NewAdmin) -> RepositoryResult<AdminAccount>;
}
