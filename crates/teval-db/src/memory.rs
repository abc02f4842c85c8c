//! Volatile in-process store.
//!
//! Mirrors the PostgreSQL schema closely enough for the services to behave the
//! same on both backends: identity keys, unique constraints (including the
//! case-insensitive student email index) and restrict-on-delete foreign keys
//! surface as the same [`RepositoryError`] variants.
//!
//! The lock is never held across an `.await`.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use teval_models::{
    AdminAccount, Enrollment, EnrollmentDetails, Evaluation, EvaluationDetails, Level, NewAdmin,
    NewEnrollment, NewEvaluation, NewStudent, NewSubject, NewTeacher, RoleRecord, Section,
    Student, StudentDetails, Subject, SubjectDetails, Teacher, TeacherWithLevel, system_roles,
};

use crate::error::{RepositoryError, RepositoryResult};
use crate::repository::{
    AdminRepository, EnrollmentRepository, EvaluationRepository, LookupRepository,
    StudentRepository, SubjectRepository, TeacherRepository,
};

/// Failure injected into the next student update, simulating a concurrent writer.
#[cfg(feature = "test-utils")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateConflict {
    /// Another request deleted the row between read and write.
    RowDeleted,
    /// Another request touched the row; the write matched nothing but the row is still there.
    RowChanged,
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    roles: BTreeMap<i32, RoleRecord>,
    levels: BTreeMap<i32, Level>,
    sections: BTreeMap<i32, Section>,
    admins: BTreeMap<i32, AdminAccount>,
    students: BTreeMap<i32, Student>,
    teachers: BTreeMap<i32, Teacher>,
    subjects: BTreeMap<i32, Subject>,
    enrollments: BTreeMap<i32, Enrollment>,
    evaluations: BTreeMap<i32, Evaluation>,
    sequences: Sequences,
    #[cfg(feature = "test-utils")]
    student_update_conflict: Option<UpdateConflict>,
}

#[derive(Debug, Default)]
struct Sequences {
    level: i32,
    section: i32,
    admin: i32,
    student: i32,
    teacher: i32,
    subject: i32,
    enrollment: i32,
    evaluation: i32,
}

fn next(sequence: &mut i32) -> i32 {
    *sequence += 1;
    *sequence
}

fn fk(constraint: &str) -> RepositoryError {
    RepositoryError::ForeignKeyViolation(constraint.to_string())
}

fn unique(constraint: &str) -> RepositoryError {
    RepositoryError::UniqueViolation(constraint.to_string())
}

impl MemoryStore {
    /// An empty store with the system roles seeded.
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for (role_id, name) in [
            (system_roles::STUDENT, "Student"),
            (system_roles::ADMIN, "Admin"),
            (system_roles::SUPER_ADMIN, "Super Admin"),
        ] {
            tables.roles.insert(
                role_id,
                RoleRecord {
                    role_id,
                    name: name.to_string(),
                },
            );
        }

        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes the next student update fail as if another request got there first.
    #[cfg(feature = "test-utils")]
    pub fn inject_student_update_conflict(&self, conflict: UpdateConflict) {
        self.tables().student_update_conflict = Some(conflict);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Tables {
    fn check_student_refs(
        &self,
        level_id: i32,
        section_id: Option<i32>,
        role_id: i32,
    ) -> RepositoryResult<()> {
        if !self.levels.contains_key(&level_id) {
            return Err(fk("students_level_id_fkey"));
        }
        if let Some(section_id) = section_id {
            if !self.sections.contains_key(&section_id) {
                return Err(fk("students_section_id_fkey"));
            }
        }
        if !self.roles.contains_key(&role_id) {
            return Err(fk("students_role_id_fkey"));
        }
        Ok(())
    }

    fn email_taken(&self, email: &str, excluding: Option<i32>) -> bool {
        let email = email.to_lowercase();
        self.students
            .values()
            .any(|s| Some(s.student_id) != excluding && s.email.to_lowercase() == email)
    }

    fn student_details(&self, student: &Student) -> StudentDetails {
        StudentDetails {
            student_id: student.student_id,
            full_name: student.full_name.clone(),
            email: student.email.clone(),
            level_id: student.level_id,
            level_name: self.levels.get(&student.level_id).map(|l| l.level_name.clone()),
            section_id: student.section_id,
            section_name: student
                .section_id
                .and_then(|id| self.sections.get(&id))
                .map(|s| s.section_name.clone()),
            college_year_level: student.college_year_level,
            role_id: student.role_id,
            role_name: self.roles.get(&student.role_id).map(|r| r.name.clone()),
        }
    }

    fn teacher_with_level(&self, teacher: &Teacher) -> TeacherWithLevel {
        TeacherWithLevel {
            teacher_id: teacher.teacher_id,
            full_name: teacher.full_name.clone(),
            level_id: teacher.level_id,
            level_name: self.levels.get(&teacher.level_id).map(|l| l.level_name.clone()),
        }
    }

    fn subject_details(&self, subject: &Subject) -> SubjectDetails {
        SubjectDetails {
            subject_id: subject.subject_id,
            subject_name: subject.subject_name.clone(),
            teacher_id: subject.teacher_id,
            teacher_name: self.teacher_name(subject.teacher_id),
        }
    }

    fn enrollment_details(&self, enrollment: &Enrollment) -> EnrollmentDetails {
        EnrollmentDetails {
            enrollment_id: enrollment.enrollment_id,
            student_id: enrollment.student_id,
            student_name: self
                .students
                .get(&enrollment.student_id)
                .map(|s| s.full_name.clone()),
            subject_id: enrollment.subject_id,
            subject_name: self
                .subjects
                .get(&enrollment.subject_id)
                .map(|s| s.subject_name.clone()),
            teacher_id: enrollment.teacher_id,
            teacher_name: self.teacher_name(enrollment.teacher_id),
        }
    }

    fn teacher_name(&self, teacher_id: i32) -> Option<String> {
        self.teachers.get(&teacher_id).map(|t| t.full_name.clone())
    }

    fn check_enrollment_refs(
        &self,
        student_id: i32,
        subject_id: i32,
        teacher_id: i32,
    ) -> RepositoryResult<()> {
        if !self.students.contains_key(&student_id) {
            return Err(fk("enrollments_student_id_fkey"));
        }
        if !self.subjects.contains_key(&subject_id) {
            return Err(fk("enrollments_subject_id_fkey"));
        }
        if !self.teachers.contains_key(&teacher_id) {
            return Err(fk("enrollments_teacher_id_fkey"));
        }
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn list_details(&self) -> RepositoryResult<Vec<StudentDetails>> {
        let tables = self.tables();
        Ok(tables
            .students
            .values()
            .map(|s| tables.student_details(s))
            .collect())
    }

    async fn find(&self, student_id: i32) -> RepositoryResult<Option<Student>> {
        Ok(self.tables().students.get(&student_id).cloned())
    }

    async fn find_details(&self, student_id: i32) -> RepositoryResult<Option<StudentDetails>> {
        let tables = self.tables();
        Ok(tables
            .students
            .get(&student_id)
            .map(|s| tables.student_details(s)))
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Student>> {
        let email = email.to_lowercase();
        Ok(self
            .tables()
            .students
            .values()
            .find(|s| s.email.to_lowercase() == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str, excluding: Option<i32>) -> RepositoryResult<bool> {
        Ok(self.tables().email_taken(email, excluding))
    }

    async fn exists(&self, student_id: i32) -> RepositoryResult<bool> {
        Ok(self.tables().students.contains_key(&student_id))
    }

    async fn insert(&self, student: NewStudent) -> RepositoryResult<Student> {
        let mut tables = self.tables();
        if tables.email_taken(&student.email, None) {
            return Err(unique("students_email_key"));
        }
        tables.check_student_refs(student.level_id, student.section_id, student.role_id)?;

        let student = Student {
            student_id: next(&mut tables.sequences.student),
            full_name: student.full_name,
            email: student.email,
            password: student.password,
            level_id: student.level_id,
            section_id: student.section_id,
            college_year_level: student.college_year_level,
            role_id: student.role_id,
        };
        tables.students.insert(student.student_id, student.clone());
        Ok(student)
    }

    async fn update(&self, student: &Student) -> RepositoryResult<()> {
        let mut tables = self.tables();

        #[cfg(feature = "test-utils")]
        if let Some(conflict) = tables.student_update_conflict.take() {
            if conflict == UpdateConflict::RowDeleted {
                tables.students.remove(&student.student_id);
            }
            return Err(RepositoryError::ConcurrencyConflict);
        }

        if !tables.students.contains_key(&student.student_id) {
            return Err(RepositoryError::ConcurrencyConflict);
        }
        if tables.email_taken(&student.email, Some(student.student_id)) {
            return Err(unique("students_email_key"));
        }
        tables.check_student_refs(student.level_id, student.section_id, student.role_id)?;

        tables.students.insert(student.student_id, student.clone());
        Ok(())
    }

    async fn delete(&self, student_id: i32) -> RepositoryResult<bool> {
        let mut tables = self.tables();
        if tables.enrollments.values().any(|e| e.student_id == student_id) {
            return Err(fk("enrollments_student_id_fkey"));
        }
        if tables.evaluations.values().any(|e| e.student_id == student_id) {
            return Err(fk("evaluations_student_id_fkey"));
        }
        Ok(tables.students.remove(&student_id).is_some())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.tables().students.len() as i64)
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore {
    async fn list_with_level(&self) -> RepositoryResult<Vec<TeacherWithLevel>> {
        let tables = self.tables();
        Ok(tables
            .teachers
            .values()
            .map(|t| tables.teacher_with_level(t))
            .collect())
    }

    async fn find(&self, teacher_id: i32) -> RepositoryResult<Option<Teacher>> {
        Ok(self.tables().teachers.get(&teacher_id).cloned())
    }

    async fn find_with_level(&self, teacher_id: i32) -> RepositoryResult<Option<TeacherWithLevel>> {
        let tables = self.tables();
        Ok(tables
            .teachers
            .get(&teacher_id)
            .map(|t| tables.teacher_with_level(t)))
    }

    async fn find_many_with_level(
        &self,
        teacher_ids: &[i32],
    ) -> RepositoryResult<Vec<TeacherWithLevel>> {
        let tables = self.tables();
        let wanted: HashSet<i32> = teacher_ids.iter().copied().collect();
        Ok(tables
            .teachers
            .values()
            .filter(|t| wanted.contains(&t.teacher_id))
            .map(|t| tables.teacher_with_level(t))
            .collect())
    }

    async fn insert(&self, teacher: NewTeacher) -> RepositoryResult<Teacher> {
        let mut tables = self.tables();
        if !tables.levels.contains_key(&teacher.level_id) {
            return Err(fk("teachers_level_id_fkey"));
        }

        let teacher = Teacher {
            teacher_id: next(&mut tables.sequences.teacher),
            full_name: teacher.full_name,
            level_id: teacher.level_id,
        };
        tables.teachers.insert(teacher.teacher_id, teacher.clone());
        Ok(teacher)
    }

    async fn update(&self, teacher: &Teacher) -> RepositoryResult<bool> {
        let mut tables = self.tables();
        if !tables.teachers.contains_key(&teacher.teacher_id) {
            return Ok(false);
        }
        if !tables.levels.contains_key(&teacher.level_id) {
            return Err(fk("teachers_level_id_fkey"));
        }
        tables.teachers.insert(teacher.teacher_id, teacher.clone());
        Ok(true)
    }

    async fn delete(&self, teacher_id: i32) -> RepositoryResult<bool> {
        let mut tables = self.tables();
        if tables.subjects.values().any(|s| s.teacher_id == teacher_id) {
            return Err(fk("subjects_teacher_id_fkey"));
        }
        if tables.enrollments.values().any(|e| e.teacher_id == teacher_id) {
            return Err(fk("enrollments_teacher_id_fkey"));
        }
        if tables.evaluations.values().any(|e| e.teacher_id == teacher_id) {
            return Err(fk("evaluations_teacher_id_fkey"));
        }
        Ok(tables.teachers.remove(&teacher_id).is_some())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.tables().teachers.len() as i64)
    }
}

#[async_trait]
impl SubjectRepository for MemoryStore {
    async fn list_details(&self) -> RepositoryResult<Vec<SubjectDetails>> {
        let tables = self.tables();
        Ok(tables
            .subjects
            .values()
            .map(|s| tables.subject_details(s))
            .collect())
    }

    async fn find(&self, subject_id: i32) -> RepositoryResult<Option<Subject>> {
        Ok(self.tables().subjects.get(&subject_id).cloned())
    }

    async fn find_details(&self, subject_id: i32) -> RepositoryResult<Option<SubjectDetails>> {
        let tables = self.tables();
        Ok(tables
            .subjects
            .get(&subject_id)
            .map(|s| tables.subject_details(s)))
    }

    async fn insert(&self, subject: NewSubject) -> RepositoryResult<Subject> {
        let mut tables = self.tables();
        if !tables.teachers.contains_key(&subject.teacher_id) {
            return Err(fk("subjects_teacher_id_fkey"));
        }

        let subject = Subject {
            subject_id: next(&mut tables.sequences.subject),
            subject_name: subject.subject_name,
            teacher_id: subject.teacher_id,
        };
        tables.subjects.insert(subject.subject_id, subject.clone());
        Ok(subject)
    }

    async fn update(&self, subject: &Subject) -> RepositoryResult<bool> {
        let mut tables = self.tables();
        if !tables.subjects.contains_key(&subject.subject_id) {
            return Ok(false);
        }
        if !tables.teachers.contains_key(&subject.teacher_id) {
            return Err(fk("subjects_teacher_id_fkey"));
        }
        tables.subjects.insert(subject.subject_id, subject.clone());
        Ok(true)
    }

    async fn delete(&self, subject_id: i32) -> RepositoryResult<bool> {
        let mut tables = self.tables();
        if tables.enrollments.values().any(|e| e.subject_id == subject_id) {
            return Err(fk("enrollments_subject_id_fkey"));
        }
        Ok(tables.subjects.remove(&subject_id).is_some())
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryStore {
    async fn list_details(&self) -> RepositoryResult<Vec<EnrollmentDetails>> {
        let tables = self.tables();
        Ok(tables
            .enrollments
            .values()
            .map(|e| tables.enrollment_details(e))
            .collect())
    }

    async fn find(&self, enrollment_id: i32) -> RepositoryResult<Option<Enrollment>> {
        Ok(self.tables().enrollments.get(&enrollment_id).cloned())
    }

    async fn find_details(
        &self,
        enrollment_id: i32,
    ) -> RepositoryResult<Option<EnrollmentDetails>> {
        let tables = self.tables();
        Ok(tables
            .enrollments
            .get(&enrollment_id)
            .map(|e| tables.enrollment_details(e)))
    }

    async fn find_details_many(
        &self,
        enrollment_ids: &[i32],
    ) -> RepositoryResult<Vec<EnrollmentDetails>> {
        let tables = self.tables();
        let wanted: HashSet<i32> = enrollment_ids.iter().copied().collect();
        Ok(tables
            .enrollments
            .values()
            .filter(|e| wanted.contains(&e.enrollment_id))
            .map(|e| tables.enrollment_details(e))
            .collect())
    }

    async fn exists_for(&self, student_id: i32, subject_id: i32) -> RepositoryResult<bool> {
        Ok(self
            .tables()
            .enrollments
            .values()
            .any(|e| e.student_id == student_id && e.subject_id == subject_id))
    }

    async fn insert_many(
        &self,
        enrollments: &[NewEnrollment],
    ) -> RepositoryResult<Vec<Enrollment>> {
        let mut tables = self.tables();

        // Validate the whole batch before writing anything.
        for e in enrollments {
            tables.check_enrollment_refs(e.student_id, e.subject_id, e.teacher_id)?;
        }

        let mut taken: HashSet<(i32, i32)> = tables
            .enrollments
            .values()
            .map(|e| (e.student_id, e.subject_id))
            .collect();

        let mut inserted = Vec::new();
        for e in enrollments {
            if !taken.insert((e.student_id, e.subject_id)) {
                continue;
            }
            let enrollment = Enrollment {
                enrollment_id: next(&mut tables.sequences.enrollment),
                student_id: e.student_id,
                subject_id: e.subject_id,
                teacher_id: e.teacher_id,
            };
            tables
                .enrollments
                .insert(enrollment.enrollment_id, enrollment.clone());
            inserted.push(enrollment);
        }
        Ok(inserted)
    }

    async fn update(&self, enrollment: &Enrollment) -> RepositoryResult<bool> {
        let mut tables = self.tables();
        if !tables.enrollments.contains_key(&enrollment.enrollment_id) {
            return Ok(false);
        }
        tables.check_enrollment_refs(
            enrollment.student_id,
            enrollment.subject_id,
            enrollment.teacher_id,
        )?;
        let duplicate = tables.enrollments.values().any(|e| {
            e.enrollment_id != enrollment.enrollment_id
                && e.student_id == enrollment.student_id
                && e.subject_id == enrollment.subject_id
        });
        if duplicate {
            return Err(unique("enrollments_student_subject_key"));
        }

        tables
            .enrollments
            .insert(enrollment.enrollment_id, enrollment.clone());
        Ok(true)
    }

    async fn delete(&self, enrollment_id: i32) -> RepositoryResult<bool> {
        Ok(self.tables().enrollments.remove(&enrollment_id).is_some())
    }

    async fn teacher_ids_for_student(&self, student_id: i32) -> RepositoryResult<Vec<i32>> {
        Ok(self
            .tables()
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id)
            .map(|e| e.teacher_id)
            .collect())
    }
}

#[async_trait]
impl EvaluationRepository for MemoryStore {
    async fn list_details(&self) -> RepositoryResult<Vec<EvaluationDetails>> {
        let tables = self.tables();
        let mut evaluations: Vec<EvaluationDetails> = tables
            .evaluations
            .values()
            .map(|ev| EvaluationDetails {
                evaluation_id: ev.evaluation_id,
                student_id: ev.student_id,
                student_name: tables.students.get(&ev.student_id).map(|s| s.full_name.clone()),
                teacher_id: ev.teacher_id,
                teacher_name: tables.teacher_name(ev.teacher_id),
                comments: ev.comments.clone(),
                created_at: ev.created_at,
            })
            .collect();
        evaluations.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.evaluation_id.cmp(&a.evaluation_id))
        });
        Ok(evaluations)
    }

    async fn insert(&self, evaluation: NewEvaluation) -> RepositoryResult<Evaluation> {
        let mut tables = self.tables();
        if !tables.students.contains_key(&evaluation.student_id) {
            return Err(fk("evaluations_student_id_fkey"));
        }
        if !tables.teachers.contains_key(&evaluation.teacher_id) {
            return Err(fk("evaluations_teacher_id_fkey"));
        }
        let duplicate = tables.evaluations.values().any(|e| {
            e.student_id == evaluation.student_id && e.teacher_id == evaluation.teacher_id
        });
        if duplicate {
            return Err(unique("evaluations_student_teacher_key"));
        }

        let evaluation = Evaluation {
            evaluation_id: next(&mut tables.sequences.evaluation),
            student_id: evaluation.student_id,
            teacher_id: evaluation.teacher_id,
            comments: evaluation.comments,
            created_at: Utc::now(),
        };
        tables
            .evaluations
            .insert(evaluation.evaluation_id, evaluation.clone());
        Ok(evaluation)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.tables().evaluations.len() as i64)
    }

    async fn teacher_ids_for_student(&self, student_id: i32) -> RepositoryResult<Vec<i32>> {
        Ok(self
            .tables()
            .evaluations
            .values()
            .filter(|e| e.student_id == student_id)
            .map(|e| e.teacher_id)
            .collect())
    }
}

#[async_trait]
impl LookupRepository for MemoryStore {
    async fn levels(&self) -> RepositoryResult<Vec<Level>> {
        Ok(self.tables().levels.values().cloned().collect())
    }

    async fn find_level(&self, level_id: i32) -> RepositoryResult<Option<Level>> {
        Ok(self.tables().levels.get(&level_id).cloned())
    }

    async fn insert_level(&self, level_name: &str) -> RepositoryResult<Level> {
        let mut tables = self.tables();
        if tables.levels.values().any(|l| l.level_name == level_name) {
            return Err(unique("levels_level_name_key"));
        }

        let level = Level {
            level_id: next(&mut tables.sequences.level),
            level_name: level_name.to_string(),
        };
        tables.levels.insert(level.level_id, level.clone());
        Ok(level)
    }

    async fn sections(&self) -> RepositoryResult<Vec<Section>> {
        Ok(self.tables().sections.values().cloned().collect())
    }

    async fn insert_section(&self, section_name: &str) -> RepositoryResult<Section> {
        let mut tables = self.tables();
        if tables.sections.values().any(|s| s.section_name == section_name) {
            return Err(unique("sections_section_name_key"));
        }

        let section = Section {
            section_id: next(&mut tables.sequences.section),
            section_name: section_name.to_string(),
        };
        tables.sections.insert(section.section_id, section.clone());
        Ok(section)
    }

    async fn roles(&self) -> RepositoryResult<Vec<RoleRecord>> {
        Ok(self.tables().roles.values().cloned().collect())
    }
}

#[async_trait]
impl AdminRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<AdminAccount>> {
        let email = email.to_lowercase();
        Ok(self
            .tables()
            .admins
            .values()
            .find(|a| a.email.to_lowercase() == email)
            .cloned())
    }

    async fn insert(&self, admin: NewAdmin) -> RepositoryResult<AdminAccount> {
        let mut tables = self.tables();
        if tables.admins.values().any(|a| a.email == admin.email) {
            return Err(unique("admins_email_key"));
        }
        let role_name = tables
            .roles
            .get(&admin.role_id)
            .map(|r| r.name.clone())
            .ok_or_else(|| fk("admins_role_id_fkey"))?;

        let admin = AdminAccount {
            admin_id: next(&mut tables.sequences.admin),
            full_name: admin.full_name,
            email: admin.email,
            password: admin.password,
            role_id: admin.role_id,
            role_name,
        };
        tables.admins.insert(admin.admin_id, admin.clone());
        Ok(admin)
    }
}
