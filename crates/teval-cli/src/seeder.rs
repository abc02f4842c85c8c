//! Development data seeding.
//!
//! Seeding is additive: levels and sections are matched by name and reused,
//! student emails that already exist are skipped, and enrollment pairs that
//! already exist are left alone by the batch insert.

use std::time::Instant;

use bcrypt::hash;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use teval_db::{RepositoryError, Store};
use teval_models::{
    Level, NewEnrollment, NewStudent, NewSubject, NewTeacher, Section, Subject, system_roles,
};

pub const DEFAULT_LEVELS: &[&str] = &[
    "Grade 11",
    "Grade 12",
    "College - 1st Year",
    "College - 2nd Year",
];

pub const DEFAULT_SECTIONS: &[&str] = &["Section A", "Section B"];

const SUBJECT_NAMES: &[&str] = &[
    "Mathematics",
    "English",
    "Science",
    "Filipino",
    "History",
    "Physical Education",
    "Computer Science",
    "Philosophy",
];

/// Every seeded student signs in with this password.
pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub teachers_per_level: usize,
    pub subjects_per_teacher: usize,
    pub students_per_level: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers_per_level: 3,
            subjects_per_teacher: 2,
            students_per_level: 20,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub levels: usize,
    pub sections: usize,
    pub teachers: usize,
    pub subjects: usize,
    pub students: usize,
    pub enrollments: usize,
}

/// Seeds levels, sections, teachers, subjects, students, and enrolls every
/// seeded student in every seeded subject of their level.
pub async fn seed_all(
    store: &Store,
    config: &SeedConfig,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let mut summary = SeedSummary::default();

    println!("🌱 Starting database seeding...");

    let levels = ensure_levels(store, DEFAULT_LEVELS).await?;
    let sections = ensure_sections(store, DEFAULT_SECTIONS).await?;
    summary.levels = levels.len();
    summary.sections = sections.len();
    println!(
        "   ✓ {} levels, {} sections ready",
        summary.levels, summary.sections
    );

    // Cost 4 keeps seeding fast; all seeded students share one hash.
    let password_hash =
        hash(SEED_PASSWORD, 4).map_err(|e| format!("Failed to hash password: {}", e))?;

    let mut enrollments = Vec::new();

    for level in &levels {
        let subjects = seed_staff(store, level, config).await?;
        summary.teachers += config.teachers_per_level;
        summary.subjects += subjects.len();

        for student_idx in 0..config.students_per_level {
            let section = (!sections.is_empty()).then(|| &sections[student_idx % sections.len()]);
            let seed = generate_student(level, section, student_idx, &password_hash);

            let student = match store.students.insert(seed).await {
                Ok(student) => student,
                Err(RepositoryError::UniqueViolation(_)) => continue,
                Err(e) => return Err(e.into()),
            };
            summary.students += 1;

            enrollments.extend(subjects.iter().map(|subject| NewEnrollment {
                student_id: student.student_id,
                subject_id: subject.subject_id,
                teacher_id: subject.teacher_id,
            }));
        }
    }

    summary.enrollments = store.enrollments.insert_many(&enrollments).await?.len();

    println!(
        "   ✓ {} teachers, {} subjects, {} students, {} enrollments",
        summary.teachers, summary.subjects, summary.students, summary.enrollments
    );
    println!("✅ Seeding finished in {:?}", start_time.elapsed());

    Ok(summary)
}

/// Returns the named levels, inserting the ones that do not exist yet.
pub async fn ensure_levels(
    store: &Store,
    names: &[&str],
) -> Result<Vec<Level>, RepositoryError> {
    let existing = store.lookups.levels().await?;
    let mut levels = Vec::with_capacity(names.len());

    for name in names {
        match existing.iter().find(|l| l.level_name == *name) {
            Some(level) => levels.push(level.clone()),
            None => levels.push(store.lookups.insert_level(name).await?),
        }
    }

    Ok(levels)
}

pub async fn ensure_sections(
    store: &Store,
    names: &[&str],
) -> Result<Vec<Section>, RepositoryError> {
    let existing = store.lookups.sections().await?;
    let mut sections = Vec::with_capacity(names.len());

    for name in names {
        match existing.iter().find(|s| s.section_name == *name) {
            Some(section) => sections.push(section.clone()),
            None => sections.push(store.lookups.insert_section(name).await?),
        }
    }

    Ok(sections)
}

async fn seed_staff(
    store: &Store,
    level: &Level,
    config: &SeedConfig,
) -> Result<Vec<Subject>, RepositoryError> {
    let mut subjects = Vec::new();

    for teacher_idx in 0..config.teachers_per_level {
        let teacher = store
            .teachers
            .insert(NewTeacher {
                full_name: fake_full_name(),
                level_id: level.level_id,
            })
            .await?;

        for subject_idx in 0..config.subjects_per_teacher {
            let name = SUBJECT_NAMES
                [(teacher_idx * config.subjects_per_teacher + subject_idx) % SUBJECT_NAMES.len()];
            let subject = store
                .subjects
                .insert(NewSubject {
                    subject_name: format!("{} ({})", name, level.level_name),
                    teacher_id: teacher.teacher_id,
                })
                .await?;
            subjects.push(subject);
        }
    }

    Ok(subjects)
}

fn generate_student(
    level: &Level,
    section: Option<&Section>,
    student_idx: usize,
    password_hash: &str,
) -> NewStudent {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let email = format!(
        "{}.{}+{}{:03}@example.com",
        email_part(&first_name),
        email_part(&last_name),
        level.level_id,
        student_idx
    );

    let college_year_level = if level.is_college() {
        (student_idx % 4) as i32 + 1
    } else {
        0
    };

    NewStudent {
        full_name: format!("{} {}", first_name, last_name),
        email,
        password: Some(password_hash.to_string()),
        level_id: level.level_id,
        section_id: section.map(|s| s.section_id),
        college_year_level,
        role_id: system_roles::STUDENT,
    }
}

fn fake_full_name() -> String {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    format!("{} {}", first_name, last_name)
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use teval_db::MemoryStore;

    use super::*;

    fn small_config() -> SeedConfig {
        SeedConfig {
            teachers_per_level: 1,
            subjects_per_teacher: 2,
            students_per_level: 3,
        }
    }

    #[test]
    fn test_email_part_strips_punctuation() {
        assert_eq!(email_part("O'Conner"), "oconner");
        assert_eq!(email_part("Mary-Ann"), "maryann");
    }

    #[test]
    fn test_generated_college_student_has_year_level() {
        let level = Level {
            level_id: 3,
            level_name: "College - 1st Year".into(),
        };
        let student = generate_student(&level, None, 5, "hash");
        assert_eq!(student.college_year_level, 2);
        assert_eq!(student.role_id, system_roles::STUDENT);
        assert!(student.email.ends_with("+3005@example.com"));
    }

    #[test]
    fn test_generated_basic_ed_student_has_no_year_level() {
        let level = Level {
            level_id: 1,
            level_name: "Grade 11".into(),
        };
        assert_eq!(generate_student(&level, None, 2, "hash").college_year_level, 0);
    }

    #[tokio::test]
    async fn test_seed_all_populates_store() {
        let store = Store::memory(MemoryStore::new());
        let summary = seed_all(&store, &small_config()).await.unwrap();

        let level_count = DEFAULT_LEVELS.len();
        assert_eq!(summary.levels, level_count);
        assert_eq!(summary.sections, DEFAULT_SECTIONS.len());
        assert_eq!(summary.teachers, level_count);
        assert_eq!(summary.subjects, level_count * 2);
        assert_eq!(summary.students, level_count * 3);
        assert_eq!(summary.enrollments, level_count * 3 * 2);

        assert_eq!(store.students.count().await.unwrap(), (level_count * 3) as i64);
        assert_eq!(store.teachers.count().await.unwrap(), level_count as i64);
    }

    #[tokio::test]
    async fn test_seed_reuses_levels_and_sections() {
        let store = Store::memory(MemoryStore::new());
        seed_all(&store, &small_config()).await.unwrap();
        seed_all(&store, &small_config()).await.unwrap();

        assert_eq!(store.lookups.levels().await.unwrap().len(), DEFAULT_LEVELS.len());
        assert_eq!(
            store.lookups.sections().await.unwrap().len(),
            DEFAULT_SECTIONS.len()
        );
    }
}
