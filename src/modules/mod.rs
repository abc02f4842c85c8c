pub mod auth;
pub mod dashboard;
pub mod enrollments;
pub mod evaluations;
pub mod lookups;
pub mod students;
pub mod subjects;
pub mod teachers;

#[cfg(test)]
pub(crate) mod test_support;
