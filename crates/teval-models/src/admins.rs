//! Administrator accounts. These only exist to sign in; they are created from
//! the CLI, never through the HTTP API.

use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AdminAccount {
    pub admin_id: i32,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role_id: i32,
    pub role_name: String,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role_id: i32,
}
