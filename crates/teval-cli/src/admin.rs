use teval_core::hash_password;
use teval_db::{RepositoryError, Store};
use teval_models::{AdminAccount, NewAdmin, system_roles};

/// Creates an administrator account. Admins are never created through the API.
pub async fn create_admin(
    store: &Store,
    full_name: &str,
    email: &str,
    password: &str,
    super_admin: bool,
) -> Result<AdminAccount, Box<dyn std::error::Error>> {
    if password.is_empty() {
        return Err("Password must not be empty".into());
    }

    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let role_id = if super_admin {
        system_roles::SUPER_ADMIN
    } else {
        system_roles::ADMIN
    };

    let admin = store
        .admins
        .insert(NewAdmin {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            password: hashed_password,
            role_id,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::UniqueViolation(_) => {
                "An admin with this email already exists".to_string()
            }
            other => other.to_string(),
        })?;

    Ok(admin)
}

#[cfg(test)]
mod tests {
    use teval_core::verify_password;
    use teval_db::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_create_admin_hashes_password() {
        let store = Store::memory(MemoryStore::new());
        let admin = create_admin(&store, "Registrar", "registrar@gsc.edu", "s3cret!", false)
            .await
            .unwrap();

        assert_eq!(admin.role_name, "Admin");
        assert_ne!(admin.password, "s3cret!");
        assert!(verify_password("s3cret!", &admin.password).unwrap());
    }

    #[tokio::test]
    async fn test_create_super_admin() {
        let store = Store::memory(MemoryStore::new());
        let admin = create_admin(&store, "Dean", "dean@gsc.edu", "s3cret!", true)
            .await
            .unwrap();
        assert_eq!(admin.role_id, system_roles::SUPER_ADMIN);
    }

    #[tokio::test]
    async fn test_duplicate_admin_email_fails() {
        let store = Store::memory(MemoryStore::new());
        create_admin(&store, "Registrar", "registrar@gsc.edu", "s3cret!", false)
            .await
            .unwrap();

        let err = create_admin(&store, "Other", "registrar@gsc.edu", "s3cret!", false)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "An admin with this email already exists");
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let store = Store::memory(MemoryStore::new());
        assert!(
            create_admin(&store, "Registrar", "registrar@gsc.edu", "", false)
                .await
                .is_err()
        );
    }
}
