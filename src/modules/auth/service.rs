use teval_auth::{create_access_token, role};
use teval_config::JwtConfig;
use teval_core::{AppError, verify_password};
use teval_db::Store;
use teval_models::{LoginRequest, LoginResponse};
use teval_observability::{track_login_failure, track_login_success};
use tracing::{info, instrument, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// An account that may sign in, resolved from either the admin or the student table.
struct Account {
    id: i32,
    email: String,
    role: String,
    password_hash: Option<String>,
}

pub struct AuthService;

impl AuthService {
    /// Authenticates an administrator or a student and issues an access token.
    ///
    /// Administrator accounts are checked first. Students without a stored
    /// password cannot sign in.
    #[instrument(skip(store, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        store: &Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(account) = Self::find_account(store, &dto.email).await? else {
            warn!("Login attempt for unknown email");
            track_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let Some(hash) = account.password_hash.as_deref() else {
            warn!(account_id = account.id, "Login attempt for an account without a password");
            track_login_failure("no_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, hash)? {
            warn!(account_id = account.id, "Login attempt with a wrong password");
            track_login_failure("invalid_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let access_token =
            create_access_token(account.id, &account.email, &account.role, jwt_config)?;

        track_login_success(&account.role);
        info!(account_id = account.id, role = %account.role, "Login successful");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            role: account.role,
        })
    }

    async fn find_account(store: &Store, email: &str) -> Result<Option<Account>, AppError> {
        if let Some(admin) = store
            .admins
            .find_by_email(email)
            .await
            .map_err(AppError::database)?
        {
            return Ok(Some(Account {
                id: admin.admin_id,
                email: admin.email,
                role: admin.role_name,
                password_hash: Some(admin.password).filter(|p| !p.is_empty()),
            }));
        }

        let student = store
            .students
            .find_by_email(email)
            .await
            .map_err(AppError::database)?;

        Ok(student.map(|s| Account {
            id: s.student_id,
            email: s.email,
            role: role::STUDENT.to_string(),
            password_hash: s.password.filter(|p| !p.is_empty()),
        }))
    }
}
