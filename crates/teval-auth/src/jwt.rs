//! JWT creation and verification for access tokens.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use teval_config::JwtConfig;
use teval_core::AppError;

use crate::claims::Claims;

/// Creates a signed access token for an account.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    subject_id: i32,
    email: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: subject_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, expired, or signed
/// with a different secret.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_and_verify() {
        let config = config("test-secret");
        let token = create_access_token(7, "s@gsc.edu", "Student", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.subject_id(), Some(7));
        assert_eq!(claims.email, "s@gsc.edu");
        assert_eq!(claims.role(), Role::Student);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = create_access_token(7, "s@gsc.edu", "Student", &config("one")).unwrap();
        let err = verify_token(&token, &config("two")).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_verify_garbage() {
        assert!(verify_token("not.a.token", &config("test-secret")).is_err());
    }
}
