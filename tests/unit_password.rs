use teval_core::{MAX_PASSWORD_BYTES, hash_password, verify_password};

#[test]
fn test_hash_password_success() {
    let password = "studentpass123";
    let hash = hash_password(password).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
    assert!(hash.starts_with("$2"));
}

#[test]
fn test_hash_password_is_salted() {
    let first = hash_password("same-password").unwrap();
    let second = hash_password("same-password").unwrap();

    assert_ne!(first, second);
    assert!(verify_password("same-password", &first).unwrap());
    assert!(verify_password("same-password", &second).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password("correctpassword").unwrap();

    let result = verify_password("wrongpassword", &hash);

    assert!(result.is_ok());
    assert!(!result.unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    let result = verify_password("testpassword", "not_a_valid_bcrypt_hash");

    assert!(result.is_err());
}

#[test]
fn test_hash_password_at_bcrypt_limit() {
    let password = "a".repeat(MAX_PASSWORD_BYTES);
    let hash = hash_password(&password).unwrap();

    assert!(verify_password(&password, &hash).unwrap());
}

#[test]
fn test_hash_password_past_bcrypt_limit_is_rejected() {
    let result = hash_password(&"a".repeat(MAX_PASSWORD_BYTES + 1));

    let err = result.unwrap_err();
    assert_eq!(err.status.as_u16(), 400);
    assert_eq!(err.error.to_string(), "Password must be at most 72 bytes");
}

#[test]
fn test_hash_password_counts_bytes_not_chars() {
    // 40 characters, 80 bytes
    let result = hash_password(&"é".repeat(40));

    assert!(result.is_err());
}
