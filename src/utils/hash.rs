use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Hashes a password with a freshly generated salt.
/// Returns `(hash, salt)`; both are stored on the user record.
pub fn hash_password(password: &str) -> Result<(String, String), AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let digest = digest_with_salt(password, &salt)?;

    Ok((digest, salt.as_str().to_string()))
}

/// Verifies a password by recomputing the digest with the stored salt and
/// comparing it to the stored hash.
pub fn verify_password(password: &str, stored_hash: &str, stored_salt: &str) -> Result<bool, AppError> {
    let salt = SaltString::from_b64(stored_salt)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let digest = digest_with_salt(password, &salt)?;

    Ok(digest == stored_hash)
}

fn digest_with_salt(password: &str, salt: &SaltString) -> Result<String, AppError> {
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), salt)
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .hash
        .ok_or_else(|| AppError::InternalError("Hash output is empty".to_string()))?;

    Ok(hash.to_string())
}
