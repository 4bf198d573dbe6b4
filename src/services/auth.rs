// src/services/auth.rs

use rand::Rng;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{RegisterRequest, UpdateProfileRequest, User},
    store::Store,
    utils::hash::{hash_password, verify_password},
};

/// Registers a new user account.
///
/// Hashes the password with a fresh salt before storing it.
/// Email is the unique login key; duplicates are rejected.
pub fn register(store: &mut Store, payload: RegisterRequest) -> Result<User, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if store.user_by_email(&payload.email).is_some() {
        return Err(AppError::Conflict(format!(
            "Email '{}' is already registered",
            payload.email
        )));
    }

    let (password_hash, salt) = hash_password(&payload.password)?;

    let user = User {
        id: Uuid::new_v4(),
        family: payload.family,
        name: payload.name,
        patronymic: payload.patronymic,
        email: payload.email,
        password_hash,
        salt,
    };
    store.users.push(user.clone());

    tracing::info!("Registered user {}", user.id);
    Ok(user)
}

/// Authenticates a user by email and password.
///
/// An unknown email and a wrong password are reported separately, matching
/// the messages the login screen shows.
pub fn login(store: &Store, email: &str, password: &str) -> Result<User, AppError> {
    let user = store
        .user_by_email(email)
        .ok_or_else(|| AppError::AuthError("User not found".to_string()))?;

    let is_valid = verify_password(password, &user.password_hash, &user.salt)?;
    if !is_valid {
        return Err(AppError::AuthError("Invalid password".to_string()));
    }

    Ok(user.clone())
}

/// Edits a user's name components and email.
/// The new email must not belong to another account.
pub fn update_profile(
    store: &mut Store,
    user_id: Uuid,
    payload: UpdateProfileRequest,
) -> Result<User, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let email_taken = store
        .users
        .iter()
        .any(|u| u.id != user_id && u.email.eq_ignore_ascii_case(&payload.email));
    if email_taken {
        return Err(AppError::Conflict(format!(
            "Email '{}' is already registered",
            payload.email
        )));
    }

    let user = store
        .users
        .iter_mut()
        .find(|u| u.id == user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    user.family = payload.family;
    user.name = payload.name;
    user.patronymic = payload.patronymic;
    user.email = payload.email;

    Ok(user.clone())
}

/// Replaces a user's password after verifying the current one.
pub fn change_password(
    store: &mut Store,
    user_id: Uuid,
    current_password: &str,
    new_password: &str,
) -> Result<(), AppError> {
    validate_password_length(new_password)?;

    let user = store
        .user(user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let is_valid = verify_password(current_password, &user.password_hash, &user.salt)?;
    if !is_valid {
        return Err(AppError::AuthError("Invalid password".to_string()));
    }

    let (password_hash, salt) = hash_password(new_password)?;

    let user = store
        .users
        .iter_mut()
        .find(|u| u.id == user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    user.password_hash = password_hash;
    user.salt = salt;

    tracing::info!("Password changed for user {}", user_id);
    Ok(())
}

/// Starts password recovery for an account.
///
/// Generates a six-digit code and retains it for the completion step.
/// Delivery is out of scope; the caller presents or sends the code.
pub fn begin_password_recovery(store: &mut Store, email: &str) -> Result<String, AppError> {
    let email_key = store
        .user_by_email(email)
        .ok_or_else(|| AppError::NotFound("No account with this email".to_string()))?
        .email
        .to_lowercase();

    let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
    store.recovery_codes.insert(email_key, code.clone());

    tracing::info!("Issued recovery code for {}", email);
    Ok(code)
}

/// Completes password recovery: the code must match the one issued for the
/// email, and is consumed on success.
pub fn complete_password_recovery(
    store: &mut Store,
    email: &str,
    code: &str,
    new_password: &str,
) -> Result<(), AppError> {
    let email_key = email.to_lowercase();

    match store.recovery_codes.get(&email_key) {
        Some(expected) if expected == code => {}
        _ => return Err(AppError::AuthError("Recovery code does not match".to_string())),
    }

    validate_password_length(new_password)?;

    let (password_hash, salt) = hash_password(new_password)?;

    let user = store
        .users
        .iter_mut()
        .find(|u| u.email.eq_ignore_ascii_case(email))
        .ok_or_else(|| AppError::NotFound("No account with this email".to_string()))?;
    user.password_hash = password_hash;
    user.salt = salt;

    store.recovery_codes.remove(&email_key);

    tracing::info!("Password recovered for {}", email);
    Ok(())
}

fn validate_password_length(password: &str) -> Result<(), AppError> {
    if password.len() < 4 || password.len() > 128 {
        return Err(AppError::BadRequest(
            "Password length must be between 4 and 128 characters.".to_string(),
        ));
    }
    Ok(())
}
