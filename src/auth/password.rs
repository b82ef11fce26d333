// src/auth/password.rs
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use tracing::warn;

use crate::config::SecurityConfig;
use crate::errors::ServerError;

fn argon2_from(cfg: &SecurityConfig) -> Result<Argon2<'static>, ServerError> {
    let params = Params::new(
        cfg.argon2_memory_cost_kib,
        cfg.argon2_time_cost,
        cfg.argon2_parallelism,
        None,
    )
    .map_err(|e| ServerError::ConfigError(format!("invalid argon2 params: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password into a PHC string (`$argon2id$...`).
pub fn hash_password(password: &str, cfg: &SecurityConfig) -> Result<String, ServerError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2_from(cfg)?
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            warn!(error = %e, "password hashing failed");
            ServerError::InternalError
        })
}

/// Check a password against a stored PHC string. The parameters embedded in
/// the hash are used, so older hashes keep verifying after config changes.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        warn!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
pub(crate) fn fast_config() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        ..SecurityConfig::default()
    }
}
