//! One-way password hashing

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{Error as HashError, SaltString},
};

/// Hash a plaintext password into an Argon2 PHC string with a fresh salt
pub fn hash_password(plain: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();

    Ok(hash)
}

/// Check a plaintext password against a stored PHC string
#[cfg(test)]
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, HashError> {
    use argon2::{PasswordHash, PasswordVerifier};

    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
