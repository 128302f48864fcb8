//! Password hashing and verification (Argon2id, PHC string format).
//!
//! Both operations are CPU-bound; async callers run them on the blocking pool.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hashing(password_hash::Error),

    #[error("failed to verify password: {0}")]
    Verification(password_hash::Error),

    #[error("invalid password hash format")]
    InvalidHashFormat,
}

// Argon2id with the default cost parameters. No password hashes to the all-zero
// output, so verifying against it always fails after doing the full work.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hashing)
}

/// Check `password` against a stored PHC hash. A mismatch is `Ok(false)`, not an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verification(e)),
    }
}

/// Burn one verification's worth of CPU for a login that has no stored hash.
///
/// Returns `Ok(false)` for any input; callers discard it and reject the login.
pub fn verify_dummy_password(password: &str) -> Result<bool, PasswordError> {
    verify_password(password, DUMMY_HASH)
}

#[cfg(test)]
mod tests {
    use argon2::Params;

    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("123456").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("123456", &hash).unwrap());
        assert!(!verify_password("123123", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("123456").unwrap();
        let b = hash_password("123456").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("123456", "334542423"),
            Err(PasswordError::InvalidHashFormat)
        ));
    }

    #[test]
    fn dummy_hash_costs_the_same_as_a_real_one() {
        let dummy = PasswordHash::new(DUMMY_HASH).unwrap();
        let real_hash = hash_password("123456").unwrap();
        let real = PasswordHash::new(&real_hash).unwrap();

        assert_eq!(dummy.algorithm, real.algorithm);
        assert_eq!(
            Params::try_from(&dummy).unwrap(),
            Params::try_from(&real).unwrap()
        );
    }

    #[test]
    fn dummy_verification_never_matches() {
        for candidate in ["", "123456", "334542423"] {
            assert!(!verify_dummy_password(candidate).unwrap());
        }
    }
}
