//! Argon2 password hashing (PHC strings)

use std::sync::LazyLock;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `false` for a wrong password and for a hash that does not parse
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Stand-in hash for accounts that have none, so a miss still costs one
/// argon2 verification
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("no account here").unwrap_or_default());

/// Verify on the blocking pool.
///
/// Without a stored hash the password is checked against a dummy and the
/// result is always `false`.
pub async fn verify_password_blocking(
    password: String,
    hash: Option<String>,
) -> Result<bool, tokio::task::JoinError> {
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            verify_password(&password, &DUMMY_HASH);
            false
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_dummy_hash_is_a_real_hash() {
        assert!(PasswordHash::new(&DUMMY_HASH).is_ok());
        assert!(!verify_password("", &DUMMY_HASH));
    }

    #[tokio::test]
    async fn test_blocking_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password_blocking("correct horse".into(), Some(hash.clone())).await.unwrap());
        assert!(!verify_password_blocking("wrong".into(), Some(hash)).await.unwrap());
        assert!(!verify_password_blocking("no account here".into(), None).await.unwrap());
    }
}
