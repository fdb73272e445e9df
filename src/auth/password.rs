use argon2::{
    password_hash::{Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;

// Argon2id parameters pinned explicitly so stored digests do not silently
// change shape when the crate's defaults move.
const M_COST_KIB: u32 = 19 * 1024;
const T_COST: u32 = 2;
const P_COST: u32 = 1;

/// Digest-level failure: hashing itself failed or a stored digest is not a
/// valid PHC string. A wrong password is not an error (see `verify_password`).
#[derive(Debug, thiserror::Error)]
#[error("password digest error: {0}")]
pub struct PasswordError(HashError);

impl From<HashError> for PasswordError {
    fn from(e: HashError) -> Self {
        Self(e)
    }
}

fn hasher() -> Argon2<'static> {
    let params =
        Params::new(M_COST_KIB, T_COST, P_COST, None).unwrap_or_else(|_| Params::default());
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = hasher().hash_password(plain.as_bytes(), &salt)?;
    Ok(digest.to_string())
}

/// `Ok(false)` is a password mismatch; `Err` means the stored digest could
/// not be parsed or checked at all, which callers surface as an internal
/// error rather than `invalid_credentials`.
pub fn verify_password(plain: &str, digest: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(digest)?;
    match hasher().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let digest = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &digest).expect("verify should succeed"));
    }

    #[test]
    fn digest_is_an_argon2id_phc_string() {
        let digest = hash_password("pw").expect("hashing should succeed");
        assert!(digest.starts_with("$argon2id$"));
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let digest = hash_password("correct-horse-battery-staple").expect("hash");
        assert!(!verify_password("wrong-password", &digest).expect("verify should not error"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-input").expect("hash");
        let b = hash_password("same-input").expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_digest_is_an_error() {
        assert!(verify_password("anything", "not-a-valid-digest").is_err());
    }
}
