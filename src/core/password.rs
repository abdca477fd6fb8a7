//! Salted, adaptive password hashing backed by bcrypt

use anyhow::{Context, Result};

/// bcrypt only reads this many bytes of a password
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes new passwords and checks submitted ones against stored hashes.
///
/// Hashing and verification are CPU bound; the `*_blocking` variants move the
/// work onto tokio's blocking pool so request tasks are not stalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialVerifier {
    cost: u32,
}

impl CredentialVerifier {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produce a salted hash of `plaintext`. Two calls never return the same string.
    ///
    /// Passwords longer than [`MAX_PASSWORD_BYTES`] are refused rather than truncated.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            anyhow::bail!("password exceeds {} bytes", MAX_PASSWORD_BYTES);
        }
        bcrypt::hash(plaintext, self.cost).context("failed to hash password")
    }

    /// Check `plaintext` against a stored hash.
    ///
    /// A malformed hash, or a plaintext too long to have been hashed, is a mismatch.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        bcrypt::verify(plaintext, stored_hash).unwrap_or(false)
    }

    pub async fn hash_blocking(&self, plaintext: String) -> Result<String> {
        let verifier = *self;
        tokio::task::spawn_blocking(move || verifier.hash(&plaintext))
            .await
            .context("password hashing task failed")?
    }

    pub async fn verify_blocking(&self, plaintext: String, stored_hash: String) -> Result<bool> {
        let verifier = *self;
        tokio::task::spawn_blocking(move || verifier.verify(&plaintext, &stored_hash))
            .await
            .context("password verification task failed")
    }
}

impl Default for CredentialVerifier {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> CredentialVerifier {
        CredentialVerifier::new(4)
    }

    #[test]
    fn test_hash_then_verify() {
        let v = verifier();
        let hash = v.hash("s3cret").unwrap();
        assert_ne!(hash, "s3cret");
        assert!(v.verify("s3cret", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let v = verifier();
        let first = v.hash("same").unwrap();
        let second = v.hash("same").unwrap();
        assert_ne!(first, second);
        assert!(v.verify("same", &first));
        assert!(v.verify("same", &second));
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let v = verifier();
        let hash = v.hash("right").unwrap();
        assert!(!v.verify("wrong", &hash));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!verifier().verify("anything", "not-a-bcrypt-hash"));
        assert!(!verifier().verify("anything", ""));
    }

    #[test]
    fn test_passwords_sharing_a_long_prefix_do_not_collide() {
        let v = verifier();
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);
        let first = format!("{}first", prefix);
        let second = format!("{}second", prefix);

        assert!(v.hash(&second).is_err());
        let prefix_hash = v.hash(&prefix).unwrap();
        assert!(v.verify(&prefix, &prefix_hash));
        assert!(!v.verify(&first, &prefix_hash));
        assert!(!v.verify(&second, &prefix_hash));
    }

    #[tokio::test]
    async fn test_blocking_variants() {
        let v = verifier();
        let hash = v.hash_blocking("pw".to_string()).await.unwrap();
        assert!(v.verify_blocking("pw".to_string(), hash.clone()).await.unwrap());
        assert!(!v.verify_blocking("nope".to_string(), hash).await.unwrap());
    }
}
