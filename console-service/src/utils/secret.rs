use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Newtype for a plaintext system secret to prevent accidental logging.
#[derive(Clone)]
pub struct SystemSecret(String);

impl SystemSecret {
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Newtype for a PHC-encoded secret hash.
#[derive(Debug, Clone)]
pub struct SecretHashString(String);

impl SecretHashString {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Hash a system secret using Argon2id.
///
/// Salt is generated automatically and embedded in the PHC string.
pub fn hash_secret(secret: &SystemSecret) -> Result<SecretHashString, anyhow::Error> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(secret.as_str().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash secret: {}", e))?
        .to_string();

    Ok(SecretHashString::new(hash))
}

/// Verify a secret against a stored PHC hash.
///
/// `Ok(false)` is a mismatch. `Err` means the stored hash itself is
/// malformed or the verifier failed; callers must treat that as an internal
/// failure, not as a bad credential.
pub fn verify_secret(
    secret: &SystemSecret,
    hash: &SecretHashString,
) -> Result<bool, anyhow::Error> {
    let parsed = PasswordHash::new(hash.as_str())
        .map_err(|e| anyhow::anyhow!("Invalid secret hash format: {}", e))?;

    match Argon2::default().verify_password(secret.as_str().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("Secret verification error: {}", e)),
    }
}
