//! Machine credential verification for organization-scoped system requests.
//!
//! A system authenticates with HTTP Basic where the password half carries a
//! `my_<public>.<secret>` token. Every authentication failure collapses to
//! the same generic unauthorized outcome; the specific step only appears in
//! the logs. Store and hashing failures stay distinct so operators can tell
//! an attacker from an outage.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use subtle::ConstantTimeEq;
use thiserror::Error;

use service_core::error::AppError;

use crate::services::Database;
use crate::utils::{verify_secret, SecretHashString, SystemSecret};

/// Literal prefix of the machine credential token.
const TOKEN_PREFIX: &str = "my_";

/// Structured machine credential extracted from an Authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSystemCredential {
    pub username: String,
    pub public_part: String,
    pub secret_part: String,
}

/// Why a credential failed to parse. Internal detail only; callers collapse
/// every variant to the same unauthorized outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialParseError {
    #[error("missing Basic scheme prefix")]
    NotBasic,
    #[error("authorization payload is not decodable")]
    BadEncoding,
    #[error("missing username/password separator")]
    MissingColon,
    #[error("password missing token prefix")]
    MissingPrefix,
    #[error("password missing secret separator")]
    MissingDot,
    #[error("empty public or secret part")]
    EmptyPart,
}

/// Parse an `Authorization` header value into a machine credential.
///
/// Pure; performs no lookups. The secret part may itself contain dots, only
/// the first one separates it from the public part.
pub fn parse_basic_credentials(
    header: &str,
) -> Result<ParsedSystemCredential, CredentialParseError> {
    let payload = header
        .strip_prefix("Basic ")
        .ok_or(CredentialParseError::NotBasic)?;

    let decoded = BASE64
        .decode(payload)
        .map_err(|_| CredentialParseError::BadEncoding)?;
    let decoded = String::from_utf8(decoded).map_err(|_| CredentialParseError::BadEncoding)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(CredentialParseError::MissingColon)?;

    let token = password
        .strip_prefix(TOKEN_PREFIX)
        .ok_or(CredentialParseError::MissingPrefix)?;

    let (public_part, secret_part) = token
        .split_once('.')
        .ok_or(CredentialParseError::MissingDot)?;

    if public_part.is_empty() || secret_part.is_empty() {
        return Err(CredentialParseError::EmptyPart);
    }

    Ok(ParsedSystemCredential {
        username: username.to_string(),
        public_part: public_part.to_string(),
        secret_part: secret_part.to_string(),
    })
}

/// Verifies organization-scoped machine credentials against the store.
#[derive(Clone)]
pub struct SystemAuthService {
    db: Database,
}

impl SystemAuthService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Verify an Authorization header value and yield the owning
    /// organization id.
    ///
    /// The steps are strictly ordered and short-circuit: parse, credential
    /// row lookup (eligible rows only), public key comparison, secret hash
    /// verification. No store access happens before the parse succeeds.
    pub async fn verify(&self, authorization: Option<&str>) -> Result<String, AppError> {
        let header = match authorization {
            Some(value) => value,
            None => {
                tracing::warn!(reason = "missing authorization header", "system auth failed");
                return Err(unauthorized());
            }
        };

        let parsed = match parse_basic_credentials(header) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(reason = %e, "system auth failed");
                return Err(unauthorized());
            }
        };

        let credential = self
            .db
            .find_system_credential(&parsed.public_part)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "system auth: credential lookup failed");
                e
            })?;

        let credential = match credential {
            Some(row) => row,
            None => {
                tracing::warn!(reason = "system not found", "system auth failed");
                return Err(unauthorized());
            }
        };

        let key_matches: bool = credential
            .system_key
            .as_bytes()
            .ct_eq(parsed.username.as_bytes())
            .into();
        if !key_matches {
            tracing::warn!(reason = "system key mismatch", "system auth failed");
            return Err(unauthorized());
        }

        match verify_secret(
            &SystemSecret::new(parsed.secret_part),
            &SecretHashString::new(credential.secret_hash),
        ) {
            Ok(true) => Ok(credential.organization_id),
            Ok(false) => {
                tracing::warn!(reason = "secret verification failed", "system auth failed");
                Err(unauthorized())
            }
            Err(e) => {
                tracing::error!(error = %e, "system auth: secret verification error");
                Err(AppError::InternalError(e))
            }
        }
    }
}

fn unauthorized() -> AppError {
    AppError::Unauthorized(anyhow::anyhow!("unauthorized"))
}
