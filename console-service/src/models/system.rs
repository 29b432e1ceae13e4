//! System credential model - machine identities bound to one organization.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Full credential row from the `systems` table.
///
/// Only rows with `deleted_at` and `suspended_at` both unset may
/// authenticate.
#[derive(Debug, Clone, FromRow)]
pub struct SystemCredential {
    pub id: i64,
    /// Public system key; must match the Basic-auth username exactly.
    pub system_key: String,
    /// Public half of the machine credential, used for lookup.
    pub secret_public: String,
    /// Argon2id PHC hash of the secret half; never compared on plaintext.
    pub secret_hash: String,
    pub organization_id: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub suspended_at: Option<DateTime<Utc>>,
}

/// System row as exposed in listings; carries no secret material.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SystemSummary {
    pub id: i64,
    pub system_key: String,
    pub organization_id: String,
    pub suspended_at: Option<DateTime<Utc>>,
}
