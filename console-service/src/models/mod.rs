pub mod identity;
pub mod role;
pub mod system;

pub use identity::{CallerIdentity, OrganizationTier, UnknownTierError};
pub use role::{CatalogRole, Role, RoleAccessControl};
pub use system::{SystemCredential, SystemSummary};
