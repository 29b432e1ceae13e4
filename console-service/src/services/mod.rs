pub mod catalog;
pub mod database;
pub mod hierarchy;
pub mod permissions;
pub mod role_cache;
pub mod system_auth;
pub mod upstream;
pub mod visibility;

pub use catalog::DbRoleCatalog;
pub use database::Database;
pub use hierarchy::HierarchyService;
pub use role_cache::{RoleAccessCache, RoleCatalog};
pub use system_auth::SystemAuthService;
pub use upstream::{DisabledUpstream, MetricsUpstream};
