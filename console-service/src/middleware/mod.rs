pub mod identity;

pub use identity::{caller_identity_middleware, Identity, CALLER_CONTEXT_HEADER};
