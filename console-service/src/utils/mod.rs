pub mod secret;

pub use secret::{hash_secret, verify_secret, SecretHashString, SystemSecret};
