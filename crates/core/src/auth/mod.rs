//! Authentication logic.

pub mod password;

pub use password::{PasswordError, hash_password, validate_password_strength, verify_password};
