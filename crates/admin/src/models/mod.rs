//! Request-scoped models for the admin API.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
