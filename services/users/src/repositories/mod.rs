//! Repositories mediating access to the stores

pub mod user;

pub use user::{DeleteOutcome, UserRepository};
