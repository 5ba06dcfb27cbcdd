//! API models for request and response payloads

pub mod envelope;
pub mod pagination;
pub mod user;

// Re-export for convenience
pub use envelope::Envelope;
pub use pagination::{ListQuery, PageRequest};
pub use user::{User, UserData, UserFields, UserPayload, UserResponse};
