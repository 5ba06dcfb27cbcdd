//! User CRUD service
//!
//! Five REST endpoints over a single `users` table: paginated listing,
//! create, read, full update and delete, each answering with the
//! `{ "is_success": ..., ... }` envelope.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
