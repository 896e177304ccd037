//! Bearer-token authentication collaborator.
//!
//! Every `/api` endpoint is gated by an opaque token lookup against the users
//! table; the resolved user becomes the acting user on audit log rows.

pub mod model;
pub mod services;

pub use services::AuthService;
