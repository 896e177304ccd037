//! Append-only audit trail for every mutating operation.
//!
//! Rows are written on the same transaction as the mutation they document, so
//! a failed audit write rolls the business change back with it.

pub mod models;
pub mod services;
