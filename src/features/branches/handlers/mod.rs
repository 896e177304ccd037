pub mod branch_handler;

pub use branch_handler::*;
