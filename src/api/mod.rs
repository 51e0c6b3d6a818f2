//! Typed bindings for the admin backend's domain routes. Every module here
//! is a thin wrapper over the gateway's request envelope; all domain state
//! lives behind the remote API.

pub mod analytics;
pub mod campaigns;
pub mod merchants;
pub mod rewards;
pub mod risk;
pub mod system;
pub mod transactions;
pub mod types;
pub mod users;

pub use types::Pagination;
