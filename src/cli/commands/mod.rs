pub mod analytics;
pub mod auth;
pub mod campaigns;
pub mod rewards;
pub mod risk;
pub mod system;
pub mod transactions;
pub mod users;
