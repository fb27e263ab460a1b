pub mod auth;
pub mod insights;
pub mod reports;
pub mod users;
