pub mod auth;
pub mod rank;
