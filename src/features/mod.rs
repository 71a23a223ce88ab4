pub mod auth;
pub mod clients;
