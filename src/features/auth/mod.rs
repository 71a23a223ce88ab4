//! Authentication feature: login endpoint, token issuance and validation.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/login` | No | Exchange credentials for a bearer token |
//!
//! Every other route in the application sits behind the bearer-token gate in
//! `core::middleware::auth_middleware`.

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::{AuthService, PgCredentialVerifier, TokenService};
