//! Client management feature: CRUD over client records, region lookups and
//! photo uploads.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/clientes` | Yes | List all clients |
//! | GET | `/api/clientes/page/{page}` | Yes | Paged listing (page size 4) |
//! | GET | `/api/clientes/{id}` | Yes | Fetch one client |
//! | POST | `/api/clientes` | Yes | Create a client |
//! | PUT | `/api/clientes/{id}` | Yes | Update a client |
//! | DELETE | `/api/clientes/{id}` | Yes | Delete a client and its photo |
//! | POST | `/api/clientes/upload` | Yes | Upload a client photo (multipart) |
//! | GET | `/api/uploads/img/{filename}` | Yes | Download a stored photo |
//! | GET | `/api/clientes/regiones` | Yes | List the region lookup table |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::ClientesState;
pub use services::{ClienteService, PgClienteService};
