use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::clients::handlers;
use crate::features::clients::services::ClienteService;
use crate::modules::storage::UploadStore;

/// Shared state for the clients feature: the persistence facade plus the
/// photo store, both behind traits so tests can swap in doubles.
#[derive(Clone)]
pub struct ClientesState {
    pub clientes: Arc<dyn ClienteService>,
    pub uploads: Arc<dyn UploadStore>,
}

/// Create routes for the clients feature.
///
/// All of them are protected; the bearer-token middleware is layered on in
/// `main` so handler tests can exercise the routes directly.
pub fn routes(state: ClientesState) -> Router {
    Router::new()
        .route(
            "/api/clientes",
            get(handlers::index).post(handlers::create),
        )
        .route("/api/clientes/page/{page}", get(handlers::index_paged))
        .route("/api/clientes/regiones", get(handlers::regiones))
        .route("/api/clientes/upload", post(handlers::upload))
        .route(
            "/api/clientes/{id}",
            get(handlers::show)
                .put(handlers::update)
                .delete(handlers::delete),
        )
        .route("/api/uploads/img/{filename}", get(handlers::ver_foto))
        .with_state(state)
}
