mod core;
mod features;
mod modules;
mod shared;

use std::sync::Arc;

use axum::{middleware::from_fn, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::{AuthService, PgCredentialVerifier, TokenService};
use crate::features::clients::routes as clients_routes;
use crate::features::clients::{ClientesState, PgClienteService};
use crate::modules::storage::LocalUploadStore;

fn main() -> anyhow::Result<()> {
    // Runtime sized via TOKIO_WORKER_THREADS, defaulting to the machine
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // .env must be loaded before the logger so RUST_LOG takes effect
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded (pid={}, tokio_worker_threads={})",
        std::process::id(),
        worker_threads
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed");

    // Initialize token service with the signing keys from configuration
    let token_service = Arc::new(TokenService::new(&config.auth));
    tracing::info!(
        "Token service initialized (active key id: {})",
        config.auth.key_id
    );

    // Initialize auth service over the usuarios credential store
    let auth_service = Arc::new(AuthService::new(
        Arc::new(PgCredentialVerifier::new(pool.clone())),
        Arc::clone(&token_service),
    ));
    tracing::info!("Auth service initialized");

    // Initialize the upload store and make sure its root directory exists
    let upload_store = Arc::new(LocalUploadStore::new(&config.uploads.dir));
    upload_store
        .ensure_root_exists()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create upload root: {}", e))?;
    tracing::info!("Upload store initialized at '{}'", config.uploads.dir);

    // Initialize Cliente service
    let cliente_service = Arc::new(PgClienteService::new(pool.clone()));
    tracing::info!("Cliente service initialized");

    let clientes_state = ClientesState {
        clientes: cliente_service,
        uploads: upload_store,
    };

    // Swagger doc with config-driven info, optionally behind basic auth
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi);
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(swagger_ui)
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        Router::new().merge(swagger_ui)
    };

    // Protected routes (require a valid bearer token)
    let protected_routes = clients_routes::routes(clientes_state).route_layer(
        axum::middleware::from_fn_with_state(
            Arc::clone(&token_service),
            middleware::auth_middleware,
        ),
    );

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = auth_routes::public_routes(auth_service);

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // x-request-id: generated (or taken from the client) on the way in,
        // echoed on the way out, and stamped into every request span
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Listener built through socket2 so address reuse works across restarts
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
