use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::core::error::ErrorBody;
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, model as auth_model};
use crate::features::clients::{
    dtos as clients_dtos, handlers as clients_handlers, models as clients_models,
};
use crate::shared::types::Page;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        // Clients
        clients_handlers::index,
        clients_handlers::index_paged,
        clients_handlers::show,
        clients_handlers::create,
        clients_handlers::update,
        clients_handlers::delete,
        clients_handlers::upload,
        clients_handlers::ver_foto,
        clients_handlers::regiones,
    ),
    components(
        schemas(
            // Shared
            ErrorBody,
            Page<clients_models::Cliente>,
            // Auth
            auth_dtos::CredencialesDto,
            auth_dtos::LoginResponseDto,
            auth_model::AuthenticatedUser,
            // Clients
            clients_models::Cliente,
            clients_models::Region,
            clients_dtos::SaveClienteDto,
            clients_dtos::RegionRefDto,
            clients_dtos::ClienteEnvelope,
            clients_dtos::MensajeEnvelope,
            clients_dtos::UploadFotoForm,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "clientes", description = "Client records, regions and photo uploads"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Clientes API",
        version = "0.1.0",
        description = "API documentation for the Clientes backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
