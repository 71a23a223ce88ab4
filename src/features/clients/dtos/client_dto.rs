use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::clients::models::{Cliente, Region};

/// Payload for create and update operations.
///
/// The photo filename is deliberately absent: `foto` changes only through
/// the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveClienteDto {
    #[validate(length(min = 1, message = "el nombre no puede estar vacío"))]
    pub nombre: String,

    pub apellido: Option<String>,

    #[validate(
        length(min = 1, message = "el email no puede estar vacío"),
        email(message = "no es una dirección de correo bien formada")
    )]
    pub email: String,

    #[serde(rename = "createAt")]
    pub create_at: NaiveDate,

    pub region: RegionRefDto,
}

/// Region reference carried by a save payload; only the id is honored, the
/// authoritative name always comes from the lookup table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionRefDto {
    pub id: i64,
    pub nombre: Option<String>,
}

impl SaveClienteDto {
    /// Build the domain entity this payload describes, keeping `id` and
    /// `foto` from the caller (both are outside the update whitelist).
    pub fn into_cliente(self, id: Option<i64>, foto: Option<String>) -> Cliente {
        Cliente {
            id,
            nombre: self.nombre,
            apellido: self.apellido,
            email: self.email,
            create_at: self.create_at,
            foto,
            region: Region {
                id: self.region.id,
                nombre: self.region.nombre.unwrap_or_default(),
            },
        }
    }
}

/// Success envelope for create, update and upload responses.
///
/// The empty-file upload no-op returns it with both fields absent, which
/// serializes to `{}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClienteEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente: Option<Cliente>,
}

/// Success envelope for delete responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MensajeEnvelope {
    pub mensaje: String,
}

/// Multipart form accepted by the photo upload endpoint
#[derive(Debug, ToSchema)]
pub struct UploadFotoForm {
    /// Image payload
    #[schema(value_type = String, format = Binary)]
    pub archivo: String,
    /// Target client id
    pub id: i64,
}
