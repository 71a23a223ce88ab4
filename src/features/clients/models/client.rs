use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Region lookup entry referenced by many clients; read-only for this service
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Region {
    pub id: i64,
    pub nombre: String,
}

/// Client record with its region populated.
///
/// `id` is `None` only before the first insert; it is server-generated and
/// immutable afterwards. `foto` is set exclusively by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cliente {
    pub id: Option<i64>,
    pub nombre: String,
    pub apellido: Option<String>,
    pub email: String,
    /// Date-only precision, serialized as `createAt` for existing consumers
    #[serde(rename = "createAt")]
    pub create_at: NaiveDate,
    pub foto: Option<String>,
    pub region: Region,
}

/// Flat row produced by the clientes-regiones join
#[derive(Debug, FromRow)]
pub struct ClienteRow {
    pub id: i64,
    pub nombre: String,
    pub apellido: Option<String>,
    pub email: String,
    pub create_at: NaiveDate,
    pub foto: Option<String>,
    pub region_id: i64,
    pub region_nombre: String,
}

impl From<ClienteRow> for Cliente {
    fn from(row: ClienteRow) -> Self {
        Self {
            id: Some(row.id),
            nombre: row.nombre,
            apellido: row.apellido,
            email: row.email,
            create_at: row.create_at,
            foto: row.foto,
            region: Region {
                id: row.region_id,
                nombre: row.region_nombre,
            },
        }
    }
}
