use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, warn};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::clients::dtos::{
    ClienteEnvelope, MensajeEnvelope, SaveClienteDto, UploadFotoForm,
};
use crate::features::clients::models::{Cliente, Region};
use crate::features::clients::routes::ClientesState;
use crate::shared::types::Page;

fn cliente_no_existe(id: i64) -> AppError {
    AppError::NotFound(format!(
        "El cliente ID: {} no existe en la base de datos",
        id
    ))
}

/// List all clients
#[utoipa::path(
    get,
    path = "/api/clientes",
    responses(
        (status = 200, description = "All clients", body = Vec<Cliente>)
    ),
    tag = "clientes",
    security(("bearer_auth" = []))
)]
pub async fn index(State(state): State<ClientesState>) -> Result<Json<Vec<Cliente>>> {
    Ok(Json(state.clientes.find_all().await?))
}

/// Paged client listing with a fixed page size of 4
#[utoipa::path(
    get,
    path = "/api/clientes/page/{page}",
    params(("page" = i64, Path, description = "Zero-indexed page number")),
    responses(
        (status = 200, description = "One page of clients", body = Page<Cliente>)
    ),
    tag = "clientes",
    security(("bearer_auth" = []))
)]
pub async fn index_paged(
    State(state): State<ClientesState>,
    Path(page): Path<i64>,
) -> Result<Json<Page<Cliente>>> {
    Ok(Json(state.clientes.find_page(page).await?))
}

/// Fetch a single client by id
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    params(("id" = i64, Path, description = "Client id")),
    responses(
        (status = 200, description = "The client", body = Cliente),
        (status = 404, description = "No client with that id")
    ),
    tag = "clientes",
    security(("bearer_auth" = []))
)]
pub async fn show(
    State(state): State<ClientesState>,
    Path(id): Path<i64>,
) -> Result<Json<Cliente>> {
    let cliente = state
        .clientes
        .find_by_id(id)
        .await?
        .ok_or_else(|| cliente_no_existe(id))?;

    Ok(Json(cliente))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/api/clientes",
    request_body = SaveClienteDto,
    responses(
        (status = 201, description = "Client created", body = ClienteEnvelope),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Persistence failure")
    ),
    tag = "clientes",
    security(("bearer_auth" = []))
)]
pub async fn create(
    State(state): State<ClientesState>,
    AppJson(dto): AppJson<SaveClienteDto>,
) -> Result<(StatusCode, Json<ClienteEnvelope>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let nuevo = state.clientes.save(dto.into_cliente(None, None)).await?;

    Ok((
        StatusCode::CREATED,
        Json(ClienteEnvelope {
            mensaje: Some("El cliente ha sido creado con éxito".to_string()),
            cliente: Some(nuevo),
        }),
    ))
}

/// Update a client.
///
/// Applies the mutable-field whitelist (nombre, apellido, email, createAt,
/// region) onto the stored entity; the photo is left untouched.
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    params(("id" = i64, Path, description = "Client id")),
    request_body = SaveClienteDto,
    responses(
        (status = 201, description = "Client updated", body = ClienteEnvelope),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No client with that id"),
        (status = 500, description = "Persistence failure")
    ),
    tag = "clientes",
    security(("bearer_auth" = []))
)]
pub async fn update(
    State(state): State<ClientesState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<SaveClienteDto>,
) -> Result<(StatusCode, Json<ClienteEnvelope>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let actual = state.clientes.find_by_id(id).await?.ok_or_else(|| {
        AppError::NotFound(format!(
            "Error: no se pudo editar, el cliente ID: {} no existe en la base de datos",
            id
        ))
    })?;

    let actualizado = state
        .clientes
        .save(dto.into_cliente(actual.id, actual.foto))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ClienteEnvelope {
            mensaje: Some("El cliente ha sido actualizado con éxito".to_string()),
            cliente: Some(actualizado),
        }),
    ))
}

/// Delete a client.
///
/// The photo file is removed before the row so an interrupted delete cannot
/// leave a row pointing at a missing file; the reverse leftover (a file
/// without a row) is accepted and logged.
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    params(("id" = i64, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client deleted", body = MensajeEnvelope),
        (status = 404, description = "No client with that id"),
        (status = 500, description = "Persistence failure")
    ),
    tag = "clientes",
    security(("bearer_auth" = []))
)]
pub async fn delete(
    State(state): State<ClientesState>,
    Path(id): Path<i64>,
) -> Result<Json<MensajeEnvelope>> {
    let cliente = state
        .clientes
        .find_by_id(id)
        .await?
        .ok_or_else(|| cliente_no_existe(id))?;

    if let Some(foto) = &cliente.foto {
        if let Err(e) = state.uploads.delete(foto).await {
            warn!("Could not remove photo '{}' of cliente {}: {}", foto, id, e);
        }
    }

    state.clientes.delete(&cliente).await?;

    Ok(Json(MensajeEnvelope {
        mensaje: "El cliente ha sido eliminado con éxito".to_string(),
    }))
}

/// Upload a client photo.
///
/// Accepts multipart/form-data with:
/// - `archivo`: the image file
/// - `id`: the target client id
///
/// An empty payload is a silent no-op that returns an empty success
/// envelope. The new file is written first; only once the write is confirmed
/// is the previous photo removed and the row updated.
#[utoipa::path(
    post,
    path = "/api/clientes/upload",
    request_body(
        content = UploadFotoForm,
        content_type = "multipart/form-data",
        description = "Photo upload form with the target client id",
    ),
    responses(
        (status = 201, description = "Photo stored, or empty-file no-op", body = ClienteEnvelope),
        (status = 400, description = "Malformed multipart payload"),
        (status = 404, description = "No client with that id"),
        (status = 500, description = "Upload write failure")
    ),
    tag = "clientes",
    security(("bearer_auth" = []))
)]
pub async fn upload(
    State(state): State<ClientesState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ClienteEnvelope>)> {
    let mut archivo: Option<(String, Vec<u8>)> = None;
    let mut id: Option<i64> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "archivo" => {
                let nombre_original = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "archivo".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                archivo = Some((nombre_original, data.to_vec()));
            }
            "id" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read id field: {}", e))
                })?;
                id = Some(text.trim().parse().map_err(|_| {
                    AppError::BadRequest("El campo 'id' debe ser numérico".to_string())
                })?);
            }
            other => {
                debug!("Ignoring unknown multipart field: {}", other);
            }
        }
    }

    let id = id.ok_or_else(|| AppError::BadRequest("Falta el campo 'id'".to_string()))?;

    let mut cliente = state
        .clientes
        .find_by_id(id)
        .await?
        .ok_or_else(|| cliente_no_existe(id))?;

    // Empty payload: success envelope without a cliente, record untouched.
    let Some((nombre_original, data)) = archivo.filter(|(_, data)| !data.is_empty()) else {
        return Ok((
            StatusCode::CREATED,
            Json(ClienteEnvelope {
                mensaje: None,
                cliente: None,
            }),
        ));
    };

    // Write the new file before touching anything else; a failed write must
    // leave the previous photo and its reference intact.
    let almacenado = state.uploads.store(&data, &nombre_original).await?;

    if let Some(anterior) = cliente.foto.take() {
        if let Err(e) = state.uploads.delete(&anterior).await {
            warn!(
                "Could not remove previous photo '{}' of cliente {}: {}",
                anterior, id, e
            );
        }
    }

    cliente.foto = Some(almacenado.clone());
    let actualizado = state.clientes.save(cliente).await?;

    Ok((
        StatusCode::CREATED,
        Json(ClienteEnvelope {
            mensaje: Some(format!(
                "Has subido correctamente la imagen: {}",
                almacenado
            )),
            cliente: Some(actualizado),
        }),
    ))
}

/// Download a stored client photo
#[utoipa::path(
    get,
    path = "/api/uploads/img/{filename}",
    params(("filename" = String, Path, description = "Stored photo filename")),
    responses(
        (status = 200, description = "Photo bytes as attachment"),
        (status = 404, description = "Unknown filename or path outside the upload root")
    ),
    tag = "clientes",
    security(("bearer_auth" = []))
)]
pub async fn ver_foto(
    State(state): State<ClientesState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let data = state.uploads.load(&filename).await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, data).into_response())
}

/// List the region lookup table
#[utoipa::path(
    get,
    path = "/api/clientes/regiones",
    responses(
        (status = 200, description = "All regions", body = Vec<Region>)
    ),
    tag = "clientes",
    security(("bearer_auth" = []))
)]
pub async fn regiones(State(state): State<ClientesState>) -> Result<Json<Vec<Region>>> {
    Ok(Json(state.clientes.find_all_regiones().await?))
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use super::*;
    use crate::core::error::ErrorBody;
    use crate::features::clients::routes;
    use crate::features::clients::services::ClienteService;
    use crate::modules::storage::UploadStore;
    use crate::shared::validation::{is_safe_filename, sanitize_filename};

    /// Map-backed service double implementing the full persistence contract
    struct InMemoryClienteService {
        clientes: Mutex<BTreeMap<i64, Cliente>>,
        next_id: AtomicI64,
        regiones: Vec<Region>,
    }

    impl Default for InMemoryClienteService {
        fn default() -> Self {
            Self {
                clientes: Mutex::new(BTreeMap::new()),
                next_id: AtomicI64::new(1),
                regiones: vec![
                    Region {
                        id: 1,
                        nombre: "Sudamérica".to_string(),
                    },
                    Region {
                        id: 2,
                        nombre: "Europa".to_string(),
                    },
                ],
            }
        }
    }

    impl InMemoryClienteService {
        fn region_nombre(&self, id: i64) -> String {
            self.regiones
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.nombre.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl ClienteService for InMemoryClienteService {
        async fn find_all(&self) -> crate::core::error::Result<Vec<Cliente>> {
            Ok(self.clientes.lock().unwrap().values().cloned().collect())
        }

        async fn find_page(&self, page: i64) -> crate::core::error::Result<Page<Cliente>> {
            let page = page.max(0);
            let size = crate::shared::constants::CLIENTES_PAGE_SIZE;
            let all: Vec<Cliente> = self.clientes.lock().unwrap().values().cloned().collect();
            let total = all.len() as i64;
            let content = all
                .into_iter()
                .skip((page * size) as usize)
                .take(size as usize)
                .collect();
            Ok(Page::new(content, page, size, total))
        }

        async fn find_by_id(&self, id: i64) -> crate::core::error::Result<Option<Cliente>> {
            Ok(self.clientes.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, mut cliente: Cliente) -> crate::core::error::Result<Cliente> {
            // The join repopulates the authoritative region name.
            cliente.region.nombre = self.region_nombre(cliente.region.id);

            let id = match cliente.id {
                Some(id) => id,
                None => self.next_id.fetch_add(1, Ordering::SeqCst),
            };
            cliente.id = Some(id);

            self.clientes.lock().unwrap().insert(id, cliente.clone());
            Ok(cliente)
        }

        async fn delete(&self, cliente: &Cliente) -> crate::core::error::Result<()> {
            if let Some(id) = cliente.id {
                self.clientes.lock().unwrap().remove(&id);
            }
            Ok(())
        }

        async fn find_all_regiones(&self) -> crate::core::error::Result<Vec<Region>> {
            Ok(self.regiones.clone())
        }
    }

    /// Upload-store double that records stored and deleted names; can be
    /// switched to fail every write.
    #[derive(Default)]
    struct RecordingUploadStore {
        files: Mutex<HashSet<String>>,
        fail_store: bool,
    }

    #[async_trait]
    impl UploadStore for RecordingUploadStore {
        async fn store(
            &self,
            _data: &[u8],
            original_filename: &str,
        ) -> crate::core::error::Result<String> {
            if self.fail_store {
                return Err(AppError::FileIo(std::io::Error::other("disco lleno")));
            }
            let nombre = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_filename));
            self.files.lock().unwrap().insert(nombre.clone());
            Ok(nombre)
        }

        async fn load(&self, filename: &str) -> crate::core::error::Result<Vec<u8>> {
            if !is_safe_filename(filename) || !self.files.lock().unwrap().contains(filename) {
                return Err(AppError::NotFound(format!(
                    "El archivo '{}' no existe",
                    filename
                )));
            }
            Ok(b"png-bytes".to_vec())
        }

        async fn delete(&self, filename: &str) -> crate::core::error::Result<()> {
            self.files.lock().unwrap().remove(filename);
            Ok(())
        }
    }

    struct TestCtx {
        server: TestServer,
        clientes: Arc<InMemoryClienteService>,
        uploads: Arc<RecordingUploadStore>,
    }

    fn test_ctx() -> TestCtx {
        test_ctx_with(false)
    }

    fn test_ctx_with(fail_store: bool) -> TestCtx {
        let clientes = Arc::new(InMemoryClienteService::default());
        let uploads = Arc::new(RecordingUploadStore {
            fail_store,
            ..Default::default()
        });

        let state = routes::ClientesState {
            clientes: clientes.clone(),
            uploads: uploads.clone(),
        };

        TestCtx {
            server: TestServer::new(routes::routes(state)).expect("test server should start"),
            clientes,
            uploads,
        }
    }

    async fn seed_cliente(ctx: &TestCtx, foto: Option<&str>) -> Cliente {
        if let Some(f) = foto {
            ctx.uploads.files.lock().unwrap().insert(f.to_string());
        }

        let nombre: String = FirstName().fake();
        let apellido: String = LastName().fake();
        let email: String = SafeEmail().fake();

        ctx.clientes
            .save(Cliente {
                id: None,
                nombre,
                apellido: Some(apellido),
                email,
                create_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                foto: foto.map(|f| f.to_string()),
                region: Region {
                    id: 1,
                    nombre: String::new(),
                },
            })
            .await
            .expect("seeding should succeed")
    }

    /// Hand-built multipart body so tests control the exact wire payload
    fn multipart_body(id: &str, archivo: Option<(&str, &[u8])>) -> (String, Vec<u8>) {
        let boundary = "clientes-test-boundary";
        let mut body = Vec::new();

        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"id\"\r\n\r\n{id}\r\n"
            )
            .as_bytes(),
        );

        if let Some((filename, data)) = archivo {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"archivo\"; \
                     filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        (
            format!("multipart/form-data; boundary={boundary}"),
            body,
        )
    }

    #[tokio::test]
    async fn create_then_fetch_returns_equivalent_record() {
        let ctx = test_ctx();

        let payload = json!({
            "nombre": "Ana",
            "apellido": "García",
            "email": "ana.garcia@example.com",
            "createAt": "2024-03-01",
            "region": {"id": 1, "nombre": "Sudamérica"}
        });

        let response = ctx.server.post("/api/clientes").json(&payload).await;
        response.assert_status(StatusCode::CREATED);

        let envelope: ClienteEnvelope = response.json();
        assert_eq!(
            envelope.mensaje.as_deref(),
            Some("El cliente ha sido creado con éxito")
        );
        let creado = envelope.cliente.expect("create must return the cliente");
        let id = creado.id.expect("persisted cliente must have an id");

        let fetched: Cliente = ctx.server.get(&format!("/api/clientes/{}", id)).await.json();
        assert_eq!(fetched, creado);
        assert_eq!(fetched.nombre, "Ana");
        assert_eq!(fetched.region.nombre, "Sudamérica");
        assert_eq!(fetched.create_at, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(fetched.foto, None);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload() {
        let ctx = test_ctx();

        let response = ctx
            .server
            .post("/api/clientes")
            .json(&json!({
                "nombre": "",
                "email": "no-es-un-email",
                "createAt": "2024-03-01",
                "region": {"id": 1}
            }))
            .await;

        response.assert_status_bad_request();
        assert!(ctx.clientes.clientes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn show_unknown_id_is_404_with_mensaje() {
        let ctx = test_ctx();

        let response = ctx.server.get("/api/clientes/42").await;
        response.assert_status_not_found();

        let body: ErrorBody = response.json();
        assert_eq!(
            body.mensaje,
            "El cliente ID: 42 no existe en la base de datos"
        );
        assert!(body.error.is_none());
    }

    #[tokio::test]
    async fn update_applies_whitelist_and_keeps_photo() {
        let ctx = test_ctx();
        let seeded = seed_cliente(&ctx, Some("abc_foto.png")).await;
        let id = seeded.id.unwrap();

        let response = ctx
            .server
            .put(&format!("/api/clientes/{}", id))
            .json(&json!({
                "nombre": "Renombrado",
                "apellido": "Actualizado",
                "email": "nuevo@example.com",
                "createAt": "2023-12-24",
                "region": {"id": 2}
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let envelope: ClienteEnvelope = response.json();
        let actualizado = envelope.cliente.expect("update must return the cliente");

        assert_eq!(actualizado.id, Some(id));
        assert_eq!(actualizado.nombre, "Renombrado");
        assert_eq!(actualizado.region, Region { id: 2, nombre: "Europa".to_string() });
        // The photo is outside the update whitelist.
        assert_eq!(actualizado.foto.as_deref(), Some("abc_foto.png"));
    }

    #[tokio::test]
    async fn update_unknown_id_is_404_and_mutates_nothing() {
        let ctx = test_ctx();

        let response = ctx
            .server
            .put("/api/clientes/99")
            .json(&json!({
                "nombre": "Fantasma",
                "email": "fantasma@example.com",
                "createAt": "2024-03-01",
                "region": {"id": 1}
            }))
            .await;

        response.assert_status_not_found();
        let body: ErrorBody = response.json();
        assert_eq!(
            body.mensaje,
            "Error: no se pudo editar, el cliente ID: 99 no existe en la base de datos"
        );
        assert!(ctx.clientes.clientes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_row_and_photo_file() {
        let ctx = test_ctx();
        let seeded = seed_cliente(&ctx, Some("abc_foto.png")).await;
        let id = seeded.id.unwrap();

        let response = ctx.server.delete(&format!("/api/clientes/{}", id)).await;
        response.assert_status_ok();

        let envelope: MensajeEnvelope = response.json();
        assert_eq!(envelope.mensaje, "El cliente ha sido eliminado con éxito");

        assert!(ctx.clientes.clientes.lock().unwrap().is_empty());
        assert!(!ctx.uploads.files.lock().unwrap().contains("abc_foto.png"));
    }

    #[tokio::test]
    async fn delete_without_photo_succeeds() {
        let ctx = test_ctx();
        let seeded = seed_cliente(&ctx, None).await;
        let id = seeded.id.unwrap();

        let response = ctx.server.delete(&format!("/api/clientes/{}", id)).await;
        response.assert_status_ok();
        assert!(ctx.clientes.clientes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_404() {
        let ctx = test_ctx();
        let response = ctx.server.delete("/api/clientes/7").await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn upload_replaces_old_photo_after_new_one_is_written() {
        let ctx = test_ctx();
        let seeded = seed_cliente(&ctx, Some("vieja_foto.png")).await;
        let id = seeded.id.unwrap();

        let (content_type, body) =
            multipart_body(&id.to_string(), Some(("nueva foto.png", b"nuevos-bytes")));
        let response = ctx
            .server
            .post("/api/clientes/upload")
            .content_type(&content_type)
            .bytes(body.into())
            .await;

        response.assert_status(StatusCode::CREATED);
        let envelope: ClienteEnvelope = response.json();
        let actualizado = envelope.cliente.expect("upload must return the cliente");

        let nueva = actualizado.foto.expect("cliente must reference the new photo");
        assert!(nueva.ends_with("_nuevafoto.png"));
        assert_eq!(
            envelope.mensaje,
            Some(format!("Has subido correctamente la imagen: {}", nueva))
        );

        let files = ctx.uploads.files.lock().unwrap();
        assert!(files.contains(&nueva));
        assert!(!files.contains("vieja_foto.png"));
    }

    #[tokio::test]
    async fn failed_upload_write_preserves_old_photo_and_reference() {
        let ctx = test_ctx_with(true);
        let seeded = seed_cliente(&ctx, Some("vieja_foto.png")).await;
        let id = seeded.id.unwrap();

        let (content_type, body) =
            multipart_body(&id.to_string(), Some(("nueva.png", b"nuevos-bytes")));
        let response = ctx
            .server
            .post("/api/clientes/upload")
            .content_type(&content_type)
            .bytes(body.into())
            .await;

        response.assert_status_internal_server_error();
        let error: ErrorBody = response.json();
        assert_eq!(error.mensaje, "Error al subir la imagen");
        assert!(error.error.is_some());

        // Old file untouched, old reference still in place.
        assert!(ctx.uploads.files.lock().unwrap().contains("vieja_foto.png"));
        let stored = ctx.clientes.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.foto.as_deref(), Some("vieja_foto.png"));
    }

    #[tokio::test]
    async fn empty_file_upload_is_a_silent_noop() {
        let ctx = test_ctx();
        let seeded = seed_cliente(&ctx, Some("vieja_foto.png")).await;
        let id = seeded.id.unwrap();

        let (content_type, body) = multipart_body(&id.to_string(), Some(("vacio.png", b"")));
        let response = ctx
            .server
            .post("/api/clientes/upload")
            .content_type(&content_type)
            .bytes(body.into())
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body, json!({}));

        let stored = ctx.clientes.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored, seeded);
        assert!(ctx.uploads.files.lock().unwrap().contains("vieja_foto.png"));
    }

    #[tokio::test]
    async fn upload_for_unknown_cliente_is_404() {
        let ctx = test_ctx();

        let (content_type, body) = multipart_body("123", Some(("foto.png", b"bytes")));
        let response = ctx
            .server
            .post("/api/clientes/upload")
            .content_type(&content_type)
            .bytes(body.into())
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn paged_listing_slices_by_four_and_reports_totals() {
        let ctx = test_ctx();
        for _ in 0..10 {
            seed_cliente(&ctx, None).await;
        }

        let page0: Page<Cliente> = ctx.server.get("/api/clientes/page/0").await.json();
        assert_eq!(page0.content.len(), 4);
        assert_eq!(page0.number, 0);
        assert_eq!(page0.size, 4);
        assert_eq!(page0.total_elements, 10);
        assert_eq!(page0.total_pages, 3);

        let page2: Page<Cliente> = ctx.server.get("/api/clientes/page/2").await.json();
        assert_eq!(page2.content.len(), 2);
        assert_eq!(page2.number, 2);

        // Pages are disjoint slices in listing order.
        let ids = |page: &Page<Cliente>| -> Vec<i64> {
            page.content.iter().filter_map(|c| c.id).collect()
        };
        assert_eq!(ids(&page0), vec![1, 2, 3, 4]);
        assert_eq!(ids(&page2), vec![9, 10]);
    }

    #[tokio::test]
    async fn photo_download_sets_attachment_disposition() {
        let ctx = test_ctx();
        ctx.uploads
            .files
            .lock()
            .unwrap()
            .insert("abc_foto.png".to_string());

        let response = ctx.server.get("/api/uploads/img/abc_foto.png").await;
        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get("content-disposition")
                .and_then(|v| v.to_str().ok()),
            Some("attachment; filename=\"abc_foto.png\"")
        );
        assert_eq!(response.as_bytes().to_vec(), b"png-bytes".to_vec());
    }

    #[tokio::test]
    async fn photo_download_rejects_path_traversal() {
        let ctx = test_ctx();

        let response = ctx
            .server
            .get("/api/uploads/img/..%2F..%2Fetc%2Fpasswd")
            .await;
        response.assert_status_not_found();

        let response = ctx.server.get("/api/uploads/img/..foto.png").await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn regiones_lists_the_lookup_table() {
        let ctx = test_ctx();

        let regiones: Vec<Region> = ctx.server.get("/api/clientes/regiones").await.json();
        assert_eq!(regiones.len(), 2);
        assert_eq!(regiones[0].nombre, "Sudamérica");
    }
}
