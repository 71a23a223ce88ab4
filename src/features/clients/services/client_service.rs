use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::clients::models::{Cliente, ClienteRow, Region};
use crate::shared::constants::CLIENTES_PAGE_SIZE;
use crate::shared::types::Page;

/// Business-logic facade over client and region persistence.
///
/// A trait so handlers can run against test doubles; `PgClienteService` is
/// the single production adapter.
#[async_trait]
pub trait ClienteService: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Cliente>>;

    /// Zero-indexed page of fixed size [`CLIENTES_PAGE_SIZE`]
    async fn find_page(&self, page: i64) -> Result<Page<Cliente>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>>;

    /// Insert when `id` is `None`, update when it is `Some`; returns the
    /// persisted entity with its region populated.
    async fn save(&self, cliente: Cliente) -> Result<Cliente>;

    async fn delete(&self, cliente: &Cliente) -> Result<()>;

    async fn find_all_regiones(&self) -> Result<Vec<Region>>;
}

const SELECT_CLIENTE: &str = "\
    SELECT c.id, c.nombre, c.apellido, c.email, c.create_at, c.foto, \
           r.id AS region_id, r.nombre AS region_nombre \
    FROM clientes c \
    JOIN regiones r ON r.id = c.region_id";

/// Postgres-backed client service
pub struct PgClienteService {
    pool: PgPool,
}

impl PgClienteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_saved(&self, id: i64) -> Result<Cliente> {
        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(format!("Cliente {} missing right after save", id))
        })
    }
}

#[async_trait]
impl ClienteService for PgClienteService {
    async fn find_all(&self) -> Result<Vec<Cliente>> {
        let rows = sqlx::query_as::<_, ClienteRow>(&format!("{} ORDER BY c.id ASC", SELECT_CLIENTE))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list clientes: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Cliente::from).collect())
    }

    async fn find_page(&self, page: i64) -> Result<Page<Cliente>> {
        let page = page.max(0);
        let size = CLIENTES_PAGE_SIZE;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clientes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count clientes: {:?}", e);
                AppError::Database(e)
            })?;

        let rows = sqlx::query_as::<_, ClienteRow>(&format!(
            "{} ORDER BY c.id ASC LIMIT $1 OFFSET $2",
            SELECT_CLIENTE
        ))
        .bind(size)
        .bind(page * size)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch cliente page {}: {:?}", page, e);
            AppError::Database(e)
        })?;

        let content = rows.into_iter().map(Cliente::from).collect();
        Ok(Page::new(content, page, size, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>> {
        let row = sqlx::query_as::<_, ClienteRow>(&format!("{} WHERE c.id = $1", SELECT_CLIENTE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch cliente {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(row.map(Cliente::from))
    }

    async fn save(&self, cliente: Cliente) -> Result<Cliente> {
        match cliente.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO clientes (nombre, apellido, email, create_at, foto, region_id) \
                     VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
                )
                .bind(&cliente.nombre)
                .bind(&cliente.apellido)
                .bind(&cliente.email)
                .bind(cliente.create_at)
                .bind(&cliente.foto)
                .bind(cliente.region.id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to insert cliente: {:?}", e);
                    AppError::Database(e)
                })?;

                tracing::info!("Cliente {} created", id);
                self.fetch_saved(id).await
            }
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE clientes \
                     SET nombre = $1, apellido = $2, email = $3, create_at = $4, foto = $5, region_id = $6 \
                     WHERE id = $7",
                )
                .bind(&cliente.nombre)
                .bind(&cliente.apellido)
                .bind(&cliente.email)
                .bind(cliente.create_at)
                .bind(&cliente.foto)
                .bind(cliente.region.id)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to update cliente {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!(
                        "El cliente ID: {} no existe en la base de datos",
                        id
                    )));
                }

                tracing::info!("Cliente {} updated", id);
                self.fetch_saved(id).await
            }
        }
    }

    async fn delete(&self, cliente: &Cliente) -> Result<()> {
        let Some(id) = cliente.id else {
            return Ok(());
        };

        sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete cliente {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        tracing::info!("Cliente {} deleted", id);
        Ok(())
    }

    async fn find_all_regiones(&self) -> Result<Vec<Region>> {
        let regiones =
            sqlx::query_as::<_, Region>("SELECT id, nombre FROM regiones ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list regiones: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(regiones)
    }
}
