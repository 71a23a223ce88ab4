use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON extractor that turns body rejections into the `{mensaje}` envelope.
///
/// A request with a malformed body is rejected explicitly with 400; it never
/// reaches a handler as a half-parsed or defaulted value. The login endpoint
/// relies on this to distinguish malformed credentials from wrong ones.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(AppJsonRejection)
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let mensaje = match self.0 {
            JsonRejection::JsonSyntaxError(err) => {
                format!("El cuerpo de la petición no es JSON válido: {}", err)
            }
            JsonRejection::JsonDataError(err) => {
                format!("El cuerpo JSON no tiene la forma esperada: {}", err)
            }
            JsonRejection::MissingJsonContentType(_) => {
                "La petición debe enviarse con Content-Type: application/json".to_string()
            }
            _ => "No se pudo leer el cuerpo de la petición".to_string(),
        };

        AppError::BadRequest(mensaje).into_response()
    }
}

/// Pulls the principal installed by the bearer-token middleware out of the
/// request extensions; a route reached without one is rejected with 401.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Autenticación requerida".to_string()))
    }
}
