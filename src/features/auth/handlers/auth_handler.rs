use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{CredencialesDto, LoginResponseDto};
use crate::features::auth::services::AuthService;

/// Login with username and password.
///
/// On success the access token is attached to the response as
/// `Authorization: Bearer <token>`; subsequent requests present it back in
/// the same header. A malformed JSON body is rejected with 400 instead of
/// being treated as empty credentials.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredencialesDto,
    responses(
        (status = 200, description = "Authenticated; token in the Authorization response header", body = LoginResponseDto),
        (status = 400, description = "Malformed credentials body"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<CredencialesDto>,
) -> Result<(HeaderMap, Json<LoginResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (user, token) = service.login(&dto.username, &dto.password).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| AppError::Internal(format!("Token is not header-safe: {}", e)))?,
    );

    Ok((
        headers,
        Json(LoginResponseDto {
            mensaje: "Autenticación exitosa".to_string(),
            username: user.username,
        }),
    ))
}
