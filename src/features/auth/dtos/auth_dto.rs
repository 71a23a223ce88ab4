use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CredencialesDto {
    #[validate(length(min = 1, message = "el username no puede estar vacío"))]
    pub username: String,

    #[validate(length(min = 1, message = "la contraseña no puede estar vacía"))]
    pub password: String,
}

/// Login response body; the token itself travels in the Authorization header
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    pub mensaje: String,
    pub username: String,
}
