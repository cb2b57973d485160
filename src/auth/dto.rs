use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for login. Fields are optional so a missing one is reported
/// as a validation failure rather than a body rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}
