use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{LoginRequest, LoginResponse},
    jwt::JwtKeys,
    password::verify_password,
};
use crate::{
    error::{ApiError, ErrorBody},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/siswa/login",
    tag = "Siswa",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = ErrorBody),
        (status = 401, description = "Wrong password", body = ErrorBody),
        (status = 404, description = "No siswa with that email", body = ErrorBody),
        (status = 500, description = "Store or hasher failure", body = ErrorBody)
    )
)]
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload?;
    let email = required(payload.email.map(|e| e.trim().to_string()), "email")?;
    let password = required(payload.password, "password")?;

    let Some(siswa) = state.store.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(ApiError::NotFound("Cannot find user".into()));
    };

    let ok = match siswa.password_hash.as_deref() {
        Some(hash) => verify_password(&password, hash)?,
        None => false,
    };
    if !ok {
        warn!(email = %email, id = %siswa.id, "login wrong password");
        return Err(ApiError::WrongPassword);
    }

    let access_token = JwtKeys::from_ref(&state).sign(&siswa.email)?;
    info!(id = %siswa.id, email = %siswa.email, "siswa logged in");
    Ok(Json(LoginResponse { access_token }))
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!("{field} is required"))),
    }
}
