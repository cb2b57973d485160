use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, instrument};

use super::{
    dto::{CreateSiswaRequest, DeleteSiswaResponse, UpdateSiswaRequest},
    pagination::{paginate, Page, PageQuery},
    repo_types::{NewSiswa, Siswa},
    resolver::Resolved,
};
use crate::{
    auth::{password::hash_password, AuthUser},
    docs::SiswaPage,
    error::{ApiError, ErrorBody},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/siswa",
    tag = "Siswa",
    request_body = CreateSiswaRequest,
    responses(
        (status = 201, description = "Siswa created", body = Siswa),
        (status = 400, description = "Missing or malformed field", body = ErrorBody)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_siswa(
    State(state): State<AppState>,
    payload: Result<Json<CreateSiswaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Siswa>), ApiError> {
    let Json(payload) = payload?;
    let valid = payload.validate()?;

    let password_hash = valid.password.as_deref().map(hash_password).transpose()?;

    let siswa = state
        .store
        .insert(NewSiswa {
            name: valid.name,
            email: valid.email,
            phone: valid.phone,
            department: valid.department,
            password_hash,
        })
        .await
        .map_err(|e| {
            error!(error = ?e, "insert siswa failed");
            ApiError::Validation(format!("{e:#}"))
        })?;

    info!(id = %siswa.id, email = %siswa.email, "siswa created");
    Ok((StatusCode::CREATED, Json(siswa)))
}

#[utoipa::path(
    get,
    path = "/siswa",
    tag = "Siswa",
    params(PageQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "One page of siswa, or all of them", body = SiswaPage),
        (status = 401, description = "No access token", body = ErrorBody),
        (status = 403, description = "Invalid or expired token", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
/// Behind the gate `auth` is the subject it admitted; on the open variant it
/// is present only when the caller sent a valid token.
#[instrument(skip(state, auth))]
pub async fn list_siswa(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Siswa>>, ApiError> {
    if let Some(AuthUser(subject)) = &auth {
        info!(%subject, "listing siswa");
    }
    let all = state.store.find_all().await?;
    Ok(Json(paginate(all, query.window())))
}

#[utoipa::path(
    get,
    path = "/siswa/{id}",
    tag = "Siswa",
    params(("id" = String, Path, description = "Siswa id")),
    responses(
        (status = 200, description = "The siswa", body = Siswa),
        (status = 404, description = "No such siswa", body = ErrorBody),
        (status = 500, description = "Store failure or malformed id", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn get_siswa(Resolved(siswa): Resolved) -> Json<Siswa> {
    Json(siswa)
}

#[utoipa::path(
    patch,
    path = "/siswa/{id}",
    tag = "Siswa",
    params(("id" = String, Path, description = "Siswa id")),
    request_body = UpdateSiswaRequest,
    responses(
        (status = 200, description = "The updated siswa", body = Siswa),
        (status = 400, description = "Malformed field or failed save", body = ErrorBody),
        (status = 404, description = "No such siswa", body = ErrorBody),
        (status = 500, description = "Store failure or malformed id", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn update_siswa(
    State(state): State<AppState>,
    Resolved(mut siswa): Resolved,
    payload: Result<Json<UpdateSiswaRequest>, JsonRejection>,
) -> Result<Json<Siswa>, ApiError> {
    let Json(patch) = payload?;
    patch.apply_to(&mut siswa)?;

    let updated = state.store.save(&siswa).await.map_err(|e| {
        error!(error = ?e, id = %siswa.id, "update siswa failed");
        ApiError::Validation(format!("{e:#}"))
    })?;

    info!(id = %updated.id, "siswa updated");
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/siswa/{id}",
    tag = "Siswa",
    params(("id" = String, Path, description = "Siswa id")),
    responses(
        (status = 200, description = "Deleted; remaining siswa listed", body = DeleteSiswaResponse),
        (status = 404, description = "No such siswa", body = ErrorBody),
        (status = 500, description = "Store failure or malformed id", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn delete_siswa(
    State(state): State<AppState>,
    Resolved(siswa): Resolved,
) -> Result<Json<DeleteSiswaResponse>, ApiError> {
    state.store.delete(siswa.id).await?;
    let users = state.store.find_all().await?;

    info!(id = %siswa.id, remaining = users.len(), "siswa deleted");
    Ok(Json(DeleteSiswaResponse {
        message: "Deleted Siswa".into(),
        users,
    }))
}
