use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

use super::repo_types::Siswa;
use crate::{error::ApiError, state::AppState, store::SiswaStore};

/// Load exactly one record. A miss is `NotFound`; an unreachable store or an
/// id the store cannot interpret is `Internal`.
pub async fn resolve(store: &dyn SiswaStore, id: &str) -> Result<Siswa, ApiError> {
    match store.find_by_id(id).await {
        Ok(Some(siswa)) => Ok(siswa),
        Ok(None) => {
            debug!(%id, "siswa not found");
            Err(ApiError::NotFound("can't find data".into()))
        }
        Err(e) => Err(ApiError::Internal(e)),
    }
}

/// The record named by the `:id` path segment, resolved before the handler
/// runs.
pub struct Resolved(pub Siswa);

#[async_trait]
impl FromRequestParts<AppState> for Resolved {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        resolve(state.store.as_ref(), &id).await.map(Resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::siswa::repo_types::NewSiswa;
    use crate::store::MemoryStore;
    use uuid::Uuid;

    #[tokio::test]
    async fn resolves_existing_record() {
        let store = MemoryStore::default();
        let created = store
            .insert(NewSiswa {
                name: "A".into(),
                email: "a@x.com".into(),
                phone: 1,
                department: "IPA".into(),
                password_hash: None,
            })
            .await
            .unwrap();
        let found = resolve(&store, &created.id.to_string()).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryStore::default();
        let err = resolve(&store, &Uuid::new_v4().to_string()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "can't find data");
    }

    #[tokio::test]
    async fn malformed_id_is_internal() {
        let store = MemoryStore::default();
        let err = resolve(&store, "604c8dce155fec06c43c4a44").await.unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
