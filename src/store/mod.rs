use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::siswa::repo_types::{NewSiswa, Siswa};

#[cfg(test)]
pub mod failing;
mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgSiswaStore;

/// Persistence seam for student records.
///
/// Identifiers arrive as opaque strings; a backend that cannot interpret one
/// returns an error rather than `Ok(None)`.
#[async_trait]
pub trait SiswaStore: Send + Sync {
    async fn insert(&self, new: NewSiswa) -> anyhow::Result<Siswa>;
    /// Every record, in whatever order the backend yields them.
    async fn find_all(&self) -> anyhow::Result<Vec<Siswa>>;
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Siswa>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Siswa>>;
    /// Overwrite the stored document with `siswa`, returning what was written.
    async fn save(&self, siswa: &Siswa) -> anyhow::Result<Siswa>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<()>;
    async fn close(&self);
}

/// Open the backend named by `DATABASE_URL`.
pub async fn connect(config: &AppConfig) -> anyhow::Result<Arc<dyn SiswaStore>> {
    let url = config.database_url.as_str();
    if url.starts_with("memory:") {
        tracing::warn!("using in-memory store; records are lost on restart");
        return Ok(Arc::new(MemoryStore::default()));
    }
    if url.starts_with("postgres:") || url.starts_with("postgresql:") {
        let store = PgSiswaStore::connect(url, config.db_max_connections).await?;
        store.migrate().await;
        return Ok(Arc::new(store));
    }
    anyhow::bail!("unsupported DATABASE_URL scheme")
}

pub(crate) fn parse_id(id: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(id).with_context(|| format!("malformed siswa id {id:?}"))
}
