use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{parse_id, SiswaStore};
use crate::siswa::repo_types::{NewSiswa, Siswa};

/// Process-local store, kept in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Siswa>>,
}

#[async_trait]
impl SiswaStore for MemoryStore {
    async fn insert(&self, new: NewSiswa) -> anyhow::Result<Siswa> {
        let siswa = new.into_siswa(Uuid::new_v4());
        self.rows.write().await.push(siswa.clone());
        Ok(siswa)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Siswa>> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Siswa>> {
        let id = parse_id(id)?;
        Ok(self.rows.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Siswa>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn save(&self, siswa: &Siswa) -> anyhow::Result<Siswa> {
        let mut rows = self.rows.write().await;
        let Some(slot) = rows.iter_mut().find(|s| s.id == siswa.id) else {
            anyhow::bail!("siswa {} no longer exists", siswa.id);
        };
        *slot = siswa.clone();
        Ok(siswa.clone())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.rows.write().await.retain(|s| s.id != id);
        Ok(())
    }

    async fn close(&self) {}
}
