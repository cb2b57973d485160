use async_trait::async_trait;
use uuid::Uuid;

use super::{MemoryStore, SiswaStore};
use crate::siswa::repo_types::{NewSiswa, Siswa};

/// Store operations that [`FailingStore`] can be told to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert,
    FindAll,
    FindById,
    FindByEmail,
    Save,
    Delete,
}

/// Memory store whose selected operations fail as an unreachable database
/// would.
pub struct FailingStore {
    inner: MemoryStore,
    broken: Vec<Op>,
}

impl FailingStore {
    pub fn breaking(broken: &[Op]) -> Self {
        Self {
            inner: MemoryStore::default(),
            broken: broken.to_vec(),
        }
    }

    fn check(&self, op: Op) -> anyhow::Result<()> {
        if self.broken.contains(&op) {
            anyhow::bail!("store unavailable during {op:?}");
        }
        Ok(())
    }
}

#[async_trait]
impl SiswaStore for FailingStore {
    async fn insert(&self, new: NewSiswa) -> anyhow::Result<Siswa> {
        self.check(Op::Insert)?;
        self.inner.insert(new).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Siswa>> {
        self.check(Op::FindAll)?;
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Siswa>> {
        self.check(Op::FindById)?;
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Siswa>> {
        self.check(Op::FindByEmail)?;
        self.inner.find_by_email(email).await
    }

    async fn save(&self, siswa: &Siswa) -> anyhow::Result<Siswa> {
        self.check(Op::Save)?;
        self.inner.save(siswa).await
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.check(Op::Delete)?;
        self.inner.delete(id).await
    }

    async fn close(&self) {}
}
