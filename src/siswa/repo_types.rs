use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Student record as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Siswa {
    pub id: Uuid,           // assigned by the store
    pub name: String,
    pub email: String,
    pub phone: i64,
    pub department: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>, // Argon2 hash, not exposed in JSON
}

/// Fields of a record that does not exist yet; the store assigns `id`.
#[derive(Debug, Clone)]
pub struct NewSiswa {
    pub name: String,
    pub email: String,
    pub phone: i64,
    pub department: String,
    pub password_hash: Option<String>,
}

impl NewSiswa {
    pub(crate) fn into_siswa(self, id: Uuid) -> Siswa {
        Siswa {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            department: self.department,
            password_hash: self.password_hash,
        }
    }
}
