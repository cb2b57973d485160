use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::{parse_id, SiswaStore};
use crate::siswa::repo_types::{NewSiswa, Siswa};

#[derive(Clone)]
pub struct PgSiswaStore {
    db: PgPool,
}

impl PgSiswaStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        tracing::info!("connected to database");
        Ok(Self { db })
    }

    pub async fn migrate(&self) {
        if let Err(e) = sqlx::migrate!("./migrations").run(&self.db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }
    }
}

#[async_trait]
impl SiswaStore for PgSiswaStore {
    async fn insert(&self, new: NewSiswa) -> anyhow::Result<Siswa> {
        let siswa = sqlx::query_as::<_, Siswa>(
            r#"
            INSERT INTO siswa (name, email, phone, department, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, department, password_hash
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.phone)
        .bind(&new.department)
        .bind(&new.password_hash)
        .fetch_one(&self.db)
        .await
        .context("insert siswa")?;
        Ok(siswa)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Siswa>> {
        let rows = sqlx::query_as::<_, Siswa>(
            r#"
            SELECT id, name, email, phone, department, password_hash
            FROM siswa
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list siswa")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Siswa>> {
        let id = parse_id(id)?;
        let row = sqlx::query_as::<_, Siswa>(
            r#"
            SELECT id, name, email, phone, department, password_hash
            FROM siswa
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find siswa by id")?;
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Siswa>> {
        let row = sqlx::query_as::<_, Siswa>(
            r#"
            SELECT id, name, email, phone, department, password_hash
            FROM siswa
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find siswa by email")?;
        Ok(row)
    }

    async fn save(&self, siswa: &Siswa) -> anyhow::Result<Siswa> {
        let row = sqlx::query_as::<_, Siswa>(
            r#"
            UPDATE siswa
               SET name = $2, email = $3, phone = $4, department = $5, password_hash = $6
             WHERE id = $1
            RETURNING id, name, email, phone, department, password_hash
            "#,
        )
        .bind(siswa.id)
        .bind(&siswa.name)
        .bind(&siswa.email)
        .bind(siswa.phone)
        .bind(&siswa.department)
        .bind(&siswa.password_hash)
        .fetch_optional(&self.db)
        .await
        .context("update siswa")?;
        row.with_context(|| format!("siswa {} no longer exists", siswa.id))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM siswa WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete siswa")?;
        Ok(())
    }

    async fn close(&self) {
        self.db.close().await;
        tracing::info!("database pool closed");
    }
}
