use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{
    GenerationRecordRepositoryPort, RepositoryError, WaitlistRepositoryPort,
};
use crate::domain::entities::{GenerationRecord, WaitlistEntry};

/// Local store for signups and generation records
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create tables if not exists
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS waitlist (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                role TEXT NOT NULL,
                message TEXT,
                created_at TEXT NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS mentor_generations (
                id TEXT PRIMARY KEY,
                child_name TEXT,
                email TEXT,
                original_drawing TEXT NOT NULL,
                drawing_description TEXT,
                character_image_url TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePool::connect(database_url).await?;
        Self::new(pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl WaitlistRepositoryPort for SqliteRepository {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO waitlist (id, name, email, role, message, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(&entry.name)
        .bind(&entry.email)
        .bind(entry.role.as_str())
        .bind(entry.message.as_deref())
        .bind(entry.submitted_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl GenerationRecordRepositoryPort for SqliteRepository {
    async fn insert(&self, record: &GenerationRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO mentor_generations
                (id, child_name, email, original_drawing, drawing_description, character_image_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
        )
        .bind(record.id.to_string())
        .bind(record.child_name.as_deref())
        .bind(record.email.as_deref())
        .bind(&record.original_drawing)
        .bind(record.drawing_description.as_deref())
        .bind(&record.character_image_url)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }
}
