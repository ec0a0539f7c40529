use crate::MetadataStore;
use async_trait::async_trait;
use medley_core::models::MetadataRecord;
use medley_core::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use std::time::Duration;
use uuid::Uuid;

/// Postgres-backed metadata store.
///
/// Documents are stored as JSONB with the storage file name extracted into an
/// indexed column. The document itself stays authoritative: the row id is the
/// only field the store adds to what the pipeline wrote.
#[derive(Clone)]
pub struct PgMetadataStore {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct MetadataDocumentRow {
    id: Uuid,
    document: serde_json::Value,
}

impl MetadataDocumentRow {
    fn into_record(self) -> Result<MetadataRecord, serde_json::Error> {
        let mut record: MetadataRecord = serde_json::from_value(self.document)?;
        record.id = self.id;
        Ok(record)
    }
}

impl PgMetadataStore {
    pub fn new(pool: PgPool) -> Self {
        PgMetadataStore { pool }
    }

    /// Connect to the database and run pending migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::InternalWithSource {
                message: "Failed to run database migrations".to_string(),
                source: e.into(),
            })?;

        Ok(PgMetadataStore { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for PgMetadataStore {
    #[tracing::instrument(skip(self), fields(db.table = "metadata_documents", db.operation = "select"))]
    async fn get_all(&self) -> Result<Vec<MetadataRecord>, AppError> {
        let rows = sqlx::query_as::<Postgres, MetadataDocumentRow>(
            "SELECT id, document FROM metadata_documents ORDER BY inserted_at",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match row.into_record() {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(
                        document_id = %id,
                        error = %e,
                        "Skipping malformed metadata document"
                    );
                }
            }
        }

        Ok(records)
    }

    #[tracing::instrument(skip(self), fields(db.table = "metadata_documents", db.operation = "select"))]
    async fn find_by_file_name(&self, file_name: &str) -> Result<Option<MetadataRecord>, AppError> {
        let row = sqlx::query_as::<Postgres, MetadataDocumentRow>(
            "SELECT id, document FROM metadata_documents \
             WHERE file_name = $1 ORDER BY inserted_at LIMIT 1",
        )
        .bind(file_name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MetadataDocumentRow::into_record)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Malformed metadata document: {}", e)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "metadata_documents", db.operation = "select"))]
    async fn find_by_original_name(
        &self,
        original_name: &str,
    ) -> Result<Option<MetadataRecord>, AppError> {
        let row = sqlx::query_as::<Postgres, MetadataDocumentRow>(
            "SELECT id, document FROM metadata_documents \
             WHERE document->>'originalName' = $1 ORDER BY inserted_at LIMIT 1",
        )
        .bind(original_name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MetadataDocumentRow::into_record)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Malformed metadata document: {}", e)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "metadata_documents", db.operation = "count"))]
    async fn count(&self) -> Result<u64, AppError> {
        let count = sqlx::query_scalar::<Postgres, i64>("SELECT COUNT(*) FROM metadata_documents")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "metadata_documents", db.operation = "insert"))]
    async fn insert(&self, mut record: MetadataRecord) -> Result<MetadataRecord, AppError> {
        if record.id.is_nil() {
            record.id = Uuid::new_v4();
        }

        let document = serde_json::to_value(&record).map_err(|e| {
            AppError::Internal(format!("Failed to encode metadata document: {}", e))
        })?;

        sqlx::query("INSERT INTO metadata_documents (id, file_name, document) VALUES ($1, $2, $3)")
            .bind(record.id)
            .bind(record.file_name.as_deref())
            .bind(document)
            .execute(&self.pool)
            .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "metadata_documents", db.operation = "delete"))]
    async fn delete_by_file_name(&self, file_name: &str) -> Result<(), AppError> {
        // Matches the oldest document only, like the lookup side.
        sqlx::query(
            "DELETE FROM metadata_documents WHERE id = (\
             SELECT id FROM metadata_documents WHERE file_name = $1 \
             ORDER BY inserted_at LIMIT 1)",
        )
        .bind(file_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
