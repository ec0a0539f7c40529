use crate::MetadataStore;
use async_trait::async_trait;
use medley_core::models::MetadataRecord;
use medley_core::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory metadata store for development and tests.
///
/// Records are kept in insertion order so lookups and first-match deletes
/// behave like the Postgres store.
#[derive(Clone, Default)]
pub struct MemoryMetadataStore {
    records: Arc<RwLock<Vec<MetadataRecord>>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn get_all(&self) -> Result<Vec<MetadataRecord>, AppError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_file_name(&self, file_name: &str) -> Result<Option<MetadataRecord>, AppError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.file_name.as_deref() == Some(file_name))
            .cloned())
    }

    async fn find_by_original_name(
        &self,
        original_name: &str,
    ) -> Result<Option<MetadataRecord>, AppError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.original_name.as_deref() == Some(original_name))
            .cloned())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn insert(&self, mut record: MetadataRecord) -> Result<MetadataRecord, AppError> {
        if record.id.is_nil() {
            record.id = Uuid::new_v4();
        }
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn delete_by_file_name(&self, file_name: &str) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if let Some(pos) = records
            .iter()
            .position(|record| record.file_name.as_deref() == Some(file_name))
        {
            records.remove(pos);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file_name: &str, original_name: Option<&str>) -> MetadataRecord {
        MetadataRecord {
            file_name: Some(file_name.to_string()),
            original_name: original_name.map(String::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_finds_by_file_name() {
        let store = MemoryMetadataStore::new();
        let stored = store.insert(record("1716-a.png", None)).await.unwrap();
        assert!(!stored.id.is_nil());

        let found = store.find_by_file_name("1716-a.png").await.unwrap();
        assert_eq!(found.unwrap().id, stored.id);
        assert!(store.find_by_file_name("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_original_name() {
        let store = MemoryMetadataStore::new();
        store
            .insert(record("1716-a_b.png", Some("a b.png")))
            .await
            .unwrap();

        let found = store.find_by_original_name("a b.png").await.unwrap();
        assert_eq!(found.unwrap().file_name.as_deref(), Some("1716-a_b.png"));
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let store = MemoryMetadataStore::new();
        store.insert(record("first", None)).await.unwrap();
        store.insert(record("second", None)).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].file_name.as_deref(), Some("first"));
        assert_eq!(all[1].file_name.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_delete_removes_first_match_only() {
        let store = MemoryMetadataStore::new();
        let first = store.insert(record("dup", None)).await.unwrap();
        let second = store.insert(record("dup", None)).await.unwrap();

        store.delete_by_file_name("dup").await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let remaining = store.find_by_file_name("dup").await.unwrap().unwrap();
        assert_eq!(remaining.id, second.id);
        assert_ne!(remaining.id, first.id);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = MemoryMetadataStore::new();
        assert!(store.delete_by_file_name("nope").await.is_ok());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
