use crate::domain::{BookId, BorrowingRecord, BorrowingRecordId, NewBorrowingRecord};
use crate::ports::borrowing_record_repository::{
    BorrowingRecordRepository as BorrowingRecordRepositoryTrait, Result,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Table;

/// In-memory implementation of BorrowingRecordRepository
pub struct BorrowingRecordRepository {
    records: RwLock<Table<BorrowingRecord>>,
}

impl BorrowingRecordRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Table::new()),
        }
    }
}

impl Default for BorrowingRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BorrowingRecordRepositoryTrait for BorrowingRecordRepository {
    async fn find_all(&self) -> Result<Vec<BorrowingRecord>> {
        Ok(self.records.read().await.select(|_| true))
    }

    async fn find_by_id(&self, id: BorrowingRecordId) -> Result<Option<BorrowingRecord>> {
        Ok(self.records.read().await.get(id.value()))
    }

    async fn find_open_by_book(&self, book_id: BookId) -> Result<Vec<BorrowingRecord>> {
        Ok(self
            .records
            .read()
            .await
            .select(|record| record.book_id == book_id && !record.is_returned()))
    }

    async fn insert(&self, record: NewBorrowingRecord) -> Result<BorrowingRecord> {
        let mut table = self.records.write().await;
        let record = record.with_id(BorrowingRecordId::from_i64(table.allocate_id()));
        table.insert(record.id.value(), record.clone());
        Ok(record)
    }

    async fn update(&self, record: BorrowingRecord) -> Result<()> {
        self.records.write().await.replace(record.id.value(), record);
        Ok(())
    }

    async fn delete(&self, id: BorrowingRecordId) -> Result<()> {
        self.records.write().await.remove(id.value());
        Ok(())
    }
}
