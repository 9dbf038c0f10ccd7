use crate::domain::{BookId, BorrowingRecord, BorrowingRecordId, NewBorrowingRecord};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出記録リポジトリポート
#[async_trait]
pub trait BorrowingRecordRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<BorrowingRecord>>;

    async fn find_by_id(&self, id: BorrowingRecordId) -> Result<Option<BorrowingRecord>>;

    /// 指定した書籍の未返却の貸出記録（ID昇順）
    async fn find_open_by_book(&self, book_id: BookId) -> Result<Vec<BorrowingRecord>>;

    /// 貸出記録を登録し、採番済みの記録を返す
    async fn insert(&self, record: NewBorrowingRecord) -> Result<BorrowingRecord>;

    async fn update(&self, record: BorrowingRecord) -> Result<()>;

    async fn delete(&self, id: BorrowingRecordId) -> Result<()>;
}
