use crate::domain::{BookId, BorrowingRecord, BorrowingRecordId, MemberId, NewBorrowingRecord};
use crate::ports::borrowing_record_repository::{
    BorrowingRecordRepository as BorrowingRecordRepositoryTrait, Result,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_borrowing_record(row: &PgRow) -> Result<BorrowingRecord> {
    Ok(BorrowingRecord {
        id: BorrowingRecordId::from_i64(row.try_get("id")?),
        book_id: BookId::from_i64(row.try_get("book_id")?),
        member_id: MemberId::from_i64(row.try_get("member_id")?),
        borrow_date: row.try_get("borrow_date")?,
        due_date: row.try_get("due_date")?,
        return_date: row.try_get("return_date")?,
    })
}

/// BorrowingRecordRepositoryのPostgreSQL実装
pub struct BorrowingRecordRepository {
    pool: PgPool,
}

impl BorrowingRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowingRecordRepositoryTrait for BorrowingRecordRepository {
    async fn find_all(&self) -> Result<Vec<BorrowingRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, book_id, member_id, borrow_date, due_date, return_date
            FROM borrowing_records
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_borrowing_record).collect()
    }

    async fn find_by_id(&self, id: BorrowingRecordId) -> Result<Option<BorrowingRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, book_id, member_id, borrow_date, due_date, return_date
            FROM borrowing_records
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_borrowing_record).transpose()
    }

    async fn find_open_by_book(&self, book_id: BookId) -> Result<Vec<BorrowingRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, book_id, member_id, borrow_date, due_date, return_date
            FROM borrowing_records
            WHERE book_id = $1 AND return_date IS NULL
            ORDER BY id ASC
            "#,
        )
        .bind(book_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_borrowing_record).collect()
    }

    async fn insert(&self, record: NewBorrowingRecord) -> Result<BorrowingRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO borrowing_records (book_id, member_id, borrow_date, due_date, return_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, member_id, borrow_date, due_date, return_date
            "#,
        )
        .bind(record.book_id.value())
        .bind(record.member_id.value())
        .bind(record.borrow_date)
        .bind(record.due_date)
        .bind(record.return_date)
        .fetch_one(&self.pool)
        .await?;

        map_row_to_borrowing_record(&row)
    }

    async fn update(&self, record: BorrowingRecord) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE borrowing_records
            SET book_id = $2,
                member_id = $3,
                borrow_date = $4,
                due_date = $5,
                return_date = $6
            WHERE id = $1
            "#,
        )
        .bind(record.id.value())
        .bind(record.book_id.value())
        .bind(record.member_id.value())
        .bind(record.borrow_date)
        .bind(record.due_date)
        .bind(record.return_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: BorrowingRecordId) -> Result<()> {
        sqlx::query("DELETE FROM borrowing_records WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
