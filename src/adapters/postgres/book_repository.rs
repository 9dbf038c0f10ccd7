use crate::domain::{Book, BookId, NewBook};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをBookに変換する
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    Ok(Book {
        id: BookId::from_i64(row.try_get("id")?),
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        genre: row.try_get("genre")?,
        due_date: row.try_get("due_date")?,
    })
}

/// BookRepositoryのPostgreSQL実装
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// PostgreSQLコネクションプールから新しいBookRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn find_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, genre, due_date
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_book).collect()
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, genre, due_date
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    /// 1トランザクションで全件を登録する
    ///
    /// 途中で失敗した場合は1件も登録されない。
    async fn insert_many(&self, books: Vec<NewBook>) -> Result<Vec<Book>> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(books.len());

        for book in books {
            let row = sqlx::query(
                r#"
                INSERT INTO books (title, author, genre, due_date)
                VALUES ($1, $2, $3, $4)
                RETURNING id, title, author, genre, due_date
                "#,
            )
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.genre)
            .bind(book.due_date)
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(map_row_to_book(&row)?);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn update(&self, book: Book) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, genre = $4, due_date = $5
            WHERE id = $1
            "#,
        )
        .bind(book.id.value())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.due_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(usize::try_from(count)?)
    }

    /// LOWER(genre)のインデックスを使用する
    async fn find_by_genre(&self, genre: &str) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, genre, due_date
            FROM books
            WHERE LOWER(genre) = LOWER($1)
            ORDER BY id ASC
            "#,
        )
        .bind(genre)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_book).collect()
    }

    async fn find_by_author_and_genre(
        &self,
        author: &str,
        genre: Option<&str>,
    ) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, genre, due_date
            FROM books
            WHERE LOWER(author) = LOWER($1)
              AND ($2::TEXT IS NULL OR LOWER(genre) = LOWER($2))
            ORDER BY id ASC
            "#,
        )
        .bind(author)
        .bind(genre)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_book).collect()
    }

    async fn find_due_on(&self, due_date: NaiveDate) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, genre, due_date
            FROM books
            WHERE due_date = $1
            ORDER BY id ASC
            "#,
        )
        .bind(due_date)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_book).collect()
    }
}
