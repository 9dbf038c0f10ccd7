use crate::domain::book::{matches_author_and_genre, matches_genre};
use crate::domain::{Book, BookId, NewBook};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::Table;

/// In-memory implementation of BookRepository
///
/// Used when no database is configured, and by the tests.
pub struct BookRepository {
    books: RwLock<Table<Book>>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(Table::new()),
        }
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.books.read().await.select(|_| true))
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        Ok(self.books.read().await.get(id.value()))
    }

    async fn insert_many(&self, books: Vec<NewBook>) -> Result<Vec<Book>> {
        let mut table = self.books.write().await;
        let inserted: Vec<Book> = books
            .into_iter()
            .map(|new_book| {
                let book = new_book.with_id(BookId::from_i64(table.allocate_id()));
                table.insert(book.id.value(), book.clone());
                book
            })
            .collect();
        Ok(inserted)
    }

    async fn update(&self, book: Book) -> Result<()> {
        self.books.write().await.replace(book.id.value(), book);
        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<()> {
        self.books.write().await.remove(id.value());
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.books.read().await.len())
    }

    async fn find_by_genre(&self, genre: &str) -> Result<Vec<Book>> {
        Ok(self.books.read().await.select(|b| matches_genre(b, genre)))
    }

    async fn find_by_author_and_genre(
        &self,
        author: &str,
        genre: Option<&str>,
    ) -> Result<Vec<Book>> {
        Ok(self
            .books
            .read()
            .await
            .select(|b| matches_author_and_genre(b, author, genre)))
    }

    async fn find_due_on(&self, due_date: NaiveDate) -> Result<Vec<Book>> {
        Ok(self
            .books
            .read()
            .await
            .select(|b| b.due_date == Some(due_date)))
    }
}
