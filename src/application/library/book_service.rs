use crate::domain::{self, Book, BookId, NewBook};
use chrono::NaiveDate;

use super::ServiceDependencies;
use super::errors::{LibraryApplicationError, Result};

/// すべての書籍を取得する
pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.book_repository
        .find_all()
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

/// IDで書籍を取得する
///
/// # エラー
/// - BookNotFound: 書籍が存在しない
pub async fn get_book(deps: &ServiceDependencies, id: BookId) -> Result<Book> {
    deps.book_repository
        .find_by_id(id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?
        .ok_or(LibraryApplicationError::BookNotFound)
}

/// 書籍をまとめて登録する
///
/// # 戻り値
/// 登録後の書籍の総数
pub async fn add_books(deps: &ServiceDependencies, books: Vec<NewBook>) -> Result<usize> {
    deps.book_repository
        .insert_many(books)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    deps.book_repository
        .count()
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

/// 書籍を更新する
///
/// パスのIDが優先され、更新後の書籍を返す。
pub async fn update_book(deps: &ServiceDependencies, id: BookId, book: NewBook) -> Result<Book> {
    // 1. 存在確認
    get_book(deps, id).await?;

    // 2. 置き換え
    let updated = book.with_id(id);
    deps.book_repository
        .update(updated.clone())
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    Ok(updated)
}

/// 書籍を削除する
pub async fn delete_book(deps: &ServiceDependencies, id: BookId) -> Result<()> {
    get_book(deps, id).await?;

    deps.book_repository
        .delete(id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

/// ジャンルで書籍を検索する
pub async fn books_by_genre(deps: &ServiceDependencies, genre: &str) -> Result<Vec<Book>> {
    deps.book_repository
        .find_by_genre(genre)
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

/// 著者（とオプションのジャンル）で書籍を検索する
pub async fn books_by_author_and_genre(
    deps: &ServiceDependencies,
    author: &str,
    genre: Option<&str>,
) -> Result<Vec<Book>> {
    deps.book_repository
        .find_by_author_and_genre(author, genre)
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

/// 返却期限が指定日の書籍を検索する
pub async fn books_due_on(deps: &ServiceDependencies, due_date: NaiveDate) -> Result<Vec<Book>> {
    deps.book_repository
        .find_due_on(due_date)
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

/// 書籍が貸出可能になる日を確認する
///
/// # 戻り値
/// 書籍が存在しない場合は`None`
pub async fn check_availability(
    deps: &ServiceDependencies,
    id: BookId,
    today: NaiveDate,
) -> Result<Option<NaiveDate>> {
    let book = deps
        .book_repository
        .find_by_id(id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    Ok(book.map(|book| domain::book::available_from(&book, today)))
}
