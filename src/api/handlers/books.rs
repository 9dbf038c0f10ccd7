use crate::application::library;
use crate::domain::BookId;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use std::sync::Arc;

use super::{AppState, today};
use crate::api::{
    error::{ApiError, QueryError},
    extract::{JsonBody, PathParam},
    types::{
        AuthorGenreQuery, AvailabilityQuery, BookRequest, BookResponse, DueDateQuery, GenreQuery,
        parse_book_id, parse_due_date, require_param,
    },
};

// ============================================================================
// CRUD
// ============================================================================

/// GET /books - 全書籍を取得
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = library::list_books(&state.service_deps).await?;
    tracing::info!("Returning {} books", books.len());

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /books/:id - 書籍をIDで取得
///
/// 見つからない場合は404を返す。
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = library::get_book(&state.service_deps, BookId::from_i64(id)).await?;
    tracing::info!("Returning book {:?}", book);

    Ok(Json(BookResponse::from(book)))
}

/// POST /books - 書籍をまとめて登録
///
/// 登録後の書籍の総数を返す。
pub async fn add_books(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<Vec<BookRequest>>,
) -> Result<(StatusCode, Json<usize>), ApiError> {
    let added = req.len();
    let books = req.into_iter().map(BookRequest::to_new_book).collect();

    let total = library::add_books(&state.service_deps, books).await?;
    tracing::info!("Added {} books, {} in catalog", added, total);

    Ok((StatusCode::CREATED, Json(total)))
}

/// PUT /books/:id - 書籍を更新
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<BookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let book =
        library::update_book(&state.service_deps, BookId::from_i64(id), req.to_new_book()).await?;
    tracing::info!("Book has been updated {:?}", book);

    Ok(Json(BookResponse::from(book)))
}

/// DELETE /books/:id - 書籍を削除
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    library::delete_book(&state.service_deps, BookId::from_i64(id)).await?;
    tracing::info!("Book {} has been deleted", id);

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Query handlers
// ============================================================================

/// GET /books/genre?genre=Fiction - ジャンルで検索
pub async fn books_by_genre(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GenreQuery>,
) -> Result<Json<Vec<BookResponse>>, QueryError> {
    let genre = require_param(query.genre.as_deref(), "genre").map_err(QueryError::BadRequest)?;

    let books = library::books_by_genre(&state.service_deps, genre).await?;
    tracing::debug!("Found {} books for genre {}", books.len(), genre);

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /books/author/:author?genre=Fiction - 著者で検索
///
/// クエリパラメータ:
/// - genre: ジャンルでさらに絞り込む（オプション）
pub async fn books_by_author(
    State(state): State<Arc<AppState>>,
    PathParam(author): PathParam<String>,
    Query(query): Query<AuthorGenreQuery>,
) -> Result<Json<Vec<BookResponse>>, QueryError> {
    let books =
        library::books_by_author_and_genre(&state.service_deps, &author, query.genre.as_deref())
            .await?;
    tracing::info!(
        "The books retrieved for the author and genre {} - {:?}",
        author,
        query.genre
    );

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /books/dueondate?dueDate=20/03/2025 - 返却期限で検索
pub async fn books_due_on_date(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DueDateQuery>,
) -> Result<Json<Vec<BookResponse>>, QueryError> {
    let due_date = require_param(query.due_date.as_deref(), "dueDate")
        .and_then(parse_due_date)
        .map_err(QueryError::BadRequest)?;

    let books = library::books_due_on(&state.service_deps, due_date).await?;
    tracing::info!("The books retrieved by due date {}", due_date);

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /bookavailabileDate?bookId=1 - 書籍が貸出可能になる日
///
/// 書籍が存在しない場合は404を返す。
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<NaiveDate>, QueryError> {
    let book_id = require_param(query.book_id.as_deref(), "bookId")
        .and_then(parse_book_id)
        .map(BookId::from_i64)
        .map_err(QueryError::BadRequest)?;

    let available_on = library::check_availability(&state.service_deps, book_id, today())
        .await?
        .ok_or_else(|| QueryError::NotFound(format!("Book {} not found", book_id)))?;
    tracing::info!("Book {} is available from {}", book_id, available_on);

    Ok(Json(available_on))
}
