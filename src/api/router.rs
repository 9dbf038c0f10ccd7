use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, books, borrowing_records, members};

/// Creates the API router with all library endpoints
///
/// Books:
/// - GET/POST /api/books, GET/PUT/DELETE /api/books/:id
/// - GET /api/books/genre?genre=
/// - GET /api/books/author/:author?genre=
/// - GET /api/books/dueondate?dueDate=dd/MM/yyyy
/// - GET /api/bookavailabileDate?bookId=
///
/// Members:
/// - GET/POST /api/members, GET/PUT/DELETE /api/members/:id
///
/// Borrowing records:
/// - GET/POST /api/borrowing-records, GET/PUT/DELETE /api/borrowing-records/:id
/// - POST /api/borrow
/// - PUT /api/return/:recordId
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        // Books
        .route("/books", get(books::list_books).post(books::add_books))
        .route("/books/genre", get(books::books_by_genre))
        .route("/books/dueondate", get(books::books_due_on_date))
        .route("/books/author/:author", get(books::books_by_author))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/bookavailabileDate", get(books::check_availability))
        // Members
        .route(
            "/members",
            get(members::list_members).post(members::add_members),
        )
        .route(
            "/members/:id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        // Borrowing records
        .route(
            "/borrowing-records",
            get(borrowing_records::list_borrowing_records)
                .post(borrowing_records::create_borrowing_record),
        )
        .route(
            "/borrowing-records/:id",
            get(borrowing_records::get_borrowing_record)
                .put(borrowing_records::update_borrowing_record)
                .delete(borrowing_records::delete_borrowing_record),
        )
        .route("/borrow", post(borrowing_records::borrow_book))
        .route("/return/:record_id", put(borrowing_records::return_book));

    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .nest("/api", api)
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
