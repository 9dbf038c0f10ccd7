use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::{Duration, NaiveDate, Utc};
use library_api::api::handlers::AppState;
use library_api::api::router::create_router;
use library_api::api::types::*;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// インメモリのリポジトリでAPIルーターを組み立てる
fn setup_app() -> axum::Router {
    let app_state = Arc::new(AppState {
        service_deps: common::in_memory_deps(),
    });
    create_router(app_state)
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// 不正なボディを送るためのヘルパー
async fn send_raw(app: &axum::Router, method: &str, uri: &str, body: &'static str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// 書籍と会員を登録し、最初の書籍IDと会員IDを返す
async fn seed(app: &axum::Router) -> (i64, i64) {
    let response = send(
        app,
        "POST",
        "/api/books",
        Some(json!([
            {"title": "To Kill a Mockingbird", "author": "Harper Lee", "genre": "Fiction"},
            {"title": "Dune", "author": "Frank Herbert", "genre": "Science Fiction"},
        ])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        app,
        "POST",
        "/api/members",
        Some(json!([{"name": "Alice", "contact": "alice@example.com"}])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    (1, 1)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ============================================================================
// E2Eテスト: 書籍
// ============================================================================

#[tokio::test]
async fn test_e2e_health_check() {
    let app = setup_app();

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_e2e_add_and_list_books() {
    let app = setup_app();

    let response = send(
        &app,
        "POST",
        "/api/books",
        Some(json!([
            {"title": "Emma", "author": "Jane Austen", "genre": "Romance"},
            {"title": "Persuasion", "author": "Jane Austen", "genre": "Romance"},
        ])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let total: usize = read_json(response).await;
    assert_eq!(total, 2);

    let response = send(&app, "GET", "/api/books", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let books: Vec<BookResponse> = read_json(response).await;
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Emma");
    assert_eq!(books[1].title, "Persuasion");
}

#[tokio::test]
async fn test_e2e_get_book_by_id() {
    let app = setup_app();
    let (book_id, _) = seed(&app).await;

    let response = send(&app, "GET", &format!("/api/books/{}", book_id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let book: BookResponse = read_json(response).await;
    assert_eq!(book.id, book_id);
    assert_eq!(book.author, "Harper Lee");

    let response = send(&app, "GET", "/api/books/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn test_e2e_update_book() {
    let app = setup_app();
    let (book_id, _) = seed(&app).await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/books/{}", book_id),
        Some(json!({"id": 500, "title": "Mockingbird", "author": "Harper Lee", "genre": "Classics"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let book: BookResponse = read_json(response).await;
    assert_eq!(book.id, book_id);
    assert_eq!(book.genre, "Classics");

    let response = send(
        &app,
        "PUT",
        "/api/books/999",
        Some(json!({"title": "Nope", "author": "Nobody", "genre": "None"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_delete_book() {
    let app = setup_app();
    let (book_id, _) = seed(&app).await;

    let response = send(&app, "DELETE", &format!("/api/books/{}", book_id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "DELETE", &format!("/api/books/{}", book_id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_books_by_genre() {
    let app = setup_app();
    seed(&app).await;

    let response = send(&app, "GET", "/api/books/genre?genre=Fiction", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let books: Vec<BookResponse> = read_json(response).await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "To Kill a Mockingbird");

    // genreは必須
    let response = send(&app, "GET", "/api/books/genre", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BAD_REQUEST");
    assert!(error.message.contains("genre"));
}

#[tokio::test]
async fn test_e2e_books_by_author_with_optional_genre() {
    let app = setup_app();
    seed(&app).await;

    let response = send(&app, "GET", "/api/books/author/Harper%20Lee", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let books: Vec<BookResponse> = read_json(response).await;
    assert_eq!(books.len(), 1);

    let response = send(
        &app,
        "GET",
        "/api/books/author/Harper%20Lee?genre=Poetry",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let books: Vec<BookResponse> = read_json(response).await;
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_e2e_books_due_on_date() {
    let app = setup_app();
    let (book_id, member_id) = seed(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/borrow",
        Some(json!({"bookId": book_id, "memberId": member_id})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let due = (today() + Duration::days(14)).format("%d/%m/%Y").to_string();
    let response = send(
        &app,
        "GET",
        &format!("/api/books/dueondate?dueDate={}", due),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let books: Vec<BookResponse> = read_json(response).await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, book_id);
}

#[tokio::test]
async fn test_e2e_books_due_on_date_rejects_bad_format() {
    let app = setup_app();

    let response = send(
        &app,
        "GET",
        "/api/books/dueondate?dueDate=2025-03-20",
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert!(error.message.contains("dd/MM/yyyy"));
}

#[tokio::test]
async fn test_e2e_books_due_on_date_requires_due_date() {
    let app = setup_app();

    let response = send(&app, "GET", "/api/books/dueondate", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BAD_REQUEST");
    assert!(error.message.contains("dueDate"));
}

#[tokio::test]
async fn test_e2e_book_availability() {
    let app = setup_app();
    let (book_id, member_id) = seed(&app).await;

    let uri = format!("/api/bookavailabileDate?bookId={}", book_id);

    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let available: NaiveDate = read_json(response).await;
    assert_eq!(available, today());

    send(
        &app,
        "POST",
        "/api/borrow",
        Some(json!({"bookId": book_id, "memberId": member_id})),
    )
    .await;

    let response = send(&app, "GET", &uri, None).await;
    let available: NaiveDate = read_json(response).await;
    assert_eq!(available, today() + Duration::days(14));

    let response = send(&app, "GET", "/api/bookavailabileDate?bookId=999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_book_availability_rejects_bad_book_id() {
    let app = setup_app();

    let response = send(&app, "GET", "/api/bookavailabileDate?bookId=abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BAD_REQUEST");
    assert!(error.message.contains("abc"));

    let response = send(&app, "GET", "/api/bookavailabileDate", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert!(error.message.contains("bookId"));
}

#[tokio::test]
async fn test_e2e_malformed_requests_return_error_body() {
    let app = setup_app();

    // 壊れたJSON
    let response = send_raw(&app, "POST", "/api/books", "[{\"title\": ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "INVALID_BODY");

    // 型の合わないJSON
    let response = send(
        &app,
        "POST",
        "/api/borrow",
        Some(json!({"bookId": "one", "memberId": 1})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "INVALID_BODY");

    // 数値でないID
    let response = send(&app, "GET", "/api/books/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BAD_REQUEST");
}

// ============================================================================
// E2Eテスト: 会員
// ============================================================================

#[tokio::test]
async fn test_e2e_member_crud() {
    let app = setup_app();
    let (_, member_id) = seed(&app).await;

    let response = send(&app, "GET", "/api/members", None).await;
    let members: Vec<MemberResponse> = read_json(response).await;
    assert_eq!(members.len(), 1);

    let response = send(
        &app,
        "PUT",
        &format!("/api/members/{}", member_id),
        Some(json!({"name": "Alice Smith", "contact": "555-0100"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let member: MemberResponse = read_json(response).await;
    assert_eq!(member.id, member_id);
    assert_eq!(member.name, "Alice Smith");

    let response = send(&app, "GET", &format!("/api/members/{}", member_id), None).await;
    let member: MemberResponse = read_json(response).await;
    assert_eq!(member.contact, "555-0100");

    let response = send(&app, "DELETE", &format!("/api/members/{}", member_id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &format!("/api/members/{}", member_id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_update_missing_member() {
    let app = setup_app();

    let response = send(
        &app,
        "PUT",
        "/api/members/12",
        Some(json!({"name": "Ghost", "contact": "none"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// E2Eテスト: 貸出記録
// ============================================================================

#[tokio::test]
async fn test_e2e_full_borrow_flow() {
    let app = setup_app();
    let (book_id, member_id) = seed(&app).await;

    // Step 1: 貸出
    let response = send(
        &app,
        "POST",
        "/api/borrow",
        Some(json!({"bookId": book_id, "memberId": member_id})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record: BorrowingRecordResponse = read_json(response).await;
    assert_eq!(record.book_id, book_id);
    assert_eq!(record.member_id, member_id);
    assert_eq!(record.borrow_date, today());
    assert_eq!(record.due_date, today() + Duration::days(14));
    assert_eq!(record.return_date, None);

    // Step 2: 一覧に表示される
    let response = send(&app, "GET", "/api/borrowing-records", None).await;
    let records: Vec<BorrowingRecordResponse> = read_json(response).await;
    assert_eq!(records, vec![record.clone()]);

    // Step 3: 返却
    let response = send(&app, "PUT", &format!("/api/return/{}", record.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        "GET",
        &format!("/api/borrowing-records/{}", record.id),
        None,
    )
    .await;
    let returned: BorrowingRecordResponse = read_json(response).await;
    assert_eq!(returned.return_date, Some(today()));

    // 返却後は書籍の返却期限がクリアされる
    let response = send(&app, "GET", &format!("/api/books/{}", book_id), None).await;
    let book: BookResponse = read_json(response).await;
    assert_eq!(book.due_date, None);

    // Step 4: 二重返却は422
    let response = send(&app, "PUT", &format!("/api/return/{}", record.id), None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "ALREADY_RETURNED");
}

#[tokio::test]
async fn test_e2e_return_one_of_two_loans_keeps_due_date() {
    let app = setup_app();
    let (book_id, member_id) = seed(&app).await;
    send(
        &app,
        "POST",
        "/api/members",
        Some(json!([{"name": "Bob", "contact": "bob@example.com"}])),
    )
    .await;

    let response = send(
        &app,
        "POST",
        "/api/borrowing-records",
        Some(json!({
            "bookId": book_id,
            "memberId": member_id,
            "borrowDate": "2025-03-01",
            "dueDate": "2025-03-15",
        })),
    )
    .await;
    let older: BorrowingRecordResponse = read_json(response).await;

    let response = send(
        &app,
        "POST",
        "/api/borrowing-records",
        Some(json!({
            "bookId": book_id,
            "memberId": 2,
            "borrowDate": "2025-03-08",
            "dueDate": "2025-03-22",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "PUT", &format!("/api/return/{}", older.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    // もう1件の貸出が残っているので返却期限は残る
    let response = send(&app, "GET", &format!("/api/books/{}", book_id), None).await;
    let book: BookResponse = read_json(response).await;
    assert_eq!(book.due_date, NaiveDate::from_ymd_opt(2025, 3, 22));

    let response = send(&app, "GET", "/api/books/dueondate?dueDate=22/03/2025", None).await;
    let books: Vec<BookResponse> = read_json(response).await;
    assert_eq!(books.len(), 1);
}

#[tokio::test]
async fn test_e2e_delete_open_borrowing_record_clears_due_date() {
    let app = setup_app();
    let (book_id, member_id) = seed(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/borrow",
        Some(json!({"bookId": book_id, "memberId": member_id})),
    )
    .await;
    let record: BorrowingRecordResponse = read_json(response).await;

    let response = send(
        &app,
        "DELETE",
        &format!("/api/borrowing-records/{}", record.id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &format!("/api/books/{}", book_id), None).await;
    let book: BookResponse = read_json(response).await;
    assert_eq!(book.due_date, None);

    let response = send(
        &app,
        "GET",
        &format!("/api/bookavailabileDate?bookId={}", book_id),
        None,
    )
    .await;
    let available: NaiveDate = read_json(response).await;
    assert_eq!(available, today());
}

#[tokio::test]
async fn test_e2e_borrow_unknown_book() {
    let app = setup_app();
    let (_, member_id) = seed(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/borrow",
        Some(json!({"bookId": 999, "memberId": member_id})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "INVALID_REFERENCE");
}

#[tokio::test]
async fn test_e2e_return_unknown_record() {
    let app = setup_app();

    let response = send(&app, "PUT", "/api/return/77", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_borrowing_record_crud() {
    let app = setup_app();
    let (book_id, member_id) = seed(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/borrowing-records",
        Some(json!({
            "bookId": book_id,
            "memberId": member_id,
            "borrowDate": "2025-03-06",
            "dueDate": "2025-03-20",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record: BorrowingRecordResponse = read_json(response).await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/borrowing-records/{}", record.id),
        Some(json!({
            "bookId": book_id,
            "memberId": member_id,
            "borrowDate": "2025-03-06",
            "dueDate": "2025-03-20",
            "returnDate": "2025-03-18",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: BorrowingRecordResponse = read_json(response).await;
    assert_eq!(updated.return_date, NaiveDate::from_ymd_opt(2025, 3, 18));

    let response = send(
        &app,
        "DELETE",
        &format!("/api/borrowing-records/{}", record.id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        "GET",
        &format!("/api/borrowing-records/{}", record.id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
