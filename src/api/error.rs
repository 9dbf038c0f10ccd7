use crate::application::library::LibraryApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LibraryApplicationError);

impl From<LibraryApplicationError> for ApiError {
    fn from(err: LibraryApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 404 Not Found - リクエストされたリソースが存在しない
            LibraryApplicationError::BookNotFound => {
                (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", "Book not found")
            }
            LibraryApplicationError::MemberNotFound => {
                (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND", "Member not found")
            }
            LibraryApplicationError::BorrowingRecordNotFound => (
                StatusCode::NOT_FOUND,
                "BORROWING_RECORD_NOT_FOUND",
                "Borrowing record not found",
            ),

            // 422 Unprocessable Entity - ビジネスルール違反
            LibraryApplicationError::AlreadyReturned => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ALREADY_RETURNED",
                "Book has already been returned",
            ),
            LibraryApplicationError::InvalidReference(ref msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_REFERENCE",
                msg.as_str(),
            ),

            // 500 Internal Server Error - 内部エラーの詳細はログのみ
            LibraryApplicationError::RepositoryError(ref e) => {
                tracing::error!("Repository error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REPOSITORY_ERROR",
                    "Failed to access the library store",
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

/// クエリ（検索）ハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    NotFound(String),
    BadRequest(String),
    InternalError(String),
}

impl From<LibraryApplicationError> for QueryError {
    fn from(err: LibraryApplicationError) -> Self {
        match err {
            LibraryApplicationError::RepositoryError(e) => QueryError::InternalError(e.to_string()),
            LibraryApplicationError::BookNotFound
            | LibraryApplicationError::MemberNotFound
            | LibraryApplicationError::BorrowingRecordNotFound => {
                QueryError::NotFound(err.to_string())
            }
            other => QueryError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            QueryError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            QueryError::InternalError(msg) => {
                tracing::error!("Internal error in query handler: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

/// リクエストの抽出に失敗したときのエラー
///
/// 不正なJSONボディや数値でないパスパラメータを`ErrorResponse`形式で返す。
#[derive(Debug)]
pub struct RequestRejection {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected request: {}", self.message);

        let body = Json(ErrorResponse::new(self.error, self.message));
        (self.status, body).into_response()
    }
}
