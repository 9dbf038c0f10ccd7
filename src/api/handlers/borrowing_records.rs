use crate::application::library;
use crate::domain::{
    BookId, BorrowingRecordId, MemberId,
    commands::{BorrowBook, ReturnBook},
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;

use super::{AppState, today};
use crate::api::{
    error::ApiError,
    extract::{JsonBody, PathParam},
    types::{BorrowRequest, BorrowingRecordRequest, BorrowingRecordResponse},
};

// ============================================================================
// CRUD
// ============================================================================

/// GET /borrowing-records - 全貸出記録を取得
pub async fn list_borrowing_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BorrowingRecordResponse>>, ApiError> {
    let records = library::list_borrowing_records(&state.service_deps).await?;
    tracing::info!("Returning {} borrowing records", records.len());

    Ok(Json(
        records
            .into_iter()
            .map(BorrowingRecordResponse::from)
            .collect(),
    ))
}

/// GET /borrowing-records/:id
pub async fn get_borrowing_record(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<BorrowingRecordResponse>, ApiError> {
    let record =
        library::get_borrowing_record(&state.service_deps, BorrowingRecordId::from_i64(id))
            .await?;
    tracing::info!("Returning borrowing record {:?}", record);

    Ok(Json(BorrowingRecordResponse::from(record)))
}

/// POST /borrowing-records - 日付を指定して貸出記録を登録
///
/// 書籍と会員が存在しない場合は422を返す。
pub async fn create_borrowing_record(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<BorrowingRecordRequest>,
) -> Result<(StatusCode, Json<BorrowingRecordResponse>), ApiError> {
    let record = library::create_borrowing_record(&state.service_deps, req.to_new_record()).await?;
    tracing::info!("Borrowing record has been created {:?}", record);

    Ok((StatusCode::CREATED, Json(BorrowingRecordResponse::from(record))))
}

/// PUT /borrowing-records/:id
pub async fn update_borrowing_record(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<BorrowingRecordRequest>,
) -> Result<Json<BorrowingRecordResponse>, ApiError> {
    let record = library::update_borrowing_record(
        &state.service_deps,
        BorrowingRecordId::from_i64(id),
        req.to_new_record(),
    )
    .await?;
    tracing::info!("Borrowing record has been updated {:?}", record);

    Ok(Json(BorrowingRecordResponse::from(record)))
}

/// DELETE /borrowing-records/:id
pub async fn delete_borrowing_record(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    library::delete_borrowing_record(&state.service_deps, BorrowingRecordId::from_i64(id))
        .await?;
    tracing::info!("Borrowing record {} has been deleted", id);

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Command handlers
// ============================================================================

/// POST /borrow - 書籍を貸し出す
///
/// 貸出日は今日、返却期限は14日後。
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<BorrowRequest>,
) -> Result<(StatusCode, Json<BorrowingRecordResponse>), ApiError> {
    let cmd = BorrowBook {
        book_id: BookId::from_i64(req.book_id),
        member_id: MemberId::from_i64(req.member_id),
        borrowed_on: today(),
    };

    let record = library::borrow_book(&state.service_deps, cmd).await?;
    tracing::info!("The book has been borrowed {:?}", record);

    Ok((StatusCode::CREATED, Json(BorrowingRecordResponse::from(record))))
}

/// PUT /return/:recordId - 書籍を返却
///
/// 返却日は今日。成功時はボディなしで200を返す。
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    PathParam(record_id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    let cmd = ReturnBook {
        record_id: BorrowingRecordId::from_i64(record_id),
        returned_on: today(),
    };

    let record = library::return_book(&state.service_deps, cmd).await?;
    tracing::info!("The book has been returned {:?}", record);

    Ok(StatusCode::OK)
}
