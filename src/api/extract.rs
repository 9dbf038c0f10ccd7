use axum::{
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use super::error::RequestRejection;

/// JSONボディの抽出器
///
/// `axum::Json`と同じだが、失敗時は`ErrorResponse`形式の本文を返す。
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RequestRejection))]
pub struct JsonBody<T>(pub T);

/// パスパラメータの抽出器
///
/// `axum::extract::Path`と同じだが、失敗時は`ErrorResponse`形式の本文を返す。
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(RequestRejection))]
pub struct PathParam<T>(pub T);

impl From<JsonRejection> for RequestRejection {
    fn from(rejection: JsonRejection) -> Self {
        RequestRejection {
            status: rejection.status(),
            error: "INVALID_BODY",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for RequestRejection {
    fn from(rejection: PathRejection) -> Self {
        // 数値でないIDなどはすべて400として扱う
        let status = match rejection.status() {
            StatusCode::INTERNAL_SERVER_ERROR => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        RequestRejection {
            status,
            error: "BAD_REQUEST",
            message: rejection.body_text(),
        }
    }
}
