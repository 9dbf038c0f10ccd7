use thiserror::Error;

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnBookError {
    /// 既に返却済み
    #[error("Book has already been returned")]
    AlreadyReturned,
}
