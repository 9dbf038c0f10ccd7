use thiserror::Error;

/// 図書館アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LibraryApplicationError {
    /// 書籍が見つからない
    #[error("Book not found")]
    BookNotFound,

    /// 会員が見つからない
    #[error("Member not found")]
    MemberNotFound,

    /// 貸出記録が見つからない
    #[error("Borrowing record not found")]
    BorrowingRecordNotFound,

    /// 既に返却済み
    #[error("Book has already been returned")]
    AlreadyReturned,

    /// 入力が参照する書籍・会員が存在しない
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// リポジトリのエラー
    #[error("Repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryApplicationError>;
