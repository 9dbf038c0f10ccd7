mod book_service;
mod borrowing_service;
mod errors;
mod member_service;

pub use book_service::{
    add_books, books_by_author_and_genre, books_by_genre, books_due_on, check_availability,
    delete_book, get_book, list_books, update_book,
};
pub use borrowing_service::{
    borrow_book, create_borrowing_record, delete_borrowing_record, get_borrowing_record,
    list_borrowing_records, return_book, update_borrowing_record,
};
pub use errors::{LibraryApplicationError, Result};
pub use member_service::{add_members, delete_member, get_member, list_members, update_member};

use crate::ports::*;
use std::sync::Arc;

/// サービスの依存関係
///
/// 振る舞い（メソッド）は持たず、アプリケーション層の関数に引数として渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_repository: Arc<dyn BookRepository>,
    pub member_repository: Arc<dyn MemberRepository>,
    pub borrowing_record_repository: Arc<dyn BorrowingRecordRepository>,
}
