pub mod book_repository;
pub mod borrowing_record_repository;
pub mod member_repository;

// パブリックに型を再エクスポート
pub use book_repository::BookRepository as PostgresBookRepository;
pub use borrowing_record_repository::BorrowingRecordRepository as PostgresBorrowingRecordRepository;
pub use member_repository::MemberRepository as PostgresMemberRepository;
