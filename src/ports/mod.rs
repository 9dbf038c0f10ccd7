pub mod book_repository;
pub mod borrowing_record_repository;
pub mod member_repository;

pub use book_repository::BookRepository;
pub use borrowing_record_repository::BorrowingRecordRepository;
pub use member_repository::MemberRepository;
