pub mod book;
pub mod borrowing_record;
pub mod commands;
pub mod errors;
pub mod member;
pub mod value_objects;

pub use book::{Book, NewBook};
pub use borrowing_record::{BorrowingRecord, NewBorrowingRecord};
pub use errors::*;
pub use member::{Member, NewMember};
pub use value_objects::*;
