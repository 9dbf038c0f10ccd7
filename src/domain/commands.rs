use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookId, BorrowingRecordId, MemberId};

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowBook {
    pub book_id: BookId,
    pub member_id: MemberId,
    pub borrowed_on: NaiveDate,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub record_id: BorrowingRecordId,
    pub returned_on: NaiveDate,
}
