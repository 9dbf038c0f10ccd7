use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{BookId, BorrowingRecordId, MemberId, ReturnBookError, commands::BorrowBook};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出記録 - 1冊の書籍の1回の貸出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowingRecord {
    pub id: BorrowingRecordId,

    // 他の集約への参照（IDのみ）
    pub book_id: BookId,
    pub member_id: MemberId,

    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl BorrowingRecord {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }
}

/// 採番前の貸出記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBorrowingRecord {
    pub book_id: BookId,
    pub member_id: MemberId,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl NewBorrowingRecord {
    pub fn with_id(self, id: BorrowingRecordId) -> BorrowingRecord {
        BorrowingRecord {
            id,
            book_id: self.book_id,
            member_id: self.member_id,
            borrow_date: self.borrow_date,
            due_date: self.due_date,
            return_date: self.return_date,
        }
    }
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 貸出日はコマンドの日付
/// - 返却期限は貸出日 + 14日
/// - 返却日は未設定
pub fn borrow_book(cmd: &BorrowBook) -> NewBorrowingRecord {
    NewBorrowingRecord {
        book_id: cmd.book_id,
        member_id: cmd.member_id,
        borrow_date: cmd.borrowed_on,
        due_date: cmd.borrowed_on + Duration::days(LOAN_PERIOD_DAYS),
        return_date: None,
    }
}

/// 純粋関数：書籍を返却する
///
/// 延滞していても返却は受け付ける。返却済みの記録は再返却できない。
pub fn return_book(
    record: BorrowingRecord,
    returned_on: NaiveDate,
) -> Result<BorrowingRecord, ReturnBookError> {
    if record.is_returned() {
        return Err(ReturnBookError::AlreadyReturned);
    }

    Ok(BorrowingRecord {
        return_date: Some(returned_on),
        ..record
    })
}

/// 純粋関数：未返却の貸出記録から書籍の返却期限を求める
///
/// 未返却の記録のうち最も遅い返却期限。未返却の記録がなければ`None`。
pub fn open_due_date<'a>(
    records: impl IntoIterator<Item = &'a BorrowingRecord>,
) -> Option<NaiveDate> {
    records
        .into_iter()
        .filter(|record| !record.is_returned())
        .map(|record| record.due_date)
        .max()
}
