use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    BookId, BorrowingRecord, MemberId, NewBook, NewBorrowingRecord, NewMember, book::Book,
    member::Member,
};

/// `dueDate`クエリパラメータの日付形式（例: 20/03/2025）
pub const DUE_DATE_QUERY_FORMAT: &str = "%d/%m/%Y";

// ============================================================================
// Books
// ============================================================================

/// 書籍の登録・更新リクエスト
///
/// ボディに`id`が含まれていても無視する（パスのIDが優先）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl BookRequest {
    pub fn to_new_book(self) -> NewBook {
        NewBook {
            title: self.title,
            author: self.author,
            genre: self.genre,
            due_date: self.due_date,
        }
    }
}

/// 書籍レスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub due_date: Option<NaiveDate>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.value(),
            title: book.title,
            author: book.author,
            genre: book.genre,
            due_date: book.due_date,
        }
    }
}

/// GET /books/genre のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    /// 必須。欠けている場合はハンドラーで400を返す
    pub genre: Option<String>,
}

/// GET /books/author/:author のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct AuthorGenreQuery {
    pub genre: Option<String>,
}

/// GET /books/dueondate のクエリパラメータ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateQuery {
    /// dd/MM/yyyy 形式（必須）
    pub due_date: Option<String>,
}

/// GET /bookavailabileDate のクエリパラメータ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub book_id: Option<String>,
}

/// 必須のクエリパラメータを取り出す
pub fn require_param<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("Query parameter '{}' is required", name))
}

/// bookIdクエリパラメータのパースとバリデーション
pub fn parse_book_id(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("Invalid bookId '{}', expected an integer", value))
}

/// dueDateクエリパラメータのパースとバリデーション
pub fn parse_due_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DUE_DATE_QUERY_FORMAT)
        .map_err(|_| format!("Invalid dueDate '{}', expected dd/MM/yyyy", value))
}

// ============================================================================
// Members
// ============================================================================

/// 会員の登録・更新リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRequest {
    pub name: String,
    pub contact: String,
}

impl MemberRequest {
    pub fn to_new_member(self) -> NewMember {
        NewMember {
            name: self.name,
            contact: self.contact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub contact: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.value(),
            name: member.name,
            contact: member.contact,
        }
    }
}

// ============================================================================
// Borrowing records
// ============================================================================

/// 貸出記録の登録・更新リクエスト（日付をすべて指定する）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingRecordRequest {
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

impl BorrowingRecordRequest {
    pub fn to_new_record(self) -> NewBorrowingRecord {
        NewBorrowingRecord {
            book_id: BookId::from_i64(self.book_id),
            member_id: MemberId::from_i64(self.member_id),
            borrow_date: self.borrow_date,
            due_date: self.due_date,
            return_date: self.return_date,
        }
    }
}

/// POST /borrow のリクエスト
///
/// 日付はサーバー側で決定するため、ボディの日付は無視する。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub book_id: i64,
    pub member_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingRecordResponse {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl From<BorrowingRecord> for BorrowingRecordResponse {
    fn from(record: BorrowingRecord) -> Self {
        Self {
            id: record.id.value(),
            book_id: record.book_id.value(),
            member_id: record.member_id.value(),
            borrow_date: record.borrow_date,
            due_date: record.due_date,
            return_date: record.return_date,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
