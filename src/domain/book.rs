use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BookId;

/// 書籍
///
/// `due_date` は貸出中の場合のみ設定される返却期限。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub due_date: Option<NaiveDate>,
}

/// 採番前の書籍（登録・更新の入力）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub due_date: Option<NaiveDate>,
}

impl NewBook {
    /// IDを割り当てて書籍にする
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            due_date: self.due_date,
        }
    }
}

/// 大文字小文字を区別せずにジャンルを比較する
pub fn matches_genre(book: &Book, genre: &str) -> bool {
    book.genre.to_lowercase() == genre.to_lowercase()
}

/// 著者で絞り込み、ジャンルが指定されていればさらに絞り込む
pub fn matches_author_and_genre(book: &Book, author: &str, genre: Option<&str>) -> bool {
    book.author.to_lowercase() == author.to_lowercase()
        && genre.is_none_or(|genre| matches_genre(book, genre))
}

/// 純粋関数：書籍が貸出可能になる日
///
/// 貸出中であれば返却期限、そうでなければ `today`。
pub fn available_from(book: &Book, today: NaiveDate) -> NaiveDate {
    book.due_date.unwrap_or(today)
}
