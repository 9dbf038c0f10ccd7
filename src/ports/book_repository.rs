use crate::domain::{Book, BookId, NewBook};
use async_trait::async_trait;
use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍リポジトリポート
///
/// 書籍カタログの永続化を抽象化する。IDの採番と一意性はこのポートの実装が責任を持つ。
/// 一覧系の操作はすべてID昇順で返す。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// すべての書籍を取得する
    async fn find_all(&self) -> Result<Vec<Book>>;

    /// IDで書籍を取得する
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>>;

    /// 複数の書籍をまとめて登録する
    ///
    /// 登録された書籍を入力と同じ順序で返す。
    async fn insert_many(&self, books: Vec<NewBook>) -> Result<Vec<Book>>;

    /// 書籍を置き換える
    ///
    /// 存在確認はアプリケーション層で行う。存在しないIDの場合は何もしない。
    async fn update(&self, book: Book) -> Result<()>;

    /// 書籍を削除する
    async fn delete(&self, id: BookId) -> Result<()>;

    /// 登録済みの書籍数
    async fn count(&self) -> Result<usize>;

    /// ジャンルで検索する（大文字小文字を区別しない）
    async fn find_by_genre(&self, genre: &str) -> Result<Vec<Book>>;

    /// 著者で検索し、ジャンルが指定されていればさらに絞り込む
    async fn find_by_author_and_genre(
        &self,
        author: &str,
        genre: Option<&str>,
    ) -> Result<Vec<Book>>;

    /// 返却期限が指定日の書籍を検索する
    async fn find_due_on(&self, due_date: NaiveDate) -> Result<Vec<Book>>;
}
