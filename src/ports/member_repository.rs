use crate::domain::{Member, MemberId, NewMember};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 会員リポジトリポート
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Member>>;

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>>;

    /// 複数の会員をまとめて登録する
    async fn insert_many(&self, members: Vec<NewMember>) -> Result<Vec<Member>>;

    async fn update(&self, member: Member) -> Result<()>;

    async fn delete(&self, id: MemberId) -> Result<()>;

    async fn count(&self) -> Result<usize>;
}
