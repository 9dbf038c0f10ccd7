use crate::domain::{Member, MemberId, NewMember};
use crate::ports::member_repository::{MemberRepository as MemberRepositoryTrait, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Table;

/// In-memory implementation of MemberRepository
pub struct MemberRepository {
    members: RwLock<Table<Member>>,
}

impl MemberRepository {
    pub fn new() -> Self {
        Self {
            members: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemberRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberRepositoryTrait for MemberRepository {
    async fn find_all(&self) -> Result<Vec<Member>> {
        Ok(self.members.read().await.select(|_| true))
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>> {
        Ok(self.members.read().await.get(id.value()))
    }

    async fn insert_many(&self, members: Vec<NewMember>) -> Result<Vec<Member>> {
        let mut table = self.members.write().await;
        let inserted: Vec<Member> = members
            .into_iter()
            .map(|new_member| {
                let member = new_member.with_id(MemberId::from_i64(table.allocate_id()));
                table.insert(member.id.value(), member.clone());
                member
            })
            .collect();
        Ok(inserted)
    }

    async fn update(&self, member: Member) -> Result<()> {
        self.members.write().await.replace(member.id.value(), member);
        Ok(())
    }

    async fn delete(&self, id: MemberId) -> Result<()> {
        self.members.write().await.remove(id.value());
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.members.read().await.len())
    }
}
