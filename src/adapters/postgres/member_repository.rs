use crate::domain::{Member, MemberId, NewMember};
use crate::ports::member_repository::{MemberRepository as MemberRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_member(row: &PgRow) -> Result<Member> {
    Ok(Member {
        id: MemberId::from_i64(row.try_get("id")?),
        name: row.try_get("name")?,
        contact: row.try_get("contact")?,
    })
}

/// MemberRepositoryのPostgreSQL実装
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepositoryTrait for MemberRepository {
    async fn find_all(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query("SELECT id, name, contact FROM members ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_member).collect()
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>> {
        let row = sqlx::query("SELECT id, name, contact FROM members WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_member).transpose()
    }

    async fn insert_many(&self, members: Vec<NewMember>) -> Result<Vec<Member>> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(members.len());

        for member in members {
            let row = sqlx::query(
                r#"
                INSERT INTO members (name, contact)
                VALUES ($1, $2)
                RETURNING id, name, contact
                "#,
            )
            .bind(&member.name)
            .bind(&member.contact)
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(map_row_to_member(&row)?);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn update(&self, member: Member) -> Result<()> {
        sqlx::query("UPDATE members SET name = $2, contact = $3 WHERE id = $1")
            .bind(member.id.value())
            .bind(&member.name)
            .bind(&member.contact)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: MemberId) -> Result<()> {
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(usize::try_from(count)?)
    }
}
