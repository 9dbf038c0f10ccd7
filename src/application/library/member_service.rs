use crate::domain::{Member, MemberId, NewMember};

use super::ServiceDependencies;
use super::errors::{LibraryApplicationError, Result};

pub async fn list_members(deps: &ServiceDependencies) -> Result<Vec<Member>> {
    deps.member_repository
        .find_all()
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

/// IDで会員を取得する
///
/// # エラー
/// - MemberNotFound: 会員が存在しない
pub async fn get_member(deps: &ServiceDependencies, id: MemberId) -> Result<Member> {
    deps.member_repository
        .find_by_id(id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?
        .ok_or(LibraryApplicationError::MemberNotFound)
}

/// 会員をまとめて登録し、登録後の会員数を返す
pub async fn add_members(deps: &ServiceDependencies, members: Vec<NewMember>) -> Result<usize> {
    deps.member_repository
        .insert_many(members)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    deps.member_repository
        .count()
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

pub async fn update_member(
    deps: &ServiceDependencies,
    id: MemberId,
    member: NewMember,
) -> Result<Member> {
    get_member(deps, id).await?;

    let updated = member.with_id(id);
    deps.member_repository
        .update(updated.clone())
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    Ok(updated)
}

pub async fn delete_member(deps: &ServiceDependencies, id: MemberId) -> Result<()> {
    get_member(deps, id).await?;

    deps.member_repository
        .delete(id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}
