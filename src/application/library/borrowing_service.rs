use crate::domain::{
    self, BookId, BorrowingRecord, BorrowingRecordId, MemberId, NewBorrowingRecord, ReturnBookError,
    commands::*,
};
use super::ServiceDependencies;
use super::errors::{LibraryApplicationError, Result};

/// 貸出記録が参照する書籍と会員の存在を確認するヘルパー関数
///
/// # エラー
/// - InvalidReference: 書籍または会員が存在しない
async fn ensure_references(
    deps: &ServiceDependencies,
    book_id: BookId,
    member_id: MemberId,
) -> Result<()> {
    let book = deps
        .book_repository
        .find_by_id(book_id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    if book.is_none() {
        return Err(LibraryApplicationError::InvalidReference(format!(
            "Book {} does not exist",
            book_id
        )));
    }

    let member = deps
        .member_repository
        .find_by_id(member_id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    if member.is_none() {
        return Err(LibraryApplicationError::InvalidReference(format!(
            "Member {} does not exist",
            member_id
        )));
    }

    Ok(())
}

/// 書籍の返却期限を未返却の貸出記録に合わせるヘルパー関数
///
/// 未返却の記録のうち最も遅い返却期限を設定し、未返却の記録がなければ
/// クリアする。書籍が既に削除されている場合は何もしない。
async fn sync_book_due_date(deps: &ServiceDependencies, book_id: BookId) -> Result<()> {
    let book = deps
        .book_repository
        .find_by_id(book_id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    let Some(book) = book else {
        tracing::warn!("Book {} no longer exists, skipping due date update", book_id);
        return Ok(());
    };

    let open_records = deps
        .borrowing_record_repository
        .find_open_by_book(book_id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    let due_date = domain::borrowing_record::open_due_date(&open_records);
    if book.due_date == due_date {
        return Ok(());
    }

    deps.book_repository
        .update(domain::Book { due_date, ..book })
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

pub async fn list_borrowing_records(deps: &ServiceDependencies) -> Result<Vec<BorrowingRecord>> {
    deps.borrowing_record_repository
        .find_all()
        .await
        .map_err(LibraryApplicationError::RepositoryError)
}

/// IDで貸出記録を取得する
///
/// # エラー
/// - BorrowingRecordNotFound: 貸出記録が存在しない
pub async fn get_borrowing_record(
    deps: &ServiceDependencies,
    id: BorrowingRecordId,
) -> Result<BorrowingRecord> {
    deps.borrowing_record_repository
        .find_by_id(id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?
        .ok_or(LibraryApplicationError::BorrowingRecordNotFound)
}

/// 貸出記録をそのまま登録する
///
/// 日付は入力どおりに保存する。日付を自動で決める場合は`borrow_book`を使う。
pub async fn create_borrowing_record(
    deps: &ServiceDependencies,
    record: NewBorrowingRecord,
) -> Result<BorrowingRecord> {
    ensure_references(deps, record.book_id, record.member_id).await?;

    let record = deps
        .borrowing_record_repository
        .insert(record)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    sync_book_due_date(deps, record.book_id).await?;

    Ok(record)
}

/// 貸出記録を置き換える
///
/// 書籍が変わった場合は、元の書籍と新しい書籍の両方の返却期限を合わせ直す。
pub async fn update_borrowing_record(
    deps: &ServiceDependencies,
    id: BorrowingRecordId,
    record: NewBorrowingRecord,
) -> Result<BorrowingRecord> {
    let previous = get_borrowing_record(deps, id).await?;
    ensure_references(deps, record.book_id, record.member_id).await?;

    let updated = record.with_id(id);
    deps.borrowing_record_repository
        .update(updated.clone())
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    sync_book_due_date(deps, updated.book_id).await?;
    if previous.book_id != updated.book_id {
        sync_book_due_date(deps, previous.book_id).await?;
    }

    Ok(updated)
}

/// 貸出記録を削除する
///
/// 未返却の記録を削除した場合、書籍の返却期限は残りの未返却の記録に合わせる。
pub async fn delete_borrowing_record(
    deps: &ServiceDependencies,
    id: BorrowingRecordId,
) -> Result<()> {
    let record = get_borrowing_record(deps, id).await?;

    deps.borrowing_record_repository
        .delete(id)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    sync_book_due_date(deps, record.book_id).await
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍と会員が存在すること
/// - 返却期限は貸出日 + 14日
/// - 書籍の返却期限は未返却の貸出記録のうち最も遅いもの
///
/// # 一貫性保証
///
/// 貸出記録と書籍は別々に更新される。書籍の更新に失敗した場合、
/// 貸出記録だけが残る。
pub async fn borrow_book(deps: &ServiceDependencies, cmd: BorrowBook) -> Result<BorrowingRecord> {
    // 1. 参照の存在確認
    ensure_references(deps, cmd.book_id, cmd.member_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let new_record = domain::borrowing_record::borrow_book(&cmd);

    // 3. 貸出記録を保存
    let record = deps
        .borrowing_record_repository
        .insert(new_record)
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    // 4. 書籍の返却期限を更新
    sync_book_due_date(deps, record.book_id).await?;

    Ok(record)
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 貸出記録が存在すること
/// - 返却済みでないこと
/// - 延滞していても返却は受け付ける
/// - 同じ書籍の他の貸出が残っていれば、書籍の返却期限はそちらに合わせる
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<BorrowingRecord> {
    // 1. 貸出記録を取得
    let record = get_borrowing_record(deps, cmd.record_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let returned =
        domain::borrowing_record::return_book(record, cmd.returned_on).map_err(|e| match e {
            ReturnBookError::AlreadyReturned => LibraryApplicationError::AlreadyReturned,
        })?;

    // 3. 貸出記録を更新
    deps.borrowing_record_repository
        .update(returned.clone())
        .await
        .map_err(LibraryApplicationError::RepositoryError)?;

    // 4. 書籍の返却期限を残りの貸出に合わせる
    sync_book_due_date(deps, returned.book_id).await?;

    Ok(returned)
}
