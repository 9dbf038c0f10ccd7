//! PostgreSQL adapter tests.
//!
//! Require a running database reachable through `DATABASE_URL`; run with
//! `cargo test -- --ignored`.

use chrono::NaiveDate;
use library_api::adapters::postgres::{
    PostgresBookRepository, PostgresBorrowingRecordRepository, PostgresMemberRepository,
};
use library_api::application::library;
use library_api::domain::commands::{BorrowBook, ReturnBook};
use library_api::domain::*;
use library_api::ports::*;
use serial_test::serial;

mod common;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_book(title: &str, author: &str, genre: &str) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
        due_date: None,
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_book_repository_crud() {
    let pool = common::create_test_pool().await;
    common::cleanup_database(&pool).await;
    let repo = PostgresBookRepository::new(pool.clone());

    let inserted = repo
        .insert_many(vec![
            new_book("Emma", "Jane Austen", "Romance"),
            new_book("Dune", "Frank Herbert", "Science Fiction"),
        ])
        .await
        .unwrap();
    assert_eq!(inserted.len(), 2);
    assert!(inserted[0].id < inserted[1].id);
    assert_eq!(repo.count().await.unwrap(), 2);

    let mut dune = inserted[1].clone();
    dune.due_date = Some(date(2025, 3, 20));
    repo.update(dune.clone()).await.unwrap();
    assert_eq!(repo.find_by_id(dune.id).await.unwrap(), Some(dune.clone()));

    repo.delete(inserted[0].id).await.unwrap();
    assert_eq!(repo.find_all().await.unwrap(), vec![dune]);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_book_repository_filters() {
    let pool = common::create_test_pool().await;
    common::cleanup_database(&pool).await;
    let repo = PostgresBookRepository::new(pool.clone());

    repo.insert_many(vec![
        new_book("To Kill a Mockingbird", "Harper Lee", "Fiction"),
        new_book("Go Set a Watchman", "Harper Lee", "Fiction"),
        new_book("Dune", "Frank Herbert", "Science Fiction"),
    ])
    .await
    .unwrap();

    assert_eq!(repo.find_by_genre("FICTION").await.unwrap().len(), 2);
    assert_eq!(
        repo.find_by_author_and_genre("harper lee", None)
            .await
            .unwrap()
            .len(),
        2
    );
    assert!(
        repo.find_by_author_and_genre("Harper Lee", Some("Science Fiction"))
            .await
            .unwrap()
            .is_empty()
    );
    assert!(repo.find_due_on(date(2025, 3, 20)).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_member_repository_crud() {
    let pool = common::create_test_pool().await;
    common::cleanup_database(&pool).await;
    let repo = PostgresMemberRepository::new(pool.clone());

    let members = repo
        .insert_many(vec![NewMember {
            name: "Alice".to_string(),
            contact: "alice@example.com".to_string(),
        }])
        .await
        .unwrap();
    let alice = members[0].clone();

    let renamed = Member {
        name: "Alice Smith".to_string(),
        ..alice.clone()
    };
    repo.update(renamed.clone()).await.unwrap();
    assert_eq!(repo.find_by_id(alice.id).await.unwrap(), Some(renamed));

    repo.delete(alice.id).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_borrowing_record_repository_round_trip() {
    let pool = common::create_test_pool().await;
    common::cleanup_database(&pool).await;
    let repo = PostgresBorrowingRecordRepository::new(pool.clone());

    let record = repo
        .insert(NewBorrowingRecord {
            book_id: BookId::from_i64(1),
            member_id: MemberId::from_i64(2),
            borrow_date: date(2025, 3, 6),
            due_date: date(2025, 3, 20),
            return_date: None,
        })
        .await
        .unwrap();

    let returned = BorrowingRecord {
        return_date: Some(date(2025, 3, 18)),
        ..record.clone()
    };
    repo.update(returned.clone()).await.unwrap();

    assert_eq!(repo.find_by_id(record.id).await.unwrap(), Some(returned));
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_borrow_and_return_against_postgres() {
    let pool = common::create_test_pool().await;
    common::cleanup_database(&pool).await;
    let deps = common::postgres_deps(&pool);

    library::add_books(&deps, vec![new_book("Emma", "Jane Austen", "Romance")])
        .await
        .unwrap();
    library::add_members(
        &deps,
        vec![NewMember {
            name: "Alice".to_string(),
            contact: "alice@example.com".to_string(),
        }],
    )
    .await
    .unwrap();
    let book_id = library::list_books(&deps).await.unwrap()[0].id;
    let member_id = library::list_members(&deps).await.unwrap()[0].id;

    let record = library::borrow_book(
        &deps,
        BorrowBook {
            book_id,
            member_id,
            borrowed_on: date(2025, 3, 6),
        },
    )
    .await
    .unwrap();

    let due = library::books_due_on(&deps, date(2025, 3, 20)).await.unwrap();
    assert_eq!(due.len(), 1);

    library::return_book(
        &deps,
        ReturnBook {
            record_id: record.id,
            returned_on: date(2025, 3, 12),
        },
    )
    .await
    .unwrap();

    let book = library::get_book(&deps, book_id).await.unwrap();
    assert_eq!(book.due_date, None);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_find_open_by_book() {
    let pool = common::create_test_pool().await;
    common::cleanup_database(&pool).await;
    let repo = PostgresBorrowingRecordRepository::new(pool.clone());

    let loan = |book_id: i64, due_date: NaiveDate| NewBorrowingRecord {
        book_id: BookId::from_i64(book_id),
        member_id: MemberId::from_i64(1),
        borrow_date: date(2025, 3, 1),
        due_date,
        return_date: None,
    };

    let first = repo.insert(loan(1, date(2025, 3, 15))).await.unwrap();
    let second = repo.insert(loan(1, date(2025, 3, 22))).await.unwrap();
    repo.insert(loan(2, date(2025, 3, 29))).await.unwrap();
    repo.update(BorrowingRecord {
        return_date: Some(date(2025, 3, 10)),
        ..first
    })
    .await
    .unwrap();

    let open = repo.find_open_by_book(BookId::from_i64(1)).await.unwrap();
    assert_eq!(open, vec![second]);
}
