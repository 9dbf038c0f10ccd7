pub mod book_repository;
pub mod borrowing_record_repository;
pub mod member_repository;

pub use book_repository::BookRepository as InMemoryBookRepository;
pub use borrowing_record_repository::BorrowingRecordRepository as InMemoryBorrowingRecordRepository;
pub use member_repository::MemberRepository as InMemoryMemberRepository;

use std::collections::BTreeMap;

/// Rows keyed by id plus the next id to hand out.
///
/// Ids start at 1 and are never reused, even after deletes.
#[derive(Debug)]
pub(crate) struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T: Clone> Table<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    pub(crate) fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn insert(&mut self, id: i64, row: T) {
        self.rows.insert(id, row);
    }

    pub(crate) fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    /// Replaces an existing row. Unknown ids are ignored.
    pub(crate) fn replace(&mut self, id: i64, row: T) {
        if let Some(slot) = self.rows.get_mut(&id) {
            *slot = row;
        }
    }

    pub(crate) fn remove(&mut self, id: i64) {
        self.rows.remove(&id);
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows in ascending id order that satisfy `predicate`.
    pub(crate) fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}
