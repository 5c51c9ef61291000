//! The in-memory record store.
//!
//! All records live in three tables (one per record kind) that are loaded once
//! from seed data on startup and only live as long as the process. Each table
//! is protected by its own lock, so every single store operation is atomic.
//! There are no transactions spanning multiple operations.

use std::fmt;
use tokio::sync::RwLock;

use crate::{
    model::{Course, Grade, RecordId, Student},
    prelude::*,
};

pub(crate) mod relation;
mod seed;

pub(crate) use self::seed::{Seed, SeedConfig};


/// A kind of record that is stored in its own table of the [`Store`].
pub(crate) trait Record: Clone + Send + Sync + 'static {
    /// Human readable name of this kind, used for logging.
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    /// Returns the table holding records of this kind.
    fn table(store: &Store) -> &RwLock<Table<Self>>;
}

impl Record for Course {
    const KIND: &'static str = "course";

    fn id(&self) -> RecordId {
        self.id
    }

    fn table(store: &Store) -> &RwLock<Table<Self>> {
        &store.courses
    }
}

impl Record for Student {
    const KIND: &'static str = "student";

    fn id(&self) -> RecordId {
        self.id
    }

    fn table(store: &Store) -> &RwLock<Table<Self>> {
        &store.students
    }
}

impl Record for Grade {
    const KIND: &'static str = "grade";

    fn id(&self) -> RecordId {
        self.id
    }

    fn table(store: &Store) -> &RwLock<Table<Self>> {
        &store.grades
    }
}


/// An ordered sequence of records plus the id counter for new records.
#[derive(Debug)]
pub(crate) struct Table<R> {
    rows: Vec<R>,

    /// The largest id ever handed out (or seen in the seed data). Never
    /// decreases, so ids of deleted records are not reused.
    last_id: RecordId,
}

impl<R: Record> Table<R> {
    fn new(rows: Vec<R>) -> Self {
        let last_id = rows.iter().map(Record::id).max().unwrap_or(0).max(0);
        Self { rows, last_id }
    }

    fn next_id(&mut self) -> Result<RecordId, StoreError> {
        self.last_id = self.last_id.checked_add(1)
            .ok_or(StoreError::IdsExhausted { kind: R::KIND })?;
        Ok(self.last_id)
    }
}


/// Errors of store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreError {
    /// The id counter of a table reached `RecordId::MAX`.
    IdsExhausted { kind: &'static str },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdsExhausted { kind } => write!(f, "no {kind} ids left to allocate"),
        }
    }
}

impl std::error::Error for StoreError {}


/// Holds all records. Shared via `Arc` between all requests.
#[derive(Debug)]
pub(crate) struct Store {
    courses: RwLock<Table<Course>>,
    students: RwLock<Table<Student>>,
    grades: RwLock<Table<Grade>>,
}

impl Store {
    pub(crate) fn new(seed: Seed) -> Self {
        info!(
            "Initializing store with {} courses, {} students and {} grades",
            seed.courses.len(),
            seed.students.len(),
            seed.grades.len(),
        );

        Self {
            courses: RwLock::new(Table::new(seed.courses)),
            students: RwLock::new(Table::new(seed.students)),
            grades: RwLock::new(Table::new(seed.grades)),
        }
    }

    /// Returns a snapshot of all records of kind `R`, in insertion order.
    pub(crate) async fn list_all<R: Record>(&self) -> Vec<R> {
        R::table(self).read().await.rows.clone()
    }

    /// Returns the first record with the given id. A missing id matches
    /// nothing.
    pub(crate) async fn find_by_id<R: Record>(&self, id: Option<RecordId>) -> Option<R> {
        let id = id?;
        self.find_first(|r: &R| r.id() == id).await
    }

    /// Returns the first record (in insertion order) matching `predicate`.
    pub(crate) async fn find_first<R: Record>(&self, predicate: impl Fn(&R) -> bool) -> Option<R> {
        R::table(self).read().await.rows.iter().find(|r| predicate(r)).cloned()
    }

    /// Runs `f` with read access to all records of kind `R`.
    pub(crate) async fn read<R: Record, T>(&self, f: impl FnOnce(&[R]) -> T) -> T {
        f(&R::table(self).read().await.rows)
    }

    /// Allocates a new id, builds the record via `make` and appends it to the
    /// table. Returns the new record, or an error without touching the table
    /// if no id is left.
    pub(crate) async fn insert<R: Record>(
        &self,
        make: impl FnOnce(RecordId) -> R,
    ) -> Result<R, StoreError> {
        let mut table = R::table(self).write().await;
        let id = table.next_id()?;
        let record = make(id);
        table.rows.push(record.clone());
        debug!("Added {} with id {}", R::KIND, id);
        Ok(record)
    }

    /// Removes all records matching `predicate` and returns the remaining
    /// records of that table.
    pub(crate) async fn remove_where<R: Record>(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        let mut table = R::table(self).write().await;
        let before = table.rows.len();
        table.rows.retain(|r| !predicate(r));
        debug!("Removed {} {} record(s)", before - table.rows.len(), R::KIND);
        table.rows.clone()
    }
}
