//! # Storage Layer
//!
//! The [`CategoryStore`] and [`ArticleStore`] traits define the persistence
//! contract the command layer orchestrates against. Two implementations
//! ship with the crate:
//!
//! - [`memory::InMemoryStore`]: `BTreeMap`-backed, for tests and ephemeral
//!   embedding. Deterministic iteration order, plus a write-failure
//!   injection hook so partial-cascade handling is testable.
//! - [`fs::JsonFileStore`]: a durable single-node backend. Two JSON files
//!   under a root directory, loaded eagerly, flushed with atomic
//!   tmp-then-rename writes after every mutation.
//!
//! A relational backend is a drop-in behind the same traits; the scans below
//! map one-to-one onto indexed `WHERE` clauses (`parent_id = ?`,
//! `path LIKE ?`, `is_active = true`).
//!
//! ## Soft Delete
//!
//! Nothing is ever hard-deleted. Retiring a category flips `is_active` for
//! the node and its whole subtree in one [`CategoryStore::soft_delete_subtree`]
//! call; every read filters on `is_active`. Implementations must make that
//! one call atomic with respect to readers — a reader sees the subtree
//! either fully retired or fully live, never half-cascaded.
//!
//! ## Concurrency
//!
//! Mutations take `&mut self`; the embedding application decides the
//! exterior locking (a mutex around the store, one connection per task,
//! etc.). No coordination happens inside this crate beyond the atomicity
//! of individual calls.

use crate::error::Result;
use crate::model::{Article, Category, CategoryId, NewCategory};

pub mod fs;
pub mod memory;

/// Persistence contract for category rows.
///
/// Reads return **active rows only** and in ascending id order, so tree
/// assembly and sibling listings are deterministic. `replace` is the one
/// exception to the active-only rule: the update cascade and a resumed
/// repair walk must be able to rewrite any existing row.
pub trait CategoryStore {
    /// Point lookup. `CategoryNotFound` for missing or inactive rows.
    fn get(&self, id: CategoryId) -> Result<Category>;

    /// Direct active children of `parent` (`None` for the root level),
    /// ascending id.
    fn children_of(&self, parent: Option<CategoryId>) -> Result<Vec<Category>>;

    /// Active rows in the subtree the prefix denotes: descendants by
    /// segment-safe path match, plus the subtree's own root node (whose
    /// path does not contain itself). Ascending id.
    fn by_subtree_prefix(&self, prefix: &str) -> Result<Vec<Category>>;

    /// Every active row, ascending id.
    fn all_active(&self) -> Result<Vec<Category>>;

    /// Assign an id and timestamps, store with `is_active = true`, and
    /// return the stored row.
    fn insert(&mut self, new: NewCategory) -> Result<Category>;

    /// Full-row update keyed by id; refreshes `updated_at`.
    /// `CategoryNotFound` if no row with that id exists at all.
    fn replace(&mut self, category: &Category) -> Result<()>;

    /// Flip `is_active` off for row `id` and every active row under
    /// `prefix`, atomically with respect to readers.
    fn soft_delete_subtree(&mut self, id: CategoryId, prefix: &str) -> Result<()>;
}

/// Persistence contract for the article slice the reference repairer
/// touches. `save_article` is a full-row overwrite: two concurrent repairs
/// computing the same valid set race harmlessly.
pub trait ArticleStore {
    /// Point lookup. `ArticleNotFound` for missing or inactive rows.
    fn article(&self, id: i64) -> Result<Article>;

    /// Upsert keyed by id; refreshes `updated_at`.
    fn save_article(&mut self, article: &Article) -> Result<()>;
}
