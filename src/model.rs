//! # Domain Model: Categories and Article References
//!
//! Two persisted row types live here: [`Category`], a node of the taxonomy
//! stored flat with a materialized ancestry path, and [`Article`], the
//! minimal slice of an article row the reference repairer touches.
//!
//! ## Category Rows
//!
//! Categories are never hard-deleted: `is_active` flips to `false` and the
//! row stays behind, excluded from every read. The `path` column encodes the
//! ancestor chain (`""` for roots, `"/1/2"` for a grandchild of root 1 via
//! child 2) and never includes the row's own id — see [`crate::path`] for
//! the convention and why prefix matching is segment-delimited.
//!
//! Children are deliberately absent from the row. The assembled tree shape
//! ([`crate::tree::CategoryNode`]) is built per read and discarded; nothing
//! tree-shaped is persisted.
//!
//! ## Article Rows
//!
//! An article carries an ordered list of category ids with no foreign-key
//! enforcement behind it. Validity is restored lazily on read by
//! [`crate::commands::repair`], which is why the row is modeled here at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::path;

/// Store-assigned, monotonically increasing, immutable once issued.
pub type CategoryId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub parent_id: Option<CategoryId>,
    /// Materialized ancestry: `""` for roots, `parent.path + "/" + parent.id`
    /// otherwise. Never contains the row's own id.
    pub path: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// The prefix this node's own row and every descendant's `path` fall
    /// under. Drives subtree scans and the delete cascade.
    pub fn subtree_prefix(&self) -> String {
        path::subtree_prefix(&self.path, self.id)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A category draft handed to [`crate::store::CategoryStore::insert`].
/// The store assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub parent_id: Option<CategoryId>,
    pub path: String,
}

/// The slice of an article row the reference repairer reads and rewrites.
/// Everything else about articles belongs to the embedding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}
