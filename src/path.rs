//! # Path Builder
//!
//! Pure functions over materialized ancestry paths. Everything that touches
//! a `path` string — creating one, deriving a subtree prefix, deciding
//! whether one path falls under another — goes through this module so the
//! convention is applied uniformly across create, the update cascade, the
//! delete cascade, and every store scan.
//!
//! ## The Convention
//!
//! A path lists ancestor ids, slash-delimited, oldest first, and never the
//! node's own id:
//!
//! ```text
//! root            path = ""        subtree prefix = "/<id>"
//! child of root   path = "/1"      subtree prefix = "/1/<id>"
//! grandchild      path = "/1/2"    subtree prefix = "/1/2/<id>"
//! ```
//!
//! ## The Numeric-Prefix Hazard
//!
//! Raw substring matching would let a scan for id `1` (`"/1"`) capture a
//! sibling subtree rooted at id `12` (`"/12/..."`). [`is_under`] therefore
//! only matches on whole segments: a candidate is under a prefix when it
//! equals the prefix or continues it with a `/`.

use crate::model::CategoryId;

/// The path a child of `(parent_path, parent_id)` carries.
/// `child_path("", 1)` is `"/1"`; `child_path("/1", 2)` is `"/1/2"`.
pub fn child_path(parent_path: &str, parent_id: CategoryId) -> String {
    format!("{parent_path}/{parent_id}")
}

/// The prefix every descendant's path starts with. Same formula as
/// [`child_path`]: a node's subtree prefix is the path its children carry.
pub fn subtree_prefix(node_path: &str, node_id: CategoryId) -> String {
    child_path(node_path, node_id)
}

/// Segment-delimited prefix test: true iff `path` equals `prefix` or
/// continues it with a `/`. `"/12"` is not under `"/1"`.
pub fn is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Parse the ancestor ids out of a path, root-most first. Lenient on
/// malformed segments (skipped): the store is the source of truth and the
/// parser only feeds the cycle guard and diagnostics.
pub fn ancestor_ids(path: &str) -> Vec<CategoryId> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| segment.parse().ok())
        .collect()
}
