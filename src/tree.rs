//! # Tree Assembler
//!
//! Rebuilds the category forest from a flat set of active rows. There is no
//! persistent tree anywhere: every tree read scans and links from scratch,
//! and the assembled [`CategoryNode`]s are discarded after the response.
//!
//! Assembly is two passes: index the rows by id, then hang each row off its
//! parent's child list. Rows whose `parent_id` points outside the input set
//! are *orphans* — a correct delete cascade never leaves one active, so they
//! are excluded from the forest (surfacing them as roots would resurrect a
//! subtree whose ancestor was retired) and logged as an integrity signal.
//!
//! Sibling order is ascending id. A visited-set guard keeps assembly
//! terminating even if a cycle were ever written into the data; rows trapped
//! in a cycle are unreachable from any root and get the same warn-and-exclude
//! treatment as orphans.

use std::collections::{HashMap, HashSet};

use log::warn;
use serde::Serialize;

use crate::model::{Category, CategoryId};

/// A category with its children attached — the wire shape of tree reads.
/// Transient: assembled per response, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub parent_id: Option<CategoryId>,
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn leaf(row: &Category) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            parent_id: row.parent_id,
            path: row.path.clone(),
            children: Vec::new(),
        }
    }

    /// Nodes in this subtree, the node itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::count).sum::<usize>()
    }
}

/// Build the forest of root nodes from a flat set of active rows.
pub fn build_forest(mut rows: Vec<Category>) -> Vec<CategoryNode> {
    rows.sort_by_key(|row| row.id);

    let known: HashSet<CategoryId> = rows.iter().map(|row| row.id).collect();
    let mut by_parent: HashMap<CategoryId, Vec<Category>> = HashMap::new();
    let mut roots = Vec::new();
    let mut orphans = Vec::new();

    for row in rows {
        match row.parent_id {
            None => roots.push(row),
            Some(parent) if known.contains(&parent) => {
                by_parent.entry(parent).or_default().push(row)
            }
            Some(parent) => orphans.push((row.id, parent)),
        }
    }

    if !orphans.is_empty() {
        warn!(
            "tree assembly skipped {} orphan category(ies) with retired parents: {:?}",
            orphans.len(),
            orphans
        );
    }

    let mut visited = HashSet::new();
    let forest: Vec<CategoryNode> = roots
        .into_iter()
        .map(|root| attach(root, &mut by_parent, &mut visited))
        .collect();

    // Anything still unclaimed was never reached from a root.
    let stranded: Vec<CategoryId> = by_parent.values().flatten().map(|row| row.id).collect();
    if !stranded.is_empty() {
        warn!(
            "tree assembly skipped {} category(ies) unreachable from any root (cycle?): {:?}",
            stranded.len(),
            stranded
        );
    }

    forest
}

/// Assemble the subtree rooted at `id` from rows that belong to it (the
/// output of a subtree-prefix scan). Returns `None` if `id` is not among
/// the rows.
pub fn subtree(mut rows: Vec<Category>, id: CategoryId) -> Option<CategoryNode> {
    let mut target = None;
    let mut by_parent: HashMap<CategoryId, Vec<Category>> = HashMap::new();

    rows.sort_by_key(|row| row.id);
    for row in rows {
        if row.id == id {
            target = Some(row);
        } else if let Some(parent) = row.parent_id {
            by_parent.entry(parent).or_default().push(row);
        }
    }

    let mut visited = HashSet::new();
    Some(attach(target?, &mut by_parent, &mut visited))
}

/// Preorder ids of everything below `node`, the node itself excluded.
pub fn descendant_ids(node: &CategoryNode) -> Vec<CategoryId> {
    let mut out = Vec::new();
    for child in &node.children {
        collect(child, &mut out);
    }
    out
}

fn collect(node: &CategoryNode, out: &mut Vec<CategoryId>) {
    out.push(node.id);
    for child in &node.children {
        collect(child, out);
    }
}

fn attach(
    row: Category,
    by_parent: &mut HashMap<CategoryId, Vec<Category>>,
    visited: &mut HashSet<CategoryId>,
) -> CategoryNode {
    let mut node = CategoryNode::leaf(&row);
    if !visited.insert(row.id) {
        return node;
    }
    if let Some(children) = by_parent.remove(&row.id) {
        node.children = children
            .into_iter()
            .map(|child| attach(child, by_parent, visited))
            .collect();
    }
    node
}
