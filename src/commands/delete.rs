use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CategoryId;
use crate::store::CategoryStore;
use crate::tree::{self, CategoryNode};

/// Retire a category and its entire subtree. The subtree is snapshotted
/// *before* the bulk soft delete so the caller gets back exactly what
/// disappeared — a fresh query afterwards would find nothing.
pub fn run<S: CategoryStore>(store: &mut S, id: CategoryId) -> Result<CmdResult> {
    let node = store.get(id)?;
    let prefix = node.subtree_prefix();

    let rows = store.by_subtree_prefix(&prefix)?;
    let snapshot = tree::subtree(rows, id).unwrap_or_else(|| CategoryNode::leaf(&node));
    let removed = snapshot.count();

    store.soft_delete_subtree(id, &prefix)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category deleted: {} ({} categor(ies) removed)",
        node.name, removed
    )));
    result.affected.push(snapshot);
    Ok(result)
}
