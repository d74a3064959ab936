use crate::commands::CmdResult;
use crate::error::{Result, TaxaError};
use crate::model::CategoryId;
use crate::store::CategoryStore;
use crate::tree::{self, CategoryNode};

/// Point lookup of a single category, children not attached.
pub fn run_one<S: CategoryStore>(store: &S, id: CategoryId) -> Result<CmdResult> {
    let row = store.get(id)?;

    let mut result = CmdResult::default();
    result.listed.push(CategoryNode::leaf(&row));
    Ok(result)
}

/// The full forest, rebuilt from scratch over all active rows.
pub fn run_tree<S: CategoryStore>(store: &S) -> Result<CmdResult> {
    let rows = store.all_active()?;

    let mut result = CmdResult::default();
    result.listed = tree::build_forest(rows);
    Ok(result)
}

/// The children of one category, each with its own descendants attached.
/// The target node itself is not part of the listing.
pub fn run_children<S: CategoryStore>(store: &S, id: CategoryId) -> Result<CmdResult> {
    let node = store.get(id)?;
    let rows = store.by_subtree_prefix(&node.subtree_prefix())?;
    let subtree = tree::subtree(rows, id).unwrap_or_else(|| CategoryNode::leaf(&node));

    let mut result = CmdResult::default();
    result.listed = subtree.children;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::CategoryStore;

    fn scenario() -> StoreFixture {
        StoreFixture::new()
            .with_root("Tech") // 1
            .with_child("Go", 1) // 2
            .with_child("Concurrency", 2) // 3
            .with_root("Life") // 4
    }

    #[test]
    fn one_returns_a_leaf_without_children() {
        let fixture = scenario();
        let result = run_one(&fixture.store, 1).unwrap();
        assert_eq!(result.listed[0].id, 1);
        assert!(result.listed[0].children.is_empty());
    }

    #[test]
    fn one_not_found_for_retired_row() {
        let mut fixture = scenario();
        fixture.store.soft_delete_subtree(4, "/4").unwrap();
        assert!(matches!(
            run_one(&fixture.store, 4).unwrap_err(),
            TaxaError::CategoryNotFound(4)
        ));
    }

    #[test]
    fn tree_lists_roots_with_nested_children() {
        let fixture = scenario();
        let result = run_tree(&fixture.store).unwrap();

        let root_ids: Vec<CategoryId> = result.listed.iter().map(|n| n.id).collect();
        assert_eq!(root_ids, vec![1, 4]);
        assert_eq!(result.listed[0].children[0].children[0].id, 3);
    }

    #[test]
    fn tree_omits_retired_subtrees() {
        let mut fixture = scenario();
        fixture.store.soft_delete_subtree(2, "/1/2").unwrap();

        let result = run_tree(&fixture.store).unwrap();
        assert_eq!(result.listed[0].children.len(), 0);
    }

    #[test]
    fn children_lists_subtrees_below_the_target() {
        let fixture = scenario();
        let result = run_children(&fixture.store, 1).unwrap();

        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].id, 2);
        assert_eq!(result.listed[0].children[0].id, 3);
    }

    #[test]
    fn children_of_leaf_is_empty() {
        let fixture = scenario();
        let result = run_children(&fixture.store, 3).unwrap();
        assert!(result.listed.is_empty());
    }

    #[test]
    fn children_of_missing_node_is_not_found() {
        let fixture = scenario();
        assert!(matches!(
            run_children(&fixture.store, 99).unwrap_err(),
            TaxaError::CategoryNotFound(99)
        ));
    }
}
