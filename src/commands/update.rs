use log::debug;

use crate::commands::create::as_parent_not_found;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TaxaError};
use crate::model::{Category, CategoryId};
use crate::path::{ancestor_ids, child_path};
use crate::store::CategoryStore;
use crate::tree::{self, CategoryNode};

/// Edit a category's fields and/or re-parent it. Re-parenting changes the
/// ancestry prefix of the whole subtree, so every descendant's path is
/// recomputed and rewritten, depth-first, one row at a time.
pub fn run<S: CategoryStore>(
    store: &mut S,
    id: CategoryId,
    name: &str,
    description: &str,
    new_parent_id: Option<CategoryId>,
) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TaxaError::InvalidName("name must not be empty".into()));
    }

    let mut node = store.get(id)?;

    let new_path = match new_parent_id {
        None => String::new(),
        Some(parent_id) => {
            if parent_id == id {
                return Err(TaxaError::InvalidReference {
                    id,
                    parent: parent_id,
                });
            }
            let parent = store.get(parent_id).map_err(as_parent_not_found)?;
            // A parent whose ancestry contains the node is one of its own
            // descendants: linking under it would close a cycle.
            if ancestor_ids(&parent.path).contains(&id) {
                return Err(TaxaError::InvalidReference {
                    id,
                    parent: parent_id,
                });
            }
            child_path(&parent.path, parent.id)
        }
    };

    node.name = name.to_string();
    node.description = description.to_string();
    node.parent_id = new_parent_id;
    node.path = new_path;
    store.replace(&node)?;

    let mut rewritten = 0;
    cascade_paths(store, &node, &mut rewritten)?;
    debug!("update of category {id} rewrote {rewritten} descendant path(s)");

    let rows = store.by_subtree_prefix(&node.subtree_prefix())?;
    let subtree = tree::subtree(rows, id).unwrap_or_else(|| CategoryNode::leaf(&node));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category updated: {}",
        node.name
    )));
    if rewritten > 0 {
        result.add_message(CmdMessage::info(format!(
            "Rewrote paths of {rewritten} descendant categor(ies)"
        )));
    }
    result.affected.push(subtree);
    Ok(result)
}

/// Depth-first rewrite of descendant paths. Each write is a full-row
/// replace keyed by `(id, new_path)`: re-running after a partial failure
/// redoes the same writes and converges. Not transactional — a failed
/// descendant write leaves the subtree partially rewritten and is reported
/// as such.
fn cascade_paths<S: CategoryStore>(
    store: &mut S,
    parent: &Category,
    rewritten: &mut usize,
) -> Result<()> {
    for mut child in store.children_of(Some(parent.id))? {
        child.path = child_path(&parent.path, parent.id);
        if store.replace(&child).is_err() {
            return Err(TaxaError::PartialCascade {
                updated: *rewritten,
                failed: child.id,
            });
        }
        *rewritten += 1;
        cascade_paths(store, &child, rewritten)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn scenario() -> StoreFixture {
        // Tech(1) ── Go(2) ── Concurrency(3), plus a second root Programming(4)
        StoreFixture::new()
            .with_root("Tech")
            .with_child("Go", 1)
            .with_child("Concurrency", 2)
            .with_root("Programming")
    }

    #[test]
    fn rename_keeps_path_and_parent() {
        let mut fixture = scenario();
        let result = run(&mut fixture.store, 2, "Golang", "the language", Some(1)).unwrap();

        let node = &result.affected[0];
        assert_eq!(node.name, "Golang");
        assert_eq!(node.path, "/1");

        let stored = fixture.store.get(2).unwrap();
        assert_eq!(stored.description, "the language");
        assert_eq!(stored.path, "/1");
    }

    #[test]
    fn reparent_rewrites_the_whole_subtree() {
        let mut fixture = scenario();
        let result = run(&mut fixture.store, 2, "Go", "", Some(4)).unwrap();

        assert_eq!(fixture.store.get(2).unwrap().path, "/4");
        assert_eq!(fixture.store.get(3).unwrap().path, "/4/2");

        // The returned subtree reflects the new paths.
        let node = &result.affected[0];
        assert_eq!(node.path, "/4");
        assert_eq!(node.children[0].path, "/4/2");
    }

    #[test]
    fn reparent_to_root_level_works() {
        let mut fixture = scenario();
        run(&mut fixture.store, 2, "Go", "", None).unwrap();

        assert_eq!(fixture.store.get(2).unwrap().path, "");
        assert_eq!(fixture.store.get(3).unwrap().path, "/2");
    }

    #[test]
    fn path_invariant_holds_after_update() {
        let mut fixture = scenario();
        run(&mut fixture.store, 2, "Go", "", Some(4)).unwrap();

        for row in fixture.store.all_active().unwrap() {
            if let Some(parent_id) = row.parent_id {
                let parent = fixture.store.get(parent_id).unwrap();
                assert_eq!(row.path, child_path(&parent.path, parent.id));
            } else {
                assert_eq!(row.path, "");
            }
        }
    }

    #[test]
    fn reparent_under_self_is_rejected() {
        let mut fixture = scenario();
        let err = run(&mut fixture.store, 2, "Go", "", Some(2)).unwrap_err();
        assert!(matches!(
            err,
            TaxaError::InvalidReference { id: 2, parent: 2 }
        ));
    }

    #[test]
    fn reparent_under_own_descendant_is_rejected_before_any_write() {
        let mut fixture = scenario();
        let err = run(&mut fixture.store, 2, "Go", "", Some(3)).unwrap_err();

        assert!(matches!(
            err,
            TaxaError::InvalidReference { id: 2, parent: 3 }
        ));
        // Nothing moved.
        assert_eq!(fixture.store.get(2).unwrap().path, "/1");
        assert_eq!(fixture.store.get(3).unwrap().path, "/1/2");
    }

    #[test]
    fn missing_node_and_missing_parent_are_distinct() {
        let mut fixture = scenario();
        assert!(matches!(
            run(&mut fixture.store, 99, "X", "", None).unwrap_err(),
            TaxaError::CategoryNotFound(99)
        ));
        assert!(matches!(
            run(&mut fixture.store, 2, "Go", "", Some(99)).unwrap_err(),
            TaxaError::ParentNotFound(99)
        ));
    }

    #[test]
    fn failed_descendant_write_reports_partial_cascade() {
        let mut fixture = scenario();
        fixture.store.fail_replace_for(Some(3));

        let err = run(&mut fixture.store, 2, "Go", "", Some(4)).unwrap_err();
        assert!(matches!(
            err,
            TaxaError::PartialCascade {
                updated: 0,
                failed: 3
            }
        ));

        // The node's own write went through before the cascade stopped.
        assert_eq!(fixture.store.get(2).unwrap().path, "/4");
        assert_eq!(fixture.store.get(3).unwrap().path, "/1/2");
    }

    #[test]
    fn rerunning_a_failed_update_converges() {
        let mut fixture = scenario();
        fixture.store.fail_replace_for(Some(3));
        run(&mut fixture.store, 2, "Go", "", Some(4)).unwrap_err();

        fixture.store.fail_replace_for(None);
        run(&mut fixture.store, 2, "Go", "", Some(4)).unwrap();

        assert_eq!(fixture.store.get(2).unwrap().path, "/4");
        assert_eq!(fixture.store.get(3).unwrap().path, "/4/2");
    }
}
