use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TaxaError};
use crate::model::{CategoryId, NewCategory};
use crate::path::child_path;
use crate::store::CategoryStore;
use crate::tree::CategoryNode;

pub fn run<S: CategoryStore>(
    store: &mut S,
    name: &str,
    description: &str,
    parent_id: Option<CategoryId>,
) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TaxaError::InvalidName("name must not be empty".into()));
    }

    let path = match parent_id {
        None => String::new(),
        Some(parent_id) => {
            let parent = store.get(parent_id).map_err(as_parent_not_found)?;
            child_path(&parent.path, parent.id)
        }
    };

    let created = store.insert(NewCategory {
        name: name.to_string(),
        description: description.to_string(),
        parent_id,
        path,
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category created: {}",
        created.name
    )));
    // A brand-new node has no descendants: no cascade, the leaf is the result.
    result.affected.push(CategoryNode::leaf(&created));
    Ok(result)
}

pub(super) fn as_parent_not_found(err: TaxaError) -> TaxaError {
    match err {
        TaxaError::CategoryNotFound(id) => TaxaError::ParentNotFound(id),
        other => other,
    }
}
