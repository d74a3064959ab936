//! Lazy repair of article→category references.
//!
//! No foreign key protects an article's category list: when a category is
//! retired, articles keep pointing at it. Rather than sweeping every
//! article at delete time, references heal on read — [`run`] partitions
//! the stored list against the live category set and, only when something
//! changed, writes the cleaned list back. That makes article reads
//! not-pure by design; the write is a full-row overwrite, so two
//! concurrent repairs computing the same list race harmlessly.

use log::warn;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TaxaError};
use crate::model::CategoryId;
use crate::store::{ArticleStore, CategoryStore};

/// Split a reference list into (valid, dropped) against the live category
/// set. Order is preserved, duplicates collapse onto their first position.
pub fn partition<S: CategoryStore>(
    store: &S,
    ids: &[CategoryId],
) -> Result<(Vec<CategoryId>, Vec<CategoryId>)> {
    let mut valid = Vec::new();
    let mut dropped = Vec::new();

    for &id in ids {
        if valid.contains(&id) || dropped.contains(&id) {
            continue;
        }
        match store.get(id) {
            Ok(_) => valid.push(id),
            Err(TaxaError::CategoryNotFound(_)) => dropped.push(id),
            Err(other) => return Err(other),
        }
    }

    Ok((valid, dropped))
}

/// Reconcile one article's category references, persisting the repaired
/// list only when drift was found. A second run against an unchanged
/// category set reads, finds nothing to do, and writes nothing.
pub fn run<S: CategoryStore + ArticleStore>(store: &mut S, article_id: i64) -> Result<CmdResult> {
    let mut article = store.article(article_id)?;
    let (valid, dropped) = partition(store, &article.category_ids)?;

    let mut result = CmdResult::default();

    if valid != article.category_ids {
        warn!(
            "article {article_id} carried {} stale/duplicate category reference(s); repairing",
            article.category_ids.len() - valid.len()
        );
        article.category_ids = valid.clone();
        store.save_article(&article)?;
        result.repaired = true;
        if dropped.is_empty() {
            result.add_message(CmdMessage::warning(format!(
                "Collapsed duplicate category reference(s) on article {article_id}"
            )));
        } else {
            result.add_message(CmdMessage::warning(format!(
                "Dropped {} dangling category reference(s) from article {article_id}",
                dropped.len()
            )));
        }
    }

    result.valid_ids = valid;
    Ok(result)
}
