//! # API Facade
//!
//! [`TaxonomyApi`] is a thin facade over the command layer: one method per
//! operation, no business logic of its own, structured `Result` types out.
//! It is the single entry point an embedding application (HTTP handlers, a
//! CLI, a job runner) should go through.
//!
//! Generic over the store, so the same facade runs against
//! [`crate::store::fs::JsonFileStore`] in production and
//! [`crate::store::memory::InMemoryStore`] in tests.

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::CategoryId;
use crate::store::{ArticleStore, CategoryStore};

pub struct TaxonomyApi<S> {
    store: S,
}

impl<S: CategoryStore + ArticleStore> TaxonomyApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create_category(
        &mut self,
        name: &str,
        description: &str,
        parent_id: Option<CategoryId>,
    ) -> Result<CmdResult> {
        commands::create::run(&mut self.store, name, description, parent_id)
    }

    pub fn update_category(
        &mut self,
        id: CategoryId,
        name: &str,
        description: &str,
        new_parent_id: Option<CategoryId>,
    ) -> Result<CmdResult> {
        commands::update::run(&mut self.store, id, name, description, new_parent_id)
    }

    pub fn delete_category(&mut self, id: CategoryId) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn category(&self, id: CategoryId) -> Result<CmdResult> {
        commands::get::run_one(&self.store, id)
    }

    pub fn category_tree(&self) -> Result<CmdResult> {
        commands::get::run_tree(&self.store)
    }

    pub fn category_children(&self, id: CategoryId) -> Result<CmdResult> {
        commands::get::run_children(&self.store, id)
    }

    /// Reconcile one article's category references against the live
    /// category set; persists the cleaned list only when drift was found.
    pub fn repair_article(&mut self, article_id: i64) -> Result<CmdResult> {
        commands::repair::run(&mut self.store, article_id)
    }

    /// The raw repairer contract for callers that manage their own article
    /// rows: partition a reference list into survivors and a repaired flag.
    pub fn check_references(&self, ids: &[CategoryId]) -> Result<(Vec<CategoryId>, bool)> {
        let (valid, dropped) = commands::repair::partition(&self.store, ids)?;
        let was_repaired = !dropped.is_empty() || valid.len() != ids.len();
        Ok((valid, was_repaired))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn facade_dispatches_to_commands() {
        let mut api = TaxonomyApi::new(InMemoryStore::new());
        api.create_category("Tech", "", None).unwrap();
        api.create_category("Go", "", Some(1)).unwrap();

        let tree = api.category_tree().unwrap();
        assert_eq!(tree.listed.len(), 1);
        assert_eq!(tree.listed[0].children[0].id, 2);

        api.delete_category(1).unwrap();
        assert!(api.category_tree().unwrap().listed.is_empty());
    }

    #[test]
    fn check_references_reports_repair_flag() {
        let mut api = TaxonomyApi::new(InMemoryStore::new());
        api.create_category("Tech", "", None).unwrap();

        let (valid, repaired) = api.check_references(&[1, 9]).unwrap();
        assert_eq!(valid, vec![1]);
        assert!(repaired);

        let (valid, repaired) = api.check_references(&[1]).unwrap();
        assert_eq!(valid, vec![1]);
        assert!(!repaired);
    }
}
