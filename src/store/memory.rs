use std::collections::BTreeMap;

use chrono::Utc;

use super::{ArticleStore, CategoryStore};
use crate::error::{Result, TaxaError};
use crate::model::{Article, Category, CategoryId, NewCategory};
use crate::path;

/// The row tables both bundled stores share. `BTreeMap` keeps scans in
/// ascending id order, which the store contract promises.
#[derive(Debug, Clone)]
pub(crate) struct Tables {
    pub(crate) categories: BTreeMap<CategoryId, Category>,
    pub(crate) articles: BTreeMap<i64, Article>,
    pub(crate) next_category_id: CategoryId,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            categories: BTreeMap::new(),
            articles: BTreeMap::new(),
            next_category_id: 1,
        }
    }
}

impl Tables {
    pub(crate) fn get(&self, id: CategoryId) -> Result<Category> {
        self.categories
            .get(&id)
            .filter(|row| row.is_active)
            .cloned()
            .ok_or(TaxaError::CategoryNotFound(id))
    }

    pub(crate) fn children_of(&self, parent: Option<CategoryId>) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .values()
            .filter(|row| row.is_active && row.parent_id == parent)
            .cloned()
            .collect())
    }

    pub(crate) fn by_subtree_prefix(&self, prefix: &str) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .values()
            .filter(|row| {
                row.is_active
                    && (path::is_under(&row.path, prefix)
                        || path::subtree_prefix(&row.path, row.id) == prefix)
            })
            .cloned()
            .collect())
    }

    pub(crate) fn all_active(&self) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .values()
            .filter(|row| row.is_active)
            .cloned()
            .collect())
    }

    pub(crate) fn insert(&mut self, new: NewCategory) -> Result<Category> {
        let now = Utc::now();
        let id = self.next_category_id;
        self.next_category_id += 1;

        let row = Category {
            id,
            name: new.name,
            description: new.description,
            parent_id: new.parent_id,
            path: new.path,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.categories.insert(id, row.clone());
        Ok(row)
    }

    pub(crate) fn replace(&mut self, category: &Category) -> Result<()> {
        let slot = self
            .categories
            .get_mut(&category.id)
            .ok_or(TaxaError::CategoryNotFound(category.id))?;
        *slot = Category {
            updated_at: Utc::now(),
            ..category.clone()
        };
        Ok(())
    }

    pub(crate) fn soft_delete_subtree(&mut self, id: CategoryId, prefix: &str) -> Result<()> {
        let now = Utc::now();
        for row in self.categories.values_mut() {
            if row.is_active && (row.id == id || path::is_under(&row.path, prefix)) {
                row.is_active = false;
                row.updated_at = now;
            }
        }
        Ok(())
    }

    pub(crate) fn article(&self, id: i64) -> Result<Article> {
        self.articles
            .get(&id)
            .filter(|row| row.is_active)
            .cloned()
            .ok_or(TaxaError::ArticleNotFound(id))
    }

    pub(crate) fn save_article(&mut self, article: &Article) -> Result<()> {
        self.articles.insert(
            article.id,
            Article {
                updated_at: Utc::now(),
                ..article.clone()
            },
        );
        Ok(())
    }
}

/// In-memory store for tests and ephemeral embedding.
///
/// Carries two test hooks: per-id write-failure injection on `replace` (so
/// partial-cascade handling can be exercised) and an article write counter
/// (so repair idempotence is observable).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Tables,
    fail_replace_for: Option<CategoryId>,
    article_saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `replace` of the given category id fail with a store
    /// error. `None` clears the injection.
    pub fn fail_replace_for(&mut self, id: Option<CategoryId>) {
        self.fail_replace_for = id;
    }

    /// How many article rows have been written since construction.
    pub fn article_save_count(&self) -> usize {
        self.article_saves
    }
}

impl CategoryStore for InMemoryStore {
    fn get(&self, id: CategoryId) -> Result<Category> {
        self.tables.get(id)
    }

    fn children_of(&self, parent: Option<CategoryId>) -> Result<Vec<Category>> {
        self.tables.children_of(parent)
    }

    fn by_subtree_prefix(&self, prefix: &str) -> Result<Vec<Category>> {
        self.tables.by_subtree_prefix(prefix)
    }

    fn all_active(&self) -> Result<Vec<Category>> {
        self.tables.all_active()
    }

    fn insert(&mut self, new: NewCategory) -> Result<Category> {
        self.tables.insert(new)
    }

    fn replace(&mut self, category: &Category) -> Result<()> {
        if self.fail_replace_for == Some(category.id) {
            return Err(TaxaError::Store(format!(
                "injected write failure for category {}",
                category.id
            )));
        }
        self.tables.replace(category)
    }

    fn soft_delete_subtree(&mut self, id: CategoryId, prefix: &str) -> Result<()> {
        self.tables.soft_delete_subtree(id, prefix)
    }
}

impl ArticleStore for InMemoryStore {
    fn article(&self, id: i64) -> Result<Article> {
        self.tables.article(id)
    }

    fn save_article(&mut self, article: &Article) -> Result<()> {
        self.article_saves += 1;
        self.tables.save_article(article)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::path::child_path;

    /// Builder over [`InMemoryStore`] for tests. Ids are store-assigned,
    /// starting at 1 and increasing in insertion order.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_root(mut self, name: &str) -> Self {
            self.store
                .insert(NewCategory {
                    name: name.to_string(),
                    description: String::new(),
                    parent_id: None,
                    path: String::new(),
                })
                .unwrap();
            self
        }

        pub fn with_child(mut self, name: &str, parent_id: CategoryId) -> Self {
            let parent = self.store.get(parent_id).unwrap();
            self.store
                .insert(NewCategory {
                    name: name.to_string(),
                    description: String::new(),
                    parent_id: Some(parent_id),
                    path: child_path(&parent.path, parent.id),
                })
                .unwrap();
            self
        }

        pub fn with_article(mut self, id: i64, category_ids: Vec<CategoryId>) -> Self {
            self.store
                .save_article(&Article {
                    id,
                    category_ids,
                    is_active: true,
                    updated_at: Utc::now(),
                })
                .unwrap();
            self
        }
    }
}
