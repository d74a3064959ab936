//! Durable single-node store: two JSON files under a root directory,
//! loaded eagerly at open, flushed after every mutation with an atomic
//! tmp-then-rename write. The id sequence is recovered at open from the
//! highest stored id — rows are never hard-deleted, so ids are never reused.
//!
//! ```text
//! <root>/
//! ├── categories.json   # id -> Category
//! └── articles.json     # id -> Article
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::memory::Tables;
use super::{ArticleStore, CategoryStore};
use crate::error::Result;
use crate::model::{Article, Category, CategoryId, NewCategory};

const CATEGORIES_FILE: &str = "categories.json";
const ARTICLES_FILE: &str = "articles.json";

pub struct JsonFileStore {
    root: PathBuf,
    tables: Tables,
}

impl JsonFileStore {
    /// Open (or initialize) a store rooted at `root`. Creates the
    /// directory if needed; missing files mean empty tables.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let categories: BTreeMap<CategoryId, Category> = load_json(&root.join(CATEGORIES_FILE))?;
        let articles: BTreeMap<i64, Article> = load_json(&root.join(ARTICLES_FILE))?;
        let next_category_id = categories.keys().max().map_or(1, |max| max + 1);

        Ok(Self {
            root,
            tables: Tables {
                categories,
                articles,
                next_category_id,
            },
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn flush_categories(&self) -> Result<()> {
        write_json_atomic(&self.root, CATEGORIES_FILE, &self.tables.categories)
    }

    fn flush_articles(&self) -> Result<()> {
        write_json_atomic(&self.root, ARTICLES_FILE, &self.tables.articles)
    }
}

fn load_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json_atomic<T: Serialize>(root: &Path, name: &str, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    let tmp = root.join(format!(".{name}.tmp"));
    fs::write(&tmp, content)?;
    fs::rename(&tmp, root.join(name))?;
    Ok(())
}

impl CategoryStore for JsonFileStore {
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
        let row = self.tables.insert(new)?;
        self.flush_categories()?;
        Ok(row)
    }

    fn replace(&mut self, category: &Category) -> Result<()> {
        self.tables.replace(category)?;
        self.flush_categories()
    }

    fn soft_delete_subtree(&mut self, id: CategoryId, prefix: &str) -> Result<()> {
        self.tables.soft_delete_subtree(id, prefix)?;
        self.flush_categories()
    }
}

impl ArticleStore for JsonFileStore {
    fn article(&self, id: i64) -> Result<Article> {
        self.tables.article(id)
    }

    fn save_article(&mut self, article: &Article) -> Result<()> {
        self.tables.save_article(article)?;
        self.flush_articles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_category(name: &str, parent: Option<&Category>) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: String::new(),
            parent_id: parent.map(|p| p.id),
            path: parent.map_or(String::new(), |p| crate::path::child_path(&p.path, p.id)),
        }
    }

    #[test]
    fn open_on_empty_directory_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(store.all_active().unwrap().is_empty());
    }

    #[test]
    fn rows_survive_reopen_and_id_sequence_continues() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = JsonFileStore::open(dir.path()).unwrap();
            let root = store.insert(new_category("Tech", None)).unwrap();
            store.insert(new_category("Go", Some(&root))).unwrap();
        }

        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let active = store.all_active().unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[1].path, "/1");

        let next = store.insert(new_category("Life", None)).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn soft_delete_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = JsonFileStore::open(dir.path()).unwrap();
            let root = store.insert(new_category("Tech", None)).unwrap();
            store.insert(new_category("Go", Some(&root))).unwrap();
            store.soft_delete_subtree(root.id, &root.subtree_prefix()).unwrap();
        }

        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(store.all_active().unwrap().is_empty());
        // Retired rows are still on disk, so the id is not reused.
        let mut store = store;
        let fresh = store.insert(new_category("Life", None)).unwrap();
        assert_eq!(fresh.id, 3);
    }

    #[test]
    fn writes_land_in_named_files_not_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.insert(new_category("Tech", None)).unwrap();
        store
            .save_article(&Article {
                id: 1,
                category_ids: vec![1],
                is_active: true,
                updated_at: Utc::now(),
            })
            .unwrap();

        assert!(dir.path().join(CATEGORIES_FILE).exists());
        assert!(dir.path().join(ARTICLES_FILE).exists());
        assert!(!dir.path().join(".categories.json.tmp").exists());
    }

    #[test]
    fn articles_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = JsonFileStore::open(dir.path()).unwrap();
            store
                .save_article(&Article {
                    id: 7,
                    category_ids: vec![3, 1],
                    is_active: true,
                    updated_at: Utc::now(),
                })
                .unwrap();
        }

        let store = JsonFileStore::open(dir.path()).unwrap();
        let article = store.article(7).unwrap();
        assert_eq!(article.category_ids, vec![3, 1]);
    }
}
