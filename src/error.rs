use crate::model::CategoryId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxaError {
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("Parent category not found: {0}")]
    ParentNotFound(CategoryId),

    #[error("Article not found: {0}")]
    ArticleNotFound(i64),

    #[error("Invalid category name: {0}")]
    InvalidName(String),

    #[error("Re-parenting category {id} under {parent} would create a cycle")]
    InvalidReference { id: CategoryId, parent: CategoryId },

    /// A descendant write failed mid-cascade. The root node's own write
    /// already succeeded, so the subtree is partially rewritten; re-running
    /// the same update re-walks it and converges.
    #[error("Cascade stopped at category {failed} after {updated} row(s) were rewritten")]
    PartialCascade { updated: usize, failed: CategoryId },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, TaxaError>;
