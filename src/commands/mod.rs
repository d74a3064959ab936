//! # Command Layer
//!
//! The business logic of the taxonomy: one submodule per operation, each a
//! `run` function over the store traits. Commands orchestrate reads,
//! path computation ([`crate::path`]), tree assembly ([`crate::tree`]), and
//! writes; they hold no state and assume nothing about transport.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `affected`: subtrees the operation touched (the created leaf, the
//!   re-pathed subtree, the pre-delete snapshot of what was removed)
//! - `listed`: subtrees a read produced
//! - `valid_ids` / `repaired`: the repair operation's report
//! - `messages`: leveled messages for the embedding layer to render
//!
//! ## Mutation Guarantees
//!
//! `create` fails without writing anything. `update` writes the node first
//! and then cascades path rewrites depth-first; a failed descendant write
//! surfaces as [`crate::TaxaError::PartialCascade`] with the subtree
//! partially rewritten (re-running the same update converges, every cascade
//! write being an idempotent full-row replace). `delete` snapshots the
//! subtree, then retires it in a single bulk store call.
//!
//! ## Testing
//!
//! The lion's share of testing lives here, against
//! [`crate::store::memory::InMemoryStore`].

use serde::Serialize;

use crate::model::CategoryId;
use crate::tree::CategoryNode;

pub mod create;
pub mod delete;
pub mod get;
pub mod repair;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Subtrees the operation modified (or, for delete, removed).
    pub affected: Vec<CategoryNode>,
    /// Subtrees a read operation produced.
    pub listed: Vec<CategoryNode>,
    /// Surviving category references after a repair.
    pub valid_ids: Vec<CategoryId>,
    /// Whether a repair rewrote the article row.
    pub repaired: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}
