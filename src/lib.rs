//! # Taxa Architecture
//!
//! Taxa is the **category taxonomy core** of a blog backend. It owns the one
//! part of such a backend with a real invariant: a self-referencing category
//! tree stored as flat rows with a materialized ancestry path, kept
//! consistent under re-parenting and retirement, plus the lazy repair that
//! keeps article→category references honest as categories disappear.
//!
//! This is a library, not a service. HTTP routing, auth, and wire formats
//! live in whatever application embeds it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, one method per operation                    │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Create / Update / Delete orchestration and cascades      │
//! │  - Tree reads, article reference repair                     │
//! │  - No I/O assumptions, no transport concerns                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CategoryStore + ArticleStore traits                      │
//! │  - JsonFileStore (durable), InMemoryStore (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! `path.rs` and `tree.rs` sit beside the layers: pure, deterministic
//! functions with no I/O. Every cascade and every prefix scan is expressed
//! through them so the path convention lives in exactly one place.
//!
//! ## The Path Convention
//!
//! A category's `path` encodes its *ancestors*, never itself:
//!
//! ```text
//! Tech (id 1)                 path = ""
//! └── Go (id 2)               path = "/1"
//!     └── Concurrency (id 3)  path = "/1/2"
//! ```
//!
//! The subtree of a node is everything whose path starts with
//! `path + "/" + id` (segment-delimited, so id 1 never captures id 12),
//! plus the node itself. See [`path`] for the details.
//!
//! ## Key Principle: Reads Rebuild, Writes Cascade
//!
//! There is no persistent in-memory tree. Every tree read scans the active
//! rows and links them in memory ([`tree::build_forest`]); every structural
//! write walks the affected subtree and rewrites stored paths row by row.
//! Cascades are sequences of idempotent single-row writes: a re-run after a
//! partial failure converges to the same end state.

pub mod api;
pub mod commands;
pub mod error;
pub mod model;
pub mod path;
pub mod store;
pub mod tree;

pub use api::TaxonomyApi;
pub use error::{Result, TaxaError};
pub use model::{Article, Category, CategoryId, NewCategory};
pub use tree::CategoryNode;
