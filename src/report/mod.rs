//! Report generation - pure transformations from a run result to markdown.
//!
//! This module handles:
//! - Message truncation and flattening for table cells
//! - Markdown table rendering with an optional row cap
//! - The pull request comment action (upsert or delete)
//! - The job summary document (examples plus slowest-examples profile)
//!
//! Nothing here performs I/O; see the `github` and `step_summary` modules
//! for publishing.
//!
//! # Module Organization
//!
//! - `format` - Truncation, message flattening, floor rounding
//! - `table` - Table model and markdown rendering
//! - `comment` - Pull request comment builder
//! - `summary` - Job summary builder

mod comment;
mod format;
mod summary;
mod table;

pub use comment::{CommentAction, build_comment};
pub use summary::{SummaryBlock, SummaryDocument, SummarySection, SummaryTitles, build_summary};
pub use table::Table;
