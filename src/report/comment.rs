//! Pull request comment report.
//!
//! Failures only: a passing run removes the previous comment instead of
//! posting a new one. This module never talks to GitHub; it describes the
//! action and leaves execution to the comment adapter.

use super::format::{compact_message, truncate};
use super::table::Table;
use crate::context::RunContext;
use crate::types::{Example, RspecResult};

/// Maximum example rows in the comment table
pub const MAX_TABLE_ROWS: usize = 20;

/// Maximum message length (UTF-16 units) before truncation
pub const MAX_MESSAGE_LENGTH: usize = 200;

pub const FAILURE_ICON: &str = ":x:";

/// What should happen to the marked pull request comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAction {
    /// Remove a prior comment starting with `marker`, if any
    Delete { marker: String },
    /// Replace the prior comment starting with `marker`, or create one
    Upsert { marker: String, body: String },
}

impl CommentAction {
    pub fn marker(&self) -> &str {
        match self {
            CommentAction::Delete { marker } | CommentAction::Upsert { marker, .. } => marker,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            CommentAction::Delete { .. } => None,
            CommentAction::Upsert { body, .. } => Some(body),
        }
    }
}

/// Decide the comment action for a run
pub fn build_comment(result: &RspecResult, title: &str, ctx: &RunContext) -> CommentAction {
    if result.success {
        return CommentAction::Delete { marker: title.to_string() };
    }

    let body = format!(
        "# {} {}\n<details>\n<summary>{}</summary>\n\n{}\n\n</details>\n",
        title,
        FAILURE_ICON,
        result.summary,
        examples_table(&result.examples, ctx).to_markdown(Some(MAX_TABLE_ROWS))
    );

    CommentAction::Upsert { marker: title.to_string(), body }
}

/// Failure table with linked locations and compacted messages
pub fn examples_table(examples: &[Example], ctx: &RunContext) -> Table {
    let mut table = Table::new(&["Example", "Description", "Message"]);
    for example in examples {
        table.push_row(vec![
            format!(
                "[{}:{}]({})",
                example.file_path,
                example.line_number,
                ctx.example_url(&example.file_path, example.line_number)
            ),
            example.description.clone(),
            compact_message(&truncate(&example.message, MAX_MESSAGE_LENGTH)),
        ]);
    }
    table
}
