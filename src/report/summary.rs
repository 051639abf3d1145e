//! Job summary report.
//!
//! Always emitted, pass or fail: the full example list followed by the
//! slowest-examples profile. Each section is flushed separately by the
//! summary writer.

use super::format::{collapsible_message, floor, format_number};
use super::table::Table;
use crate::context::RunContext;
use crate::types::RspecResult;

pub const SUCCESS_ICON: &str = ":tada:";
pub const FAILURE_ICON: &str = ":cold_sweat:";

/// One job summary directive
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryBlock {
    Heading { text: String, level: u8 },
    Raw(String),
    Break,
    Table(Table),
}

/// Blocks flushed together in one write
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummarySection {
    pub blocks: Vec<SummaryBlock>,
}

impl SummarySection {
    fn heading(mut self, text: &str, level: u8) -> Self {
        self.blocks.push(SummaryBlock::Heading { text: text.to_string(), level });
        self
    }

    fn raw(mut self, text: String) -> Self {
        self.blocks.push(SummaryBlock::Raw(text));
        self
    }

    fn line_break(mut self) -> Self {
        self.blocks.push(SummaryBlock::Break);
        self
    }

    fn table(mut self, table: Table) -> Self {
        self.blocks.push(SummaryBlock::Table(table));
        self
    }

    /// First table in the section, if any
    #[cfg(test)]
    pub fn first_table(&self) -> Option<&Table> {
        self.blocks.iter().find_map(|b| match b {
            SummaryBlock::Table(t) => Some(t),
            _ => None,
        })
    }
}

/// Main report followed by the profile report
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryDocument {
    pub main: SummarySection,
    pub profile: SummarySection,
}

impl SummaryDocument {
    /// Sections in flush order
    pub fn sections(&self) -> [&SummarySection; 2] {
        [&self.main, &self.profile]
    }
}

/// Headings of the two summary sections
#[derive(Debug, Clone, Copy)]
pub struct SummaryTitles<'a> {
    pub main: &'a str,
    pub profile: &'a str,
}

/// Build the job summary for a run
pub fn build_summary(result: &RspecResult, titles: SummaryTitles<'_>, ctx: &RunContext) -> SummaryDocument {
    let icon = if result.success { SUCCESS_ICON } else { FAILURE_ICON };

    let mut examples = Table::new(&["Example", "Description", "Message"]);
    for example in &result.examples {
        examples.push_row(vec![
            linked_location(ctx, &example.file_path, example.line_number),
            example.description.clone(),
            collapsible_message(&example.message),
        ]);
    }

    let mut slowest = Table::new(&["Example", "Description", "Time in seconds"]);
    for slow in &result.slow_examples {
        slowest.push_row(vec![
            linked_location(ctx, &slow.file_path, slow.line_number),
            slow.description.clone(),
            format_number(floor(slow.run_time, 5)),
        ]);
    }

    let main = SummarySection::default()
        .heading(titles.main, 1)
        .raw(format!("{} {}", icon, result.summary))
        .line_break()
        .table(examples);

    let profile = SummarySection::default()
        .heading(titles.profile, 1)
        .raw(slowest_examples_headline(result))
        .table(slowest);

    SummaryDocument { main, profile }
}

/// "Top N slowest examples (X seconds, Y% of total time)"
pub fn slowest_examples_headline(result: &RspecResult) -> String {
    let slow_total = result.slow_total_time();
    let percentage = slow_time_percentage(slow_total, result.total_time);
    format!(
        "Top {} slowest examples ({} seconds, {}% of total time)",
        result.slow_examples.len(),
        format_number(floor(slow_total, 2)),
        format_number(floor(percentage, 2))
    )
}

/// Share of the total run time spent in `slow_total`, in percent.
///
/// A zero total time yields 0 rather than NaN.
pub fn slow_time_percentage(slow_total: f64, total_time: f64) -> f64 {
    if total_time > 0.0 { 100.0 * slow_total / total_time } else { 0.0 }
}

// Blank lines let GitHub render the markdown link inside an HTML cell
fn linked_location(ctx: &RunContext, file_path: &str, line_number: u32) -> String {
    format!("\n\n[{}:{}]({})", file_path, line_number, ctx.example_url(file_path, line_number))
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod summary_test;
