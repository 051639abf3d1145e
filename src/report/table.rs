//! Table model shared by both reports.
//!
//! The comment renders it as a GitHub markdown table, the job summary
//! hands the rows to the summary writer which emits HTML.

/// Header row plus data rows, in input order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column labels
    pub fn new<S: AsRef<str>>(header: &[S]) -> Self {
        Self { header: header.iter().map(|h| h.as_ref().to_string()).collect(), rows: Vec::new() }
    }

    /// Append a data row
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Render as a markdown table.
    ///
    /// With `cap`, only the first `cap` data rows are rendered; omitted rows
    /// are not announced.
    pub fn to_markdown(&self, cap: Option<usize>) -> String {
        let limit = cap.unwrap_or(self.rows.len());
        let mut lines = Vec::with_capacity(limit.min(self.rows.len()) + 2);

        lines.push(markdown_row(&self.header));
        lines.push(format!("|{}|", self.header.iter().map(|_| " --- ").collect::<Vec<_>>().join("|")));
        for row in self.rows.iter().take(limit) {
            lines.push(markdown_row(row));
        }

        lines.join("\n")
    }
}

fn markdown_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| escape_pipe(c)).collect();
    format!("| {} |", cells.join(" | "))
}

fn escape_pipe(s: &str) -> String {
    s.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rows: usize) -> Table {
        let mut table = Table::new(&["Example", "Description"]);
        for i in 0..rows {
            table.push_row(vec![format!("spec/{}_spec.rb", i), format!("case {}", i)]);
        }
        table
    }

    #[test]
    fn test_markdown_header_and_delimiter() {
        let out = sample(1).to_markdown(None);
        assert_eq!(out, "| Example | Description |\n| --- | --- |\n| spec/0_spec.rb | case 0 |");
    }

    #[test]
    fn test_markdown_without_rows() {
        let out = sample(0).to_markdown(Some(20));
        assert_eq!(out, "| Example | Description |\n| --- | --- |");
    }

    #[test]
    fn test_cap_keeps_first_rows_in_order() {
        let out = sample(50).to_markdown(Some(20));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[2], "| spec/0_spec.rb | case 0 |");
        assert_eq!(lines[21], "| spec/19_spec.rb | case 19 |");
        assert!(!out.contains("case 20"));
    }

    #[test]
    fn test_no_cap_renders_everything() {
        let out = sample(50).to_markdown(None);
        assert_eq!(out.lines().count(), 52);
    }

    #[test]
    fn test_pipes_are_escaped() {
        let mut table = Table::new(&["A"]);
        table.push_row(vec!["x | y".to_string()]);
        assert!(table.to_markdown(None).ends_with("| x \\| y |"));
    }
}
