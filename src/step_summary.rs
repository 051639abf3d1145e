/// Job summary writer
///
/// Buffers summary directives, renders them as the GitHub Actions
/// toolkit does (HTML headings, `<br>`, HTML tables) and appends the
/// buffer to the step summary file on each `write()`.
use crate::error::{ReportError, Result};
use crate::report::{SummaryBlock, SummaryDocument, SummarySection, Table};
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

pub const SUMMARY_ENV_VAR: &str = "GITHUB_STEP_SUMMARY";

pub struct SummaryWriter<W: Write> {
    sink: W,
    buffer: String,
}

impl SummaryWriter<File> {
    /// Open the summary file named by `GITHUB_STEP_SUMMARY` for appending
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(SUMMARY_ENV_VAR)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ReportError::MissingContext(format!("{} is not set", SUMMARY_ENV_VAR)))?;
        Self::append_to(Path::new(&path))
    }

    pub fn append_to(path: &Path) -> Result<Self> {
        debug!("appending job summary to {}", path.display());
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, buffer: String::new() }
    }

    /// `<hN>text</hN>`, level clamped to 1..=6
    pub fn add_heading(&mut self, text: &str, level: u8) -> &mut Self {
        let level = level.clamp(1, 6);
        self.buffer.push_str(&format!("<h{level}>{text}</h{level}>\n"));
        self
    }

    pub fn add_raw(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(text);
        self
    }

    pub fn add_break(&mut self) -> &mut Self {
        self.buffer.push_str("<br>\n");
        self
    }

    pub fn add_table(&mut self, table: &Table) -> &mut Self {
        let mut html = String::from("<table>");
        html.push_str(&html_row(&table.header, "th"));
        for row in &table.rows {
            html.push_str(&html_row(row, "td"));
        }
        html.push_str("</table>\n");
        self.buffer.push_str(&html);
        self
    }

    pub fn add_block(&mut self, block: &SummaryBlock) -> &mut Self {
        match block {
            SummaryBlock::Heading { text, level } => self.add_heading(text, *level),
            SummaryBlock::Raw(text) => self.add_raw(text),
            SummaryBlock::Break => self.add_break(),
            SummaryBlock::Table(table) => self.add_table(table),
        }
    }

    /// Currently buffered, unwritten output
    #[cfg(test)]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Flush the buffer to the sink and clear it
    pub fn write(&mut self) -> Result<()> {
        self.sink.write_all(self.buffer.as_bytes())?;
        self.sink.flush()?;
        debug!("wrote {} bytes of job summary", self.buffer.len());
        self.buffer.clear();
        Ok(())
    }

    /// Buffer and write one section
    pub fn write_section(&mut self, section: &SummarySection) -> Result<()> {
        for block in &section.blocks {
            self.add_block(block);
        }
        self.write()
    }

    /// Write every section of the document, one flush per section
    pub fn publish(&mut self, document: &SummaryDocument) -> Result<()> {
        for section in document.sections() {
            self.write_section(section)?;
        }
        info!("job summary published");
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.sink
    }
}

fn html_row(cells: &[String], tag: &str) -> String {
    let cells: String = cells.iter().map(|c| format!("<{tag}>{c}</{tag}>")).collect();
    format!("<tr>{cells}</tr>")
}
