use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "rspec-report")]
#[command(about = "Report RSpec results as a pull request comment and a job summary")]
#[command(version)]
pub struct CliArgs {
    /// JSON result file produced by the RSpec result parser
    #[arg(long, short = 'r', value_name = "PATH")]
    pub result: PathBuf,

    /// Token used to create, replace and delete the pull request comment
    /// (falls back to INPUT_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Comment heading and marker, also the job summary heading (falls back to INPUT_TITLE)
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Heading of the slowest-examples profile (falls back to INPUT_PROFILETITLE)
    #[arg(long, value_name = "TITLE")]
    pub profile_title: Option<String>,

    /// Do not touch the pull request comment
    #[arg(long)]
    pub skip_comment: bool,

    /// Do not write the job summary
    #[arg(long)]
    pub skip_summary: bool,

    /// Print both reports to stdout instead of publishing them
    #[arg(long)]
    pub dry_run: bool,

    /// GitHub API base URL (default: GITHUB_API_URL or https://api.github.com)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Job summary file (default: GITHUB_STEP_SUMMARY)
    #[arg(long, value_name = "PATH")]
    pub summary_path: Option<PathBuf>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.skip_comment && self.skip_summary {
            return Err("Cannot specify both --skip-comment and --skip-summary: nothing to report".to_string());
        }

        if !self.result.exists() {
            return Err(format!("Result file {} does not exist", self.result.display()));
        }

        if self.dry_run && self.summary_path.is_some() {
            return Err("--summary-path has no effect with --dry-run".to_string());
        }

        Ok(())
    }
}
