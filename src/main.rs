// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod config;
mod context;
mod error;
mod github;
mod report;
mod step_summary;
mod types;
mod ui;

use config::{Input, ReportConfig};
use context::RunContext;
use error::Result;
use log::info;
use report::{SummaryTitles, build_comment, build_summary};
use step_summary::SummaryWriter;
use types::RspecResult;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    let result = match RspecResult::load(&args.result) {
        Ok(r) => r,
        Err(e) => {
            ui::print_error(&format!("Failed to load {}: {}", args.result.display(), e));
            std::process::exit(1);
        }
    };

    let mut ctx = match RunContext::from_env() {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };
    if let Some(ref api_url) = args.api_url {
        ctx.api_url = api_url.trim_end_matches('/').to_string();
    }

    let config = ReportConfig::from_args(&args);

    // The two paths are independent: a failed comment must not hide the summary
    let mut failed = false;

    if args.skip_comment {
        ui::print_warning("skipping pull request comment");
    } else if let Err(e) = run_comment_report(&result, &config, &ctx, args.dry_run) {
        ui::print_error(&format!("Pull request comment failed: {}", e));
        failed = true;
    }

    if args.skip_summary {
        ui::print_warning("skipping job summary");
    } else if let Err(e) = run_summary_report(&result, &config, &ctx, &args) {
        ui::print_error(&format!("Job summary failed: {}", e));
        failed = true;
    }

    std::process::exit(if failed { 1 } else { 0 });
}

/// Create, replace or delete the marked pull request comment
fn run_comment_report(result: &RspecResult, config: &ReportConfig, ctx: &RunContext, dry_run: bool) -> Result<()> {
    let title = config.require(Input::Title)?;
    let action = build_comment(result, title, ctx);

    if dry_run {
        match action.body() {
            Some(body) => println!("{}", body),
            None => ui::status(&format!("would delete the comment marked '{}'", action.marker())),
        }
        return Ok(());
    }

    let token = config.require(Input::Token)?;
    let client = github::GithubCommentClient::new(ctx, token)?;
    let outcome = github::apply_action(&client, &action)?;
    ui::status(&outcome.describe());
    Ok(())
}

/// Write the examples table and slowest-examples profile to the job summary
fn run_summary_report(result: &RspecResult, config: &ReportConfig, ctx: &RunContext, args: &cli::CliArgs) -> Result<()> {
    let titles = SummaryTitles { main: config.require(Input::Title)?, profile: config.require(Input::ProfileTitle)? };
    let document = build_summary(result, titles, ctx);

    if args.dry_run {
        let stdout = std::io::stdout();
        SummaryWriter::new(stdout.lock()).publish(&document)?;
        return Ok(());
    }

    let mut writer = match args.summary_path {
        Some(ref path) => SummaryWriter::append_to(path)?,
        None => SummaryWriter::from_env()?,
    };
    writer.publish(&document)?;
    info!("job summary written");
    Ok(())
}
