/// Configuration resolution module
///
/// This module handles:
/// - Merging CLI flags with GitHub Actions `INPUT_*` variables
/// - Reporting which required input is missing
///
/// Inputs are read once at start-up. Each report path asks only for the
/// inputs it needs, so a missing token does not block the job summary.
use crate::cli::CliArgs;
use crate::error::{ReportError, Result};
use log::debug;

/// A named action input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Token,
    Title,
    ProfileTitle,
}

impl Input {
    /// Name as declared in the action metadata
    pub fn name(&self) -> &'static str {
        match self {
            Input::Token => "token",
            Input::Title => "title",
            Input::ProfileTitle => "profileTitle",
        }
    }

    /// `INPUT_<NAME>` as set by the Actions runner
    pub fn env_var(&self) -> String {
        format!("INPUT_{}", self.name().replace(' ', "_").to_uppercase())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportConfig {
    pub token: Option<String>,
    pub title: Option<String>,
    pub profile_title: Option<String>,
}

impl ReportConfig {
    /// Resolve from CLI args, falling back to the process environment
    pub fn from_args(args: &CliArgs) -> Self {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve from CLI args, falling back to `lookup` for `INPUT_*` variables
    pub fn resolve<F>(args: &CliArgs, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: &Option<String>, input: Input| {
            let value = flag.clone().or_else(|| lookup(&input.env_var()));
            let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
            debug!("input {}: {}", input.name(), if value.is_some() { "set" } else { "not set" });
            value
        };

        ReportConfig {
            token: pick(&args.token, Input::Token),
            title: pick(&args.title, Input::Title),
            profile_title: pick(&args.profile_title, Input::ProfileTitle),
        }
    }

    /// Value of a required input
    pub fn require(&self, input: Input) -> Result<&str> {
        let value = match input {
            Input::Token => &self.token,
            Input::Title => &self.title,
            Input::ProfileTitle => &self.profile_title,
        };
        value
            .as_deref()
            .ok_or_else(|| ReportError::MissingContext(format!("Input required and not supplied: {}", input.name())))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
