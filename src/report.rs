//! Output of check results.
//!
//! Text mode prints the plugin line; JSON mode prints one object per target
//! carrying the verdict and, for listing checks, the collected document.

use serde::Serialize;

use crate::verdict::Verdict;

/// Output format for check results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Monitoring-plugin text line.
    #[default]
    Text,
    /// JSON for machine consumption.
    Json,
}

/// The outcome of one check against one target.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub target: String,
    pub check: String,
    #[serde(flatten)]
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Report {
    pub fn new(target: impl Into<String>, check: impl Into<String>, verdict: Verdict) -> Self {
        Report {
            target: target.into(),
            check: check.into(),
            verdict,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn exit_code(&self) -> i32 {
        self.verdict.exit_code()
    }

    /// Prints the report. `tagged` prefixes text lines with the target name.
    pub fn print(&self, format: OutputFormat, tagged: bool) {
        println!("{}", self.render(format, tagged));
    }

    pub fn render(&self, format: OutputFormat, tagged: bool) -> String {
        match format {
            OutputFormat::Text => self.render_text(tagged),
            OutputFormat::Json => self.render_json(),
        }
    }

    fn render_text(&self, tagged: bool) -> String {
        if tagged {
            format!("[{}] {}", self.target, self.verdict.to_plugin_line())
        } else {
            self.verdict.to_plugin_line()
        }
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            log::error!("Cannot serialize report for {}: {}", self.target, e);
            self.verdict.to_plugin_line()
        })
    }
}
