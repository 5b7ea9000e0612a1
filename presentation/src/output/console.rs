//! Console output formatter for catalogs and outcomes

use bridge_domain::{Mode, Outcome, ToolListing};
use colored::Colorize;

/// Formats catalog listings and call outcomes for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Human-readable listing, one tool per line with the first doc line
    pub fn format_listing(listing: &[ToolListing]) -> String {
        if listing.is_empty() {
            return format!("{}\n", "No tools discovered.".yellow());
        }

        let width = listing.iter().map(|t| t.tool_name.len()).max().unwrap_or(0);
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Tools ({})", listing.len())));
        for tool in listing {
            let mode = match tool.mode {
                Mode::Read => "read ".green(),
                Mode::Write => "write".red().bold(),
            };
            let summary = tool
                .doc
                .as_deref()
                .and_then(|doc| doc.lines().next())
                .unwrap_or("");
            output.push_str(&format!(
                "  [{}] {:<width$}  {}\n",
                mode,
                tool.tool_name.cyan(),
                summary.dimmed(),
                width = width
            ));
        }

        output
    }

    /// Listing as a JSON array of `{tool_name, doc, mode}`
    pub fn format_listing_json(listing: &[ToolListing]) -> String {
        serde_json::to_string_pretty(listing).unwrap_or_else(|_| "[]".to_string())
    }

    /// Outcome wire shape, pretty-printed
    pub fn format_outcome(outcome: &Outcome) -> String {
        serde_json::to_string_pretty(&outcome.to_json()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Error for a tool name missing from the catalog
    pub fn format_unknown_tool<'a>(tool: &str, available: impl IntoIterator<Item = &'a str>) -> String {
        let available: Vec<&str> = available.into_iter().collect();
        let mut output = format!("{} unknown tool '{}'\n", "Error:".red().bold(), tool);
        if available.is_empty() {
            output.push_str("No tools are available.\n");
        } else {
            output.push_str(&format!("Available tools: {}\n", available.join(", ")));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{}\n{}\n", line.cyan(), title.cyan().bold(), line.cyan())
    }
}
