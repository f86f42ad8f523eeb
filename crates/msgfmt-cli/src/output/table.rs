//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Check results for a single message.
pub struct MessageSummary {
    /// Message name as it appears in the catalog.
    pub name: String,
    pub selectors: usize,
    pub variants: usize,
    pub arguments: Vec<String>,
    pub warnings: usize,
}

/// Format check results as an ASCII table.
pub fn format_summary_table(summaries: &[MessageSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Message", "Selectors", "Variants", "Arguments", "Warnings"]);

    for summary in summaries {
        table.add_row(vec![
            summary.name.clone(),
            summary.selectors.to_string(),
            summary.variants.to_string(),
            summary.arguments.join(", "),
            summary.warnings.to_string(),
        ]);
    }

    table
}
