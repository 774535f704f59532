use std::fs;

use anyhow::{Context, Result};
use tracing::info;
use ycs_core::domain::LabeledDataset;
use ycs_core::store::labeled_csv_string;
use ycs_core::summary::{
    render_bar_chart_svg, render_markdown_table, render_summary_markdown, summarize,
};

use crate::cli::{OutputFormat, ReportArgs};

/// Print the summary (and optionally the rows) and write the chart if requested.
pub fn emit(labeled: &LabeledDataset, args: &ReportArgs) -> Result<()> {
    let summary = summarize(&labeled.rows)?;

    match args.format {
        OutputFormat::Markdown => {
            if args.show_rows {
                println!("{}", render_markdown_table(&labeled.rows));
            }
            println!("{}", render_summary_markdown(&summary));
        }
        OutputFormat::Json => {
            let value = if args.show_rows {
                serde_json::json!({ "summary": summary, "rows": labeled.rows })
            } else {
                serde_json::json!({ "summary": summary })
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => print!("{}", labeled_csv_string(&labeled.rows)?),
    }

    if let Some(path) = &args.chart {
        fs::write(path, render_bar_chart_svg(&summary))
            .with_context(|| format!("failed to write chart to {}", path.display()))?;
        info!(path = %path.display(), "wrote sentiment chart");
    }
    Ok(())
}
