use serde::{Deserialize, Serialize};

use crate::domain::{LabeledComment, Sentiment};
use crate::error::{codes, AppError};

mod chart;

pub use chart::render_bar_chart_svg;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub sentiment: Sentiment,
    pub count: usize,
    pub percentage: f64,
}

/// Label distribution over a labeled dataset.
///
/// Entries follow `Sentiment::ALL` order and only include labels that occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub total: usize,
    pub entries: Vec<SummaryEntry>,
}

impl SentimentSummary {
    pub fn percentage(&self, sentiment: Sentiment) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.sentiment == sentiment)
            .map(|e| e.percentage)
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.entries
            .iter()
            .find(|e| e.sentiment == sentiment)
            .map(|e| e.count)
            .unwrap_or(0)
    }
}

pub fn summarize(rows: &[LabeledComment]) -> Result<SentimentSummary, AppError> {
    if rows.is_empty() {
        return Err(AppError::new(
            codes::SUMMARY_EMPTY_DATASET,
            "Cannot summarize an empty dataset",
        ));
    }
    let total = rows.len();
    let entries = Sentiment::ALL
        .iter()
        .filter_map(|&sentiment| {
            let count = rows.iter().filter(|r| r.sentiment == sentiment).count();
            (count > 0).then(|| SummaryEntry {
                sentiment,
                count,
                percentage: count as f64 * 100.0 / total as f64,
            })
        })
        .collect();
    Ok(SentimentSummary { total, entries })
}

fn escape_cell(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

/// Markdown table of the labeled rows (Author | Comment | Sentiment).
pub fn render_markdown_table(rows: &[LabeledComment]) -> String {
    let mut out = String::new();
    out.push_str("| # | Author | Comment | Sentiment |\n");
    out.push_str("|---:|---|---|---|\n");
    for (idx, r) in rows.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            idx + 1,
            escape_cell(&r.author),
            escape_cell(&r.text),
            r.sentiment
        ));
    }
    out
}

pub fn render_summary_markdown(summary: &SentimentSummary) -> String {
    let mut out = String::new();
    out.push_str("| Sentiment | Count | Percentage |\n");
    out.push_str("|---|---:|---:|\n");
    for e in &summary.entries {
        out.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            e.sentiment, e.count, e.percentage
        ));
    }
    out.push_str(&format!("\nTotal comments: **{}**\n", summary.total));
    out
}
