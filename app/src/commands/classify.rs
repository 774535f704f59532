use std::path::Path;

use anyhow::Result;
use tracing::info;
use ycs_ai::classify::{classify_dataset, ClassifyOptions};
use ycs_ai::gemini::GeminiClient;
use ycs_ai::llm::gemini_llm::GeminiLlm;
use ycs_core::config::Config;
use ycs_core::domain::{Dataset, LabeledDataset};
use ycs_core::store::{load_comments, save_labeled};

use super::report;
use crate::cli::ReportArgs;

/// Classify an in-memory dataset and persist the labeled rows to `out`.
pub(crate) fn classify_and_save(
    cfg: &Config,
    client: GeminiClient,
    check: bool,
    dataset: Dataset,
    out: &Path,
) -> Result<LabeledDataset> {
    if check {
        client.health_check()?;
        info!("gemini key verified");
    }
    let llm = GeminiLlm::new(client);
    let opts = ClassifyOptions::from_config(cfg);

    let (labeled, batches) = classify_dataset(&llm, &opts, dataset)?;
    info!(rows = labeled.len(), batches = batches.len(), "classification completed");
    save_labeled(out, &labeled.rows)?;
    Ok(labeled)
}

pub fn run(cfg: &Config, check: bool, input: &Path, out: &Path, args: &ReportArgs) -> Result<()> {
    let client = GeminiClient::from_config(cfg)?;
    let comments = load_comments(input)?;
    info!(path = %input.display(), rows = comments.len(), "loaded comments");
    let labeled = classify_and_save(cfg, client, check, Dataset::new(None, comments), out)?;
    report::emit(&labeled, args)
}
