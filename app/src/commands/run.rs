use std::path::Path;

use anyhow::Result;
use ycs_ai::gemini::GeminiClient;
use ycs_core::config::Config;
use ycs_youtube::api::youtube_data::YoutubeDataApi;
use ycs_youtube::fetch::scrape_to_file;

use super::{classify, report};
use crate::cli::ReportArgs;

pub fn run(
    cfg: &Config,
    check: bool,
    url: &str,
    count: usize,
    comments_out: &Path,
    out: &Path,
    args: &ReportArgs,
) -> Result<()> {
    // Both clients are built before any request so bad settings cost no comment API quota.
    let client = GeminiClient::from_config(cfg)?;
    let api = YoutubeDataApi::from_config(cfg)?;

    let dataset = scrape_to_file(&api, url, count, comments_out)?;
    let labeled = classify::classify_and_save(cfg, client, check, dataset, out)?;
    report::emit(&labeled, args)
}
