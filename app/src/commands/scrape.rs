use std::path::Path;

use anyhow::Result;
use ycs_core::config::Config;
use ycs_youtube::api::youtube_data::YoutubeDataApi;
use ycs_youtube::fetch::scrape_to_file;

pub fn run(cfg: &Config, url: &str, count: usize, out: &Path) -> Result<()> {
    let api = YoutubeDataApi::from_config(cfg)?;
    let dataset = scrape_to_file(&api, url, count, out)?;
    println!(
        "Extracted {} comments and saved to {}",
        dataset.len(),
        out.display()
    );
    Ok(())
}
