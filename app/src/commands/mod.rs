mod classify;
mod report;
mod run;
mod scrape;
mod summarize;

use anyhow::Result;
use ycs_core::config::{
    Config, ENV_BATCH_SIZE, ENV_GEMINI_API_KEY, ENV_GEMINI_MODEL, ENV_LANGUAGE_HINT,
    ENV_YOUTUBE_API_KEY,
};
use ycs_core::error::AppError;

use crate::cli::{Cli, Commands, OracleArgs, YoutubeArgs};

/// Assemble the configuration handed to each component.
///
/// Values come from flags first, then `env`. Only the credentials of the services the
/// command talks to are required.
fn build_config<E>(
    youtube: Option<&YoutubeArgs>,
    oracle: Option<&OracleArgs>,
    env: E,
) -> Result<Config, AppError>
where
    E: Fn(&str) -> Option<String>,
{
    let mut flags: Vec<(&str, String)> = Vec::new();
    let mut required: Vec<&str> = Vec::new();
    if let Some(y) = youtube {
        required.push(ENV_YOUTUBE_API_KEY);
        if let Some(key) = &y.youtube_api_key {
            flags.push((ENV_YOUTUBE_API_KEY, key.clone()));
        }
    }
    if let Some(o) = oracle {
        required.push(ENV_GEMINI_API_KEY);
        if let Some(key) = &o.gemini_api_key {
            flags.push((ENV_GEMINI_API_KEY, key.clone()));
        }
        if let Some(model) = &o.model {
            flags.push((ENV_GEMINI_MODEL, model.clone()));
        }
        if let Some(size) = o.batch_size {
            flags.push((ENV_BATCH_SIZE, size.to_string()));
        }
        if let Some(hint) = &o.language_hint {
            flags.push((ENV_LANGUAGE_HINT, hint.clone()));
        }
    }

    let lookup = |name: &str| {
        flags
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.clone())
            .or_else(|| env(name))
    };
    let mut cfg = Config::from_lookup_requiring(lookup, &required)?;

    if let Some(y) = youtube {
        cfg.youtube_base_url = y.youtube_base_url.clone();
    }
    if let Some(o) = oracle {
        cfg.oracle_base_url = o.gemini_base_url.clone();
        cfg.label_alignment = o.alignment.into();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scrape {
            url,
            count,
            out,
            youtube,
        } => {
            let cfg = build_config(Some(&youtube), None, process_env)?;
            scrape::run(&cfg, &url, count, &out)
        }
        Commands::Classify {
            input,
            out,
            oracle,
            report,
        } => {
            let cfg = build_config(None, Some(&oracle), process_env)?;
            classify::run(&cfg, oracle.check, &input, &out, &report)
        }
        Commands::Summarize { input, report } => summarize::run(&input, &report),
        Commands::Run {
            url,
            count,
            comments_out,
            out,
            youtube,
            oracle,
            report,
        } => {
            let cfg = build_config(Some(&youtube), Some(&oracle), process_env)?;
            run::run(&cfg, oracle.check, &url, count, &comments_out, &out, &report)
        }
    }
}
