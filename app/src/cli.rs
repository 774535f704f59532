use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ycs_core::config::{LabelAlignment, DEFAULT_GEMINI_BASE_URL, DEFAULT_YOUTUBE_BASE_URL};
use ycs_core::store::{COMMENTS_FILE, LABELED_FILE};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Alignment {
    Positional,
    ByIndex,
}

impl From<Alignment> for LabelAlignment {
    fn from(a: Alignment) -> Self {
        match a {
            Alignment::Positional => LabelAlignment::Positional,
            Alignment::ByIndex => LabelAlignment::ByIndex,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
    /// The labeled rows as CSV, for saving a copy elsewhere.
    Csv,
}

#[derive(Parser)]
#[command(
    name = "ycs",
    version,
    about = "Scrape YouTube comments and classify them as Good or Bad"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct YoutubeArgs {
    /// YouTube Data API key [env: YOUTUBE_API_KEY].
    #[arg(long)]
    pub youtube_api_key: Option<String>,
    /// YouTube Data API base URL.
    #[arg(long, default_value = DEFAULT_YOUTUBE_BASE_URL)]
    pub youtube_base_url: String,
}

#[derive(Args, Debug, Clone)]
pub struct OracleArgs {
    /// Gemini API key [env: GEMINI_API_KEY].
    #[arg(long)]
    pub gemini_api_key: Option<String>,
    /// Gemini API host.
    #[arg(long, default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,
    /// Model used for classification [env: YCS_GEMINI_MODEL, default: gemini-2.5-flash].
    #[arg(long)]
    pub model: Option<String>,
    /// Comments per classification request [env: YCS_BATCH_SIZE, default: 50].
    #[arg(long)]
    pub batch_size: Option<usize>,
    /// Language description inserted into the classification prompt [env: YCS_LANGUAGE_HINT].
    #[arg(long)]
    pub language_hint: Option<String>,
    /// How labels in the model response are matched to comments.
    #[arg(long, value_enum, default_value_t = Alignment::Positional)]
    pub alignment: Alignment,
    /// Verify the Gemini key with a cheap call before classifying.
    #[arg(long)]
    pub check: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Where to write the SVG bar chart (skipped when omitted).
    #[arg(long)]
    pub chart: Option<PathBuf>,
    /// Also print every labeled comment.
    #[arg(long)]
    pub show_rows: bool,
    /// Stdout format for the summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch top-level comments for a video and save them as CSV.
    Scrape {
        /// Video URL containing `v=<id>`.
        #[arg(long)]
        url: String,
        /// Number of comments to fetch.
        #[arg(long, default_value_t = 50)]
        count: usize,
        /// Output CSV (Author, Comment).
        #[arg(long, default_value = COMMENTS_FILE)]
        out: PathBuf,
        #[command(flatten)]
        youtube: YoutubeArgs,
    },
    /// Classify previously scraped comments and save the labeled CSV.
    Classify {
        /// Input CSV (Author, Comment).
        #[arg(long, default_value = COMMENTS_FILE)]
        input: PathBuf,
        /// Output CSV (Author, Comment, Sentiment).
        #[arg(long, default_value = LABELED_FILE)]
        out: PathBuf,
        #[command(flatten)]
        oracle: OracleArgs,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Summarize an existing labeled CSV.
    Summarize {
        /// Labeled CSV (Author, Comment, Sentiment).
        #[arg(long, default_value = LABELED_FILE)]
        input: PathBuf,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Scrape and classify in one go, writing both CSV files.
    Run {
        #[arg(long)]
        url: String,
        #[arg(long, default_value_t = 50)]
        count: usize,
        #[arg(long, default_value = COMMENTS_FILE)]
        comments_out: PathBuf,
        #[arg(long, default_value = LABELED_FILE)]
        out: PathBuf,
        #[command(flatten)]
        youtube: YoutubeArgs,
        #[command(flatten)]
        oracle: OracleArgs,
        #[command(flatten)]
        report: ReportArgs,
    },
}
