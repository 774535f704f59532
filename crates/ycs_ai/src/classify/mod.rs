use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ycs_core::config::{
    Config, LabelAlignment, DEFAULT_BATCH_SIZE, DEFAULT_GEMINI_MODEL, DEFAULT_LANGUAGE_HINT,
};
use ycs_core::domain::{Dataset, LabeledDataset, Sentiment};
use ycs_core::error::{codes, AppError};

use crate::llm::Llm;

mod parse;
pub mod prompts;

pub use parse::{align_labels, scan_labels, AlignedLabels};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyOptions {
    pub model: String,
    pub batch_size: usize,
    pub language_hint: String,
    pub alignment: LabelAlignment,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            language_hint: DEFAULT_LANGUAGE_HINT.to_string(),
            alignment: LabelAlignment::default(),
        }
    }
}

impl ClassifyOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            model: cfg.oracle_model.clone(),
            batch_size: cfg.batch_size,
            language_hint: cfg.language_hint.clone(),
            alignment: cfg.label_alignment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// Every comment got a label from the response.
    Complete,
    /// The response labeled fewer comments than the batch held.
    Padded { missing: usize },
    /// The oracle call failed; the whole batch is Unknown.
    Failed { code: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub index: usize,
    pub size: usize,
    pub labeled: usize,
    /// Labels in the response that matched no comment.
    pub ignored: usize,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRun {
    pub labels: Vec<Sentiment>,
    pub batches: Vec<BatchReport>,
}

impl ClassificationRun {
    pub fn failed_batches(&self) -> usize {
        self.batches
            .iter()
            .filter(|b| matches!(b.outcome, BatchOutcome::Failed { .. }))
            .count()
    }
}

fn classify_batch<S: AsRef<str>>(
    llm: &dyn Llm,
    opts: &ClassifyOptions,
    index: usize,
    batch: &[S],
) -> (Vec<Sentiment>, BatchReport) {
    let prompt = prompts::sentiment_prompt(&opts.language_hint, batch);
    let size = batch.len();

    let response = llm.generate(&opts.model, &prompt).and_then(|text| {
        if text.trim().is_empty() {
            Err(AppError::new(
                codes::CLASSIFY_EMPTY_RESPONSE,
                "Oracle response was empty",
            ))
        } else {
            Ok(text)
        }
    });
    let response = match response {
        Ok(text) => text,
        Err(e) => {
            warn!(batch = index, size, code = %e.code, error = %e, "batch degraded to Unknown");
            return (
                vec![Sentiment::Unknown; size],
                BatchReport {
                    index,
                    size,
                    labeled: 0,
                    ignored: 0,
                    outcome: BatchOutcome::Failed { code: e.code },
                },
            );
        }
    };

    let AlignedLabels {
        labels,
        filled: labeled,
        ignored,
    } = align_labels(&response, size, opts.alignment);
    if ignored > 0 {
        warn!(batch = index, size, ignored, "oracle returned labels that match no comment");
    }
    let outcome = if labeled == size {
        BatchOutcome::Complete
    } else {
        warn!(batch = index, size, labeled, "oracle returned fewer labels than comments");
        BatchOutcome::Padded {
            missing: size - labeled,
        }
    };
    info!(batch = index, size, labeled, "classified batch");
    (
        labels,
        BatchReport {
            index,
            size,
            labeled,
            ignored,
            outcome,
        },
    )
}

/// Classify comments in contiguous batches of `opts.batch_size`, one oracle call per batch.
///
/// The result always has one label per input comment. Oracle failures degrade the affected
/// batch to Unknown instead of failing the run; only an invalid batch size is an error.
pub fn classify_with_report<S: AsRef<str>>(
    llm: &dyn Llm,
    opts: &ClassifyOptions,
    comments: &[S],
) -> Result<ClassificationRun, AppError> {
    if opts.batch_size == 0 {
        return Err(AppError::new(
            codes::CLASSIFY_INVALID_BATCH_SIZE,
            "Batch size must be at least 1",
        ));
    }

    let mut labels = Vec::with_capacity(comments.len());
    let mut batches = Vec::new();
    for (index, batch) in comments.chunks(opts.batch_size).enumerate() {
        let (batch_labels, report) = classify_batch(llm, opts, index, batch);
        labels.extend(batch_labels);
        batches.push(report);
    }

    Ok(ClassificationRun { labels, batches })
}

pub fn classify_comments<S: AsRef<str>>(
    llm: &dyn Llm,
    opts: &ClassifyOptions,
    comments: &[S],
) -> Result<Vec<Sentiment>, AppError> {
    classify_with_report(llm, opts, comments).map(|run| run.labels)
}

/// Classification stage of the pipeline: a fetched dataset in, a labeled dataset out.
pub fn classify_dataset(
    llm: &dyn Llm,
    opts: &ClassifyOptions,
    dataset: Dataset,
) -> Result<(LabeledDataset, Vec<BatchReport>), AppError> {
    let run = classify_with_report(llm, opts, &dataset.texts())?;
    if run.failed_batches() > 0 {
        warn!(
            failed = run.failed_batches(),
            total = run.batches.len(),
            "some batches could not be classified"
        );
    }
    let labeled = dataset.label(run.labels)?;
    Ok((labeled, run.batches))
}
