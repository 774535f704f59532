use std::cell::{Cell, RefCell};

use pretty_assertions::assert_eq;
use ycs_ai::classify::{
    classify_comments, classify_dataset, classify_with_report, BatchOutcome, ClassifyOptions,
};
use ycs_ai::llm::Llm;
use ycs_core::config::LabelAlignment;
use ycs_core::domain::Sentiment::{self, Bad, Good, Unknown};
use ycs_core::domain::{Comment, Dataset};
use ycs_core::error::AppError;

/// Labels every comment in the prompt, alternating Good/Bad by position.
struct EchoLlm {
    calls: Cell<usize>,
}

impl EchoLlm {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

fn numbered_comment_count(prompt: &str) -> usize {
    let block = prompt
        .split("Comments:\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\nReturn format:").next())
        .unwrap_or("");
    block.lines().filter(|l| !l.is_empty()).count()
}

impl Llm for EchoLlm {
    fn generate(&self, _model: &str, prompt: &str) -> Result<String, AppError> {
        self.calls.set(self.calls.get() + 1);
        let n = numbered_comment_count(prompt);
        Ok((1..=n)
            .map(|i| format!("{i}. {}", if i % 2 == 1 { "Good" } else { "Bad" }))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Replays canned responses in order and records prompts.
struct ScriptedLlm {
    responses: RefCell<Vec<Result<String, AppError>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedLlm {
    fn new(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().rev().collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl Llm for ScriptedLlm {
    fn generate(&self, _model: &str, prompt: &str) -> Result<String, AppError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

fn opts(batch_size: usize) -> ClassifyOptions {
    ClassifyOptions {
        batch_size,
        ..ClassifyOptions::default()
    }
}

fn comments(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("comment {i}")).collect()
}

#[test]
fn output_length_always_matches_input() {
    for n in [0usize, 1, 2, 49, 50, 51, 137] {
        for batch_size in [1usize, 3, 50, 200] {
            let llm = EchoLlm::new();
            let labels = classify_comments(&llm, &opts(batch_size), &comments(n)).expect("classify");
            assert_eq!(labels.len(), n, "n={n} batch_size={batch_size}");
            assert_eq!(llm.calls.get(), (n + batch_size - 1) / batch_size);
        }
    }
}

#[test]
fn labels_are_merged_in_original_order() {
    let llm = EchoLlm::new();
    let labels = classify_comments(&llm, &opts(3), &comments(7)).expect("classify");
    // Each batch restarts numbering at 1.
    assert_eq!(labels, vec![Good, Bad, Good, Good, Bad, Good, Good]);
}

#[test]
fn zero_parseable_labels_make_the_batch_unknown() {
    let llm = ScriptedLlm::new(vec![
        Ok("1. Good\n2. Bad".to_string()),
        Ok("I cannot classify these comments.".to_string()),
    ]);
    let run = classify_with_report(&llm, &opts(2), &comments(4)).expect("classify");

    assert_eq!(run.labels, vec![Good, Bad, Unknown, Unknown]);
    assert_eq!(run.batches[0].outcome, BatchOutcome::Complete);
    assert_eq!(run.batches[1].outcome, BatchOutcome::Padded { missing: 2 });
}

#[test]
fn short_response_is_padded_within_its_batch() {
    let llm = ScriptedLlm::new(vec![
        Ok("1. Bad".to_string()),
        Ok("1. Good\n2. Good\n3. Good".to_string()),
    ]);
    let labels = classify_comments(&llm, &opts(3), &comments(6)).expect("classify");
    assert_eq!(labels, vec![Bad, Unknown, Unknown, Good, Good, Good]);
}

#[test]
fn surplus_labels_are_dropped_and_counted() {
    let llm = ScriptedLlm::new(vec![
        Ok("1. Good\n2. Bad\n3. Bad\n4. Good".to_string()),
        Ok("1. Bad".to_string()),
    ]);
    let run = classify_with_report(&llm, &opts(2), &comments(3)).expect("classify");

    assert_eq!(run.labels, vec![Good, Bad, Bad]);
    assert_eq!(run.batches[0].outcome, BatchOutcome::Complete);
    assert_eq!(run.batches[0].labeled, 2);
    assert_eq!(run.batches[0].ignored, 2);
    assert_eq!(run.batches[1].ignored, 0);
}

#[test]
fn oracle_failure_degrades_only_that_batch() {
    let llm = ScriptedLlm::new(vec![
        Ok("1. Good\n2. Good".to_string()),
        Err(AppError::new("CLASSIFY_FAILED", "quota exceeded")),
        Ok("1. Bad".to_string()),
    ]);
    let run = classify_with_report(&llm, &opts(2), &comments(5)).expect("classify");

    assert_eq!(run.labels, vec![Good, Good, Unknown, Unknown, Bad]);
    assert_eq!(run.failed_batches(), 1);
    assert_eq!(
        run.batches[1].outcome,
        BatchOutcome::Failed {
            code: "CLASSIFY_FAILED".to_string()
        }
    );
}

#[test]
fn empty_response_counts_as_failure() {
    let llm = ScriptedLlm::new(vec![Ok("   \n".to_string())]);
    let run = classify_with_report(&llm, &opts(10), &comments(2)).expect("classify");
    assert_eq!(run.labels, vec![Unknown, Unknown]);
    assert_eq!(
        run.batches[0].outcome,
        BatchOutcome::Failed {
            code: "CLASSIFY_EMPTY_RESPONSE".to_string()
        }
    );
}

#[test]
fn zero_batch_size_is_rejected_before_any_call() {
    let llm = EchoLlm::new();
    let err = classify_comments(&llm, &opts(0), &comments(3)).expect_err("invalid");
    assert_eq!(err.code, "CLASSIFY_INVALID_BATCH_SIZE");
    assert_eq!(llm.calls.get(), 0);
}

#[test]
fn by_index_alignment_rekeys_out_of_order_responses() {
    let llm = ScriptedLlm::new(vec![Ok("2. Bad\n1. Good".to_string())]);
    let options = ClassifyOptions {
        alignment: LabelAlignment::ByIndex,
        ..opts(3)
    };
    let labels = classify_comments(&llm, &options, &comments(3)).expect("classify");
    assert_eq!(labels, vec![Good, Bad, Unknown]);
}

#[test]
fn comment_text_reaches_the_oracle_unaltered() {
    let text = "Mawa idi <b>mass</b> 🔥\nసూపర్ &amp; next";
    let llm = ScriptedLlm::new(vec![Ok("1. Good".to_string())]);
    classify_comments(&llm, &opts(50), &[text]).expect("classify");
    assert!(llm.prompts.borrow()[0].contains(text));
}

#[test]
fn dataset_stage_keeps_authors_and_order() {
    let dataset = Dataset::new(
        None,
        vec![
            Comment::new("@a", "nice"),
            Comment::new("@b", "trash"),
            Comment::new("@c", "ok"),
        ],
    );
    let llm = ScriptedLlm::new(vec![Ok("1. Good\n2. Bad\n3. Good".to_string())]);
    let (labeled, batches) = classify_dataset(&llm, &opts(50), dataset).expect("classify");

    let got: Vec<(&str, Sentiment)> = labeled
        .rows
        .iter()
        .map(|r| (r.author.as_str(), r.sentiment))
        .collect();
    assert_eq!(got, vec![("@a", Good), ("@b", Bad), ("@c", Good)]);
    assert_eq!(batches.len(), 1);
}
