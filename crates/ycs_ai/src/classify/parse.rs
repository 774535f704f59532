use std::sync::OnceLock;

use regex::Regex;
use ycs_core::config::LabelAlignment;
use ycs_core::domain::Sentiment;

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)\.\s*(good|bad)").expect("static regex"))
}

/// `(declared index, label)` for every line carrying a label, in scan order.
///
/// Only the first match on a line counts. Indices that overflow `usize` are reported as 0.
pub fn scan_labels(response: &str) -> Vec<(usize, Sentiment)> {
    response
        .lines()
        .filter_map(|line| {
            let caps = label_re().captures(line)?;
            let index = caps[1].parse::<usize>().unwrap_or(0);
            let label = if caps[2].eq_ignore_ascii_case("good") {
                Sentiment::Good
            } else {
                Sentiment::Bad
            };
            Some((index, label))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedLabels {
    /// Exactly one label per comment in the batch.
    pub labels: Vec<Sentiment>,
    /// Slots filled from the response; the rest are Unknown.
    pub filled: usize,
    /// Scanned labels that were dropped: surplus, out of range or duplicate.
    pub ignored: usize,
}

/// Map a free-text oracle response onto exactly `batch_len` labels.
pub fn align_labels(response: &str, batch_len: usize, alignment: LabelAlignment) -> AlignedLabels {
    let scanned = scan_labels(response);
    let found = scanned.len();
    let mut out = vec![Sentiment::Unknown; batch_len];
    let mut filled = 0usize;

    match alignment {
        LabelAlignment::Positional => {
            for (slot, (_, label)) in out.iter_mut().zip(scanned) {
                *slot = label;
                filled += 1;
            }
        }
        LabelAlignment::ByIndex => {
            let mut seen = vec![false; batch_len];
            for (index, label) in scanned {
                if index == 0 || index > batch_len || seen[index - 1] {
                    continue;
                }
                seen[index - 1] = true;
                out[index - 1] = label;
                filled += 1;
            }
        }
    }

    AlignedLabels {
        labels: out,
        filled,
        ignored: found - filled,
    }
}
