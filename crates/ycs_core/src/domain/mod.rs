use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{codes, AppError};

mod video;

pub use video::VideoId;

/// Binary sentiment label with a sentinel for comments the oracle did not label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Good,
    Bad,
    Unknown,
}

impl Sentiment {
    /// Fixed display order used by summaries and charts.
    pub const ALL: [Sentiment; 3] = [Sentiment::Good, Sentiment::Bad, Sentiment::Unknown];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Good => "Good",
            Sentiment::Bad => "Bad",
            Sentiment::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim();
        if v.eq_ignore_ascii_case("good") {
            Ok(Sentiment::Good)
        } else if v.eq_ignore_ascii_case("bad") {
            Ok(Sentiment::Bad)
        } else if v.eq_ignore_ascii_case("unknown") {
            Ok(Sentiment::Unknown)
        } else {
            Err(
                AppError::new(codes::STORE_INVALID_SENTIMENT, "Unrecognized sentiment label")
                    .with_details(format!("value={s}")),
            )
        }
    }
}

/// A top-level comment as returned by the comment-listing API.
///
/// `text` is kept byte-for-byte as delivered (code-mixed and mixed-script text included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
}

impl Comment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledComment {
    pub author: String,
    pub text: String,
    pub sentiment: Sentiment,
}

impl LabeledComment {
    pub fn new(comment: Comment, sentiment: Sentiment) -> Self {
        Self {
            author: comment.author,
            text: comment.text,
            sentiment,
        }
    }
}

/// Output of the acquisition stage and input of the classification stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub video_id: Option<VideoId>,
    pub comments: Vec<Comment>,
}

impl Dataset {
    pub fn new(video_id: Option<VideoId>, comments: Vec<Comment>) -> Self {
        Self { video_id, comments }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.comments.iter().map(|c| c.text.as_str()).collect()
    }

    /// Attach one label per comment, in order.
    pub fn label(self, labels: Vec<Sentiment>) -> Result<LabeledDataset, AppError> {
        if labels.len() != self.comments.len() {
            return Err(AppError::new(
                codes::CLASSIFY_LABEL_COUNT_MISMATCH,
                "Label count does not match comment count",
            )
            .with_details(format!(
                "comments={} labels={}",
                self.comments.len(),
                labels.len()
            )));
        }
        let rows = self
            .comments
            .into_iter()
            .zip(labels)
            .map(|(c, s)| LabeledComment::new(c, s))
            .collect();
        Ok(LabeledDataset { rows })
    }
}

/// Output of the classification stage and input of the summary stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledDataset {
    pub rows: Vec<LabeledComment>,
}

impl LabeledDataset {
    pub fn new(rows: Vec<LabeledComment>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
