use serde::{Deserialize, Serialize};

use super::evaluation::Evaluation;

/// Job posting as produced by scrapers or alert-email parsers.
///
/// Only `title` and `description` feed the engine; the remaining fields are carried through
/// to the application log and notifications untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

impl JobPosting {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Posting URL when present and non-blank.
    pub fn listing_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Status written to the application log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Review,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Review => "Review",
        }
    }
}

/// What the pipeline did with one posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PostingOutcome {
    AlreadyLogged {
        url: String,
    },
    Excluded {
        evaluation: Evaluation,
    },
    Applied {
        record_id: String,
        evaluation: Evaluation,
        cover_letter: String,
    },
    QueuedForReview {
        record_id: String,
        evaluation: Evaluation,
    },
    Skipped {
        evaluation: Evaluation,
    },
}

impl PostingOutcome {
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            PostingOutcome::AlreadyLogged { .. } => None,
            PostingOutcome::Excluded { evaluation }
            | PostingOutcome::Applied { evaluation, .. }
            | PostingOutcome::QueuedForReview { evaluation, .. }
            | PostingOutcome::Skipped { evaluation } => Some(evaluation),
        }
    }
}

/// Counters for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub scanned: u32,
    pub applied: u32,
    pub skipped: u32,
    pub errors: u32,
}

impl RunStats {
    pub(crate) fn record(&mut self, outcome: &PostingOutcome) {
        match outcome {
            PostingOutcome::Applied { .. } => self.applied += 1,
            _ => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub stats: RunStats,
    pub outcomes: Vec<PostingOutcome>,
}
