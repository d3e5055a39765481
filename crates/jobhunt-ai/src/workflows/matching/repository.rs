use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationStatus, JobPosting, RunStats};
use super::evaluation::Evaluation;

/// One row of the application log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(rename = "Application ID")]
    pub record_id: String,
    #[serde(rename = "Logged At")]
    pub logged_at: DateTime<Utc>,
    #[serde(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Salary")]
    pub salary: String,
    #[serde(rename = "Match Score")]
    pub match_score: u8,
    #[serde(rename = "Status")]
    pub status: ApplicationStatus,
    #[serde(rename = "Matched Skills")]
    pub matched_skills: String,
}

impl ApplicationRecord {
    pub fn from_evaluation(
        record_id: String,
        logged_at: DateTime<Utc>,
        posting: &JobPosting,
        evaluation: &Evaluation,
        status: ApplicationStatus,
    ) -> Self {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            record_id,
            logged_at,
            platform: field(&posting.platform),
            title: posting.title.clone(),
            company: field(&posting.company),
            url: posting.listing_url().unwrap_or_default().to_string(),
            location: field(&posting.location),
            salary: field(&posting.salary),
            match_score: evaluation.score,
            status,
            matched_skills: evaluation.skills_summary(),
        }
    }
}

/// Storage seam for logged applications (spreadsheet, CSV file, memory).
pub trait ApplicationLog: Send + Sync {
    fn append(&self, record: ApplicationRecord) -> Result<(), ApplicationLogError>;
    fn contains_url(&self, url: &str) -> Result<bool, ApplicationLogError>;
    fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, ApplicationLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationLogError {
    #[error("application log io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("application log is malformed: {0}")]
    Csv(#[from] csv::Error),
    #[error("application log unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook (chat bots, e-mail, logs).
pub trait Notifier: Send + Sync {
    fn publish(&self, alert: JobAlert) -> Result<(), AlertError>;
}

pub const RUN_STARTED: &str = "run_started";
pub const APPLICATION_SUBMITTED: &str = "application_submitted";
pub const HIGH_MATCH: &str = "high_match";
pub const RUN_SUMMARY: &str = "run_summary";
pub const RUN_ERROR: &str = "run_error";

/// Notification payload; `details` keeps rendering decisions with the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAlert {
    pub template: String,
    pub details: BTreeMap<String, String>,
}

impl JobAlert {
    pub fn run_started() -> Self {
        Self {
            template: RUN_STARTED.to_string(),
            details: BTreeMap::new(),
        }
    }

    pub fn application_submitted(posting: &JobPosting, evaluation: &Evaluation) -> Self {
        let mut details = posting_details(posting, evaluation);
        details.insert("location".to_string(), display(&posting.location));
        details.insert("platform".to_string(), display(&posting.platform));
        Self {
            template: APPLICATION_SUBMITTED.to_string(),
            details,
        }
    }

    pub fn high_match(posting: &JobPosting, evaluation: &Evaluation) -> Self {
        let mut details = posting_details(posting, evaluation);
        details.insert(
            "salary".to_string(),
            posting
                .salary
                .clone()
                .unwrap_or_else(|| "Not disclosed".to_string()),
        );
        details.insert("url".to_string(), posting.url.clone().unwrap_or_default());
        Self {
            template: HIGH_MATCH.to_string(),
            details,
        }
    }

    pub fn run_summary(stats: &RunStats) -> Self {
        let details = BTreeMap::from([
            ("scanned".to_string(), stats.scanned.to_string()),
            ("applied".to_string(), stats.applied.to_string()),
            ("skipped".to_string(), stats.skipped.to_string()),
            ("errors".to_string(), stats.errors.to_string()),
        ]);
        Self {
            template: RUN_SUMMARY.to_string(),
            details,
        }
    }

    pub fn run_error(message: &str) -> Self {
        let message: String = message.chars().take(200).collect();
        Self {
            template: RUN_ERROR.to_string(),
            details: BTreeMap::from([("error".to_string(), message)]),
        }
    }

    /// Plain-text rendering for chat transports.
    pub fn render(&self) -> String {
        let heading = match self.template.as_str() {
            RUN_STARTED => "Job automation started",
            APPLICATION_SUBMITTED => "Application submitted",
            HIGH_MATCH => "High match found",
            RUN_SUMMARY => "Run summary",
            RUN_ERROR => "Error occurred",
            other => other,
        };
        let mut lines = vec![heading.to_string()];
        lines.extend(
            self.details
                .iter()
                .map(|(key, value)| format!("{key}: {value}")),
        );
        lines.join("\n")
    }
}

fn posting_details(posting: &JobPosting, evaluation: &Evaluation) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("title".to_string(), posting.title.clone()),
        ("company".to_string(), display(&posting.company)),
        ("match".to_string(), format!("{}%", evaluation.score)),
    ])
}

fn display(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
