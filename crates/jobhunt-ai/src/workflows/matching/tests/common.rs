use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::matching::domain::JobPosting;
use crate::workflows::matching::evaluation::MatchEngine;
use crate::workflows::matching::profile::{CandidateContact, CandidateProfile, ProfileSettings};
use crate::workflows::matching::repository::{
    AlertError, ApplicationLog, ApplicationLogError, ApplicationRecord, JobAlert, Notifier,
};
use crate::workflows::matching::service::{JobPipeline, PipelineOptions};
use crate::workflows::matching::vocabulary::SkillVocabulary;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn profile_settings() -> ProfileSettings {
    ProfileSettings {
        skills: strings(&[
            "sql",
            "excel",
            "tableau",
            "power bi",
            "python",
            "r",
            "data visualization",
            "statistics",
            "eda",
        ]),
        target_roles: strings(&["junior data analyst", "jr data analyst"]),
        exclusion_keywords: strings(&["customer service", "telecaller", "bpo", "call center"]),
        candidate: CandidateContact {
            name: Some("Avery Quinn".to_string()),
            email: Some("avery.quinn@example.com".to_string()),
            phone: None,
            linkedin: None,
        },
        ..ProfileSettings::default()
    }
}

pub(super) fn profile() -> CandidateProfile {
    CandidateProfile::from_settings(profile_settings()).expect("test profile is valid")
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::new(profile(), SkillVocabulary::standard())
}

pub(super) fn strong_posting() -> JobPosting {
    JobPosting {
        title: "Junior Data Analyst - SQL Excel Python Tableau".to_string(),
        description: Some(
            "SQL, Excel, Tableau, Power BI, Python, R, EDA, Statistics, Data Visualization"
                .to_string(),
        ),
        company: Some("Amazing Analytics Corp".to_string()),
        location: Some("Bengaluru".to_string()),
        url: Some("https://jobs.example.com/postings/5".to_string()),
        salary: Some("6-8 LPA".to_string()),
        platform: Some("Test".to_string()),
    }
}

pub(super) fn review_posting() -> JobPosting {
    JobPosting {
        title: "Data Scientist".to_string(),
        company: Some("DataDriven Inc".to_string()),
        location: Some("Remote".to_string()),
        url: Some("https://jobs.example.com/postings/2".to_string()),
        platform: Some("Test".to_string()),
        ..JobPosting::default()
    }
}

pub(super) fn excluded_posting() -> JobPosting {
    JobPosting {
        title: "Customer Service Representative".to_string(),
        company: Some("Support Co".to_string()),
        url: Some("https://jobs.example.com/postings/3".to_string()),
        platform: Some("Test".to_string()),
        ..JobPosting::default()
    }
}

#[derive(Default)]
pub(super) struct MemoryLog {
    records: Mutex<Vec<ApplicationRecord>>,
}

impl MemoryLog {
    pub(super) fn records(&self) -> Vec<ApplicationRecord> {
        self.records.lock().expect("log mutex poisoned").clone()
    }
}

impl ApplicationLog for MemoryLog {
    fn append(&self, record: ApplicationRecord) -> Result<(), ApplicationLogError> {
        self.records
            .lock()
            .expect("log mutex poisoned")
            .push(record);
        Ok(())
    }

    fn contains_url(&self, url: &str) -> Result<bool, ApplicationLogError> {
        Ok(self
            .records
            .lock()
            .expect("log mutex poisoned")
            .iter()
            .any(|record| record.url == url))
    }

    fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, ApplicationLogError> {
        Ok(self
            .records
            .lock()
            .expect("log mutex poisoned")
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableLog;

impl ApplicationLog for UnavailableLog {
    fn append(&self, _record: ApplicationRecord) -> Result<(), ApplicationLogError> {
        Err(ApplicationLogError::Unavailable("sheet offline".to_string()))
    }

    fn contains_url(&self, _url: &str) -> Result<bool, ApplicationLogError> {
        Err(ApplicationLogError::Unavailable("sheet offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, ApplicationLogError> {
        Err(ApplicationLogError::Unavailable("sheet offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    alerts: Mutex<Vec<JobAlert>>,
}

impl MemoryNotifier {
    pub(super) fn templates(&self) -> Vec<String> {
        self.alerts
            .lock()
            .expect("notifier mutex poisoned")
            .iter()
            .map(|alert| alert.template.clone())
            .collect()
    }

    pub(super) fn alerts(&self) -> Vec<JobAlert> {
        self.alerts.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn publish(&self, alert: JobAlert) -> Result<(), AlertError> {
        self.alerts
            .lock()
            .expect("notifier mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl Notifier for OfflineNotifier {
    fn publish(&self, _alert: JobAlert) -> Result<(), AlertError> {
        Err(AlertError::Transport("chat api offline".to_string()))
    }
}

pub(super) fn build_pipeline() -> (
    JobPipeline<MemoryLog, MemoryNotifier>,
    Arc<MemoryLog>,
    Arc<MemoryNotifier>,
) {
    let log = Arc::new(MemoryLog::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let pipeline = JobPipeline::new(
        Arc::new(engine()),
        log.clone(),
        notifier.clone(),
        PipelineOptions::default(),
    );
    (pipeline, log, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json body")
}
