use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::cover_letter::CoverLetterGenerator;
use super::domain::{ApplicationStatus, JobPosting, PostingOutcome, RunReport, RunStats};
use super::evaluation::{Evaluation, MatchEngine, RoutingDecision};
use super::repository::{
    ApplicationLog, ApplicationLogError, ApplicationRecord, JobAlert, Notifier,
};

pub const DEFAULT_HIGH_MATCH_SCORE: u8 = 85;
const COVER_LETTER_SKILLS: usize = 4;

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_record_id(timestamp: &chrono::DateTime<Utc>) -> String {
    let sequence = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("APP_{}_{sequence:04}", timestamp.format("%Y%m%d%H%M%S"))
}

/// Pipeline tuning outside the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub high_match_score: u8,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            high_match_score: DEFAULT_HIGH_MATCH_SCORE,
        }
    }
}

/// Routes postings through the engine and dispatches logging and notifications.
pub struct JobPipeline<L, N> {
    engine: Arc<MatchEngine>,
    log: Arc<L>,
    notifier: Arc<N>,
    cover_letters: CoverLetterGenerator,
    options: PipelineOptions,
    admission: Mutex<()>,
}

impl<L, N> JobPipeline<L, N>
where
    L: ApplicationLog + 'static,
    N: Notifier + 'static,
{
    pub fn new(
        engine: Arc<MatchEngine>,
        log: Arc<L>,
        notifier: Arc<N>,
        options: PipelineOptions,
    ) -> Self {
        let cover_letters = CoverLetterGenerator::new(engine.profile().contact().clone());
        Self {
            engine,
            log,
            notifier,
            cover_letters,
            options,
            admission: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Scores a posting without touching the log or the notifier.
    pub fn evaluate(&self, posting: &JobPosting) -> Evaluation {
        self.engine
            .evaluate(&posting.title, posting.description.as_deref())
    }

    /// Evaluate one posting and perform the side effects its decision calls for.
    ///
    /// The duplicate check and the log append run under one admission lock, so concurrent
    /// callers never log the same URL twice. Alerts are sent after the lock is released and
    /// never change the outcome.
    pub fn process(&self, posting: &JobPosting) -> Result<PostingOutcome, PipelineError> {
        let outcome = {
            let _admission = self.admission.lock().map_err(|_| {
                ApplicationLogError::Unavailable("admission lock poisoned".to_string())
            })?;
            self.admit(posting)?
        };

        if let PostingOutcome::Applied { evaluation, .. } = &outcome {
            self.publish_best_effort(JobAlert::application_submitted(posting, evaluation));
            if evaluation.score >= self.options.high_match_score {
                self.publish_best_effort(JobAlert::high_match(posting, evaluation));
            }
        }

        Ok(outcome)
    }

    fn admit(&self, posting: &JobPosting) -> Result<PostingOutcome, PipelineError> {
        if let Some(url) = posting.listing_url() {
            if self.log.contains_url(url)? {
                debug!(%url, "posting already logged");
                return Ok(PostingOutcome::AlreadyLogged {
                    url: url.to_string(),
                });
            }
        }

        let evaluation = self.evaluate(posting);
        debug!(
            title = %posting.title,
            score = evaluation.score,
            decision = evaluation.decision.label(),
            "posting evaluated"
        );

        let outcome = match evaluation.decision {
            RoutingDecision::Exclude => {
                info!(
                    title = %posting.title,
                    reason = evaluation.exclusion_reason.as_deref().unwrap_or_default(),
                    "posting excluded"
                );
                PostingOutcome::Excluded { evaluation }
            }
            RoutingDecision::Skip => {
                info!(title = %posting.title, score = evaluation.score, "score too low");
                PostingOutcome::Skipped { evaluation }
            }
            RoutingDecision::Review => {
                let record_id = self.append(posting, &evaluation, ApplicationStatus::Review)?;
                info!(title = %posting.title, score = evaluation.score, "queued for manual review");
                PostingOutcome::QueuedForReview {
                    record_id,
                    evaluation,
                }
            }
            RoutingDecision::AutoApply => {
                let company = posting.company.as_deref().unwrap_or_default();
                let cover_letter = self.cover_letters.generate(
                    &posting.title,
                    company,
                    evaluation.top_skills(COVER_LETTER_SKILLS),
                );
                let record_id = self.append(posting, &evaluation, ApplicationStatus::Applied)?;
                info!(
                    title = %posting.title,
                    score = evaluation.score,
                    skills = %evaluation.top_skills(5).join(", "),
                    "application logged"
                );
                PostingOutcome::Applied {
                    record_id,
                    evaluation,
                    cover_letter,
                }
            }
        };

        Ok(outcome)
    }

    /// Process a batch. A failing posting is counted and reported, the rest still run.
    pub fn run(&self, postings: &[JobPosting]) -> RunReport {
        self.publish_best_effort(JobAlert::run_started());

        let mut stats = RunStats::default();
        let mut outcomes = Vec::with_capacity(postings.len());

        for posting in postings {
            stats.scanned += 1;
            match self.process(posting) {
                Ok(outcome) => {
                    stats.record(&outcome);
                    outcomes.push(outcome);
                }
                Err(err) => {
                    warn!(title = %posting.title, error = %err, "posting failed");
                    stats.errors += 1;
                    self.publish_best_effort(JobAlert::run_error(&err.to_string()));
                }
            }
        }

        info!(
            scanned = stats.scanned,
            applied = stats.applied,
            skipped = stats.skipped,
            errors = stats.errors,
            "run complete"
        );
        self.publish_best_effort(JobAlert::run_summary(&stats));

        RunReport { stats, outcomes }
    }

    pub fn recent_applications(
        &self,
        limit: usize,
    ) -> Result<Vec<ApplicationRecord>, PipelineError> {
        Ok(self.log.recent(limit)?)
    }

    fn append(
        &self,
        posting: &JobPosting,
        evaluation: &Evaluation,
        status: ApplicationStatus,
    ) -> Result<String, PipelineError> {
        let logged_at = Utc::now();
        let record_id = next_record_id(&logged_at);
        self.log.append(ApplicationRecord::from_evaluation(
            record_id.clone(),
            logged_at,
            posting,
            evaluation,
            status,
        ))?;
        Ok(record_id)
    }

    fn publish_best_effort(&self, alert: JobAlert) {
        let template = alert.template.clone();
        if let Err(err) = self.notifier.publish(alert) {
            warn!(%template, error = %err, "notification failed");
        }
    }
}

/// Error raised while recording a posting's outcome.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Log(#[from] ApplicationLogError),
}
