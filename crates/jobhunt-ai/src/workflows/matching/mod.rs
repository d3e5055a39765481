//! Job posting matching: scoring and routing engine plus the pipeline that acts on its
//! decisions (application log, notifications, cover letters).

pub mod cover_letter;
pub mod csv_log;
pub mod domain;
pub mod evaluation;
pub mod profile;
pub mod repository;
pub mod router;
pub mod service;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use cover_letter::CoverLetterGenerator;
pub use csv_log::CsvApplicationLog;
pub use domain::{ApplicationStatus, JobPosting, PostingOutcome, RunReport, RunStats};
pub use evaluation::{
    route, Evaluation, MatchEngine, RoutingDecision, RoutingThresholds, ScoreComponent,
    ScoreFactor,
};
pub use profile::{
    CandidateContact, CandidateProfile, MatchConfigError, MatchingSettings, ProfileSettings,
};
pub use repository::{
    AlertError, ApplicationLog, ApplicationLogError, ApplicationRecord, JobAlert, Notifier,
};
pub use router::matching_router;
pub use service::{JobPipeline, PipelineError, PipelineOptions, DEFAULT_HIGH_MATCH_SCORE};
pub use vocabulary::{SkillGroup, SkillSynonyms, SkillVocabulary};
