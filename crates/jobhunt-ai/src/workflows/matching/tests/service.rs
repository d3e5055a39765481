use std::sync::Arc;
use std::thread;

use super::common::*;
use crate::workflows::matching::domain::{ApplicationStatus, JobPosting, PostingOutcome};
use crate::workflows::matching::repository::{
    APPLICATION_SUBMITTED, HIGH_MATCH, RUN_ERROR, RUN_STARTED, RUN_SUMMARY,
};
use crate::workflows::matching::service::{JobPipeline, PipelineError, PipelineOptions};

#[test]
fn auto_apply_logs_record_and_notifies() {
    let (pipeline, log, notifier) = build_pipeline();

    let outcome = pipeline.process(&strong_posting()).expect("process succeeds");

    let (record_id, evaluation, cover_letter) = match outcome {
        PostingOutcome::Applied {
            record_id,
            evaluation,
            cover_letter,
        } => (record_id, evaluation, cover_letter),
        other => panic!("expected applied outcome, got {other:?}"),
    };
    assert!(record_id.starts_with("APP_"));
    assert_eq!(evaluation.score, 100);
    assert!(cover_letter.contains("Amazing Analytics Corp"));
    assert!(cover_letter.ends_with("Avery Quinn\nEmail: avery.quinn@example.com"));

    let records = log.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_id, record_id);
    assert_eq!(records[0].status, ApplicationStatus::Applied);
    assert_eq!(records[0].match_score, 100);
    assert!(records[0].matched_skills.starts_with("sql, excel"));

    assert_eq!(notifier.templates(), [APPLICATION_SUBMITTED, HIGH_MATCH]);
    let high_match = &notifier.alerts()[1];
    assert_eq!(high_match.details["salary"], "6-8 LPA");
    assert_eq!(high_match.details["match"], "100%");
}

#[test]
fn high_match_alert_respects_configured_threshold() {
    let log = Arc::new(MemoryLog::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let pipeline = JobPipeline::new(
        Arc::new(engine()),
        log,
        notifier.clone(),
        PipelineOptions {
            high_match_score: 95,
        },
    );
    let mut posting = strong_posting();
    posting.title = "MIS Analyst Reporting".to_string();
    posting.description = None;

    let outcome = pipeline.process(&posting).expect("process succeeds");

    assert!(matches!(outcome, PostingOutcome::Applied { .. }));
    assert_eq!(notifier.templates(), [APPLICATION_SUBMITTED]);
}

#[test]
fn review_decision_logs_without_notifying() {
    let (pipeline, log, notifier) = build_pipeline();

    let outcome = pipeline.process(&review_posting()).expect("process succeeds");

    assert!(matches!(outcome, PostingOutcome::QueuedForReview { .. }));
    let records = log.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ApplicationStatus::Review);
    assert_eq!(records[0].match_score, 62);
    assert!(notifier.templates().is_empty());
}

#[test]
fn excluded_and_skipped_postings_leave_no_trace() {
    let (pipeline, log, notifier) = build_pipeline();

    let excluded = pipeline
        .process(&excluded_posting())
        .expect("process succeeds");
    let skipped = pipeline
        .process(&JobPosting::new("Warehouse Associate"))
        .expect("process succeeds");

    assert!(matches!(excluded, PostingOutcome::Excluded { .. }));
    assert!(matches!(skipped, PostingOutcome::Skipped { .. }));
    assert!(log.records().is_empty());
    assert!(notifier.templates().is_empty());
}

#[test]
fn logged_url_is_not_processed_twice() {
    let (pipeline, log, notifier) = build_pipeline();
    let posting = strong_posting();

    pipeline.process(&posting).expect("first pass succeeds");
    let second = pipeline.process(&posting).expect("second pass succeeds");

    assert_eq!(
        second,
        PostingOutcome::AlreadyLogged {
            url: "https://jobs.example.com/postings/5".to_string()
        }
    );
    assert_eq!(log.records().len(), 1);
    assert_eq!(notifier.templates().len(), 2);
}

#[test]
fn run_reports_stats_and_brackets_with_alerts() {
    let (pipeline, log, notifier) = build_pipeline();

    let report = pipeline.run(&[strong_posting(), review_posting(), excluded_posting()]);

    assert_eq!(report.stats.scanned, 3);
    assert_eq!(report.stats.applied, 1);
    assert_eq!(report.stats.skipped, 2);
    assert_eq!(report.stats.errors, 0);
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(log.records().len(), 2);
    assert_eq!(
        notifier.templates(),
        [RUN_STARTED, APPLICATION_SUBMITTED, HIGH_MATCH, RUN_SUMMARY]
    );
    let summary = notifier.alerts().pop().expect("summary alert");
    assert_eq!(summary.details["applied"], "1");
    assert_eq!(summary.details["skipped"], "2");
}

#[test]
fn unavailable_log_counts_errors_and_keeps_running() {
    let notifier = Arc::new(MemoryNotifier::default());
    let pipeline = JobPipeline::new(
        Arc::new(engine()),
        Arc::new(UnavailableLog),
        notifier.clone(),
        PipelineOptions::default(),
    );

    let err = pipeline
        .process(&strong_posting())
        .expect_err("log unavailable");
    assert!(matches!(err, PipelineError::Log(_)));

    let report = pipeline.run(&[strong_posting(), review_posting()]);

    assert_eq!(report.stats.scanned, 2);
    assert_eq!(report.stats.errors, 2);
    assert!(report.outcomes.is_empty());
    assert_eq!(
        notifier.templates(),
        [RUN_STARTED, RUN_ERROR, RUN_ERROR, RUN_SUMMARY]
    );
    assert!(notifier.alerts()[1].details["error"].contains("sheet offline"));
}

#[test]
fn notifier_failure_keeps_the_application() {
    let log = Arc::new(MemoryLog::default());
    let offline = JobPipeline::new(
        Arc::new(engine()),
        log.clone(),
        Arc::new(OfflineNotifier),
        PipelineOptions::default(),
    );

    let report = offline.run(&[strong_posting(), review_posting(), excluded_posting()]);

    assert_eq!(report.stats.scanned, 3);
    assert_eq!(report.stats.applied, 1);
    assert_eq!(report.stats.skipped, 2);
    assert_eq!(report.stats.errors, 0);
    match &report.outcomes[0] {
        PostingOutcome::Applied { cover_letter, .. } => {
            assert!(cover_letter.contains("Amazing Analytics Corp"))
        }
        other => panic!("expected applied outcome, got {other:?}"),
    }
    assert_eq!(log.records().len(), 2);

    let notifier = Arc::new(MemoryNotifier::default());
    let online = JobPipeline::new(
        Arc::new(engine()),
        log,
        notifier.clone(),
        PipelineOptions::default(),
    );
    let retry = online.process(&strong_posting()).expect("process succeeds");
    assert!(matches!(retry, PostingOutcome::AlreadyLogged { .. }));
    assert!(notifier.templates().is_empty());
}

#[test]
fn padded_url_is_stored_trimmed_and_deduplicated() {
    let (pipeline, log, _notifier) = build_pipeline();
    let mut posting = strong_posting();
    posting.url = Some("  https://jobs.example.com/postings/5 \n".to_string());

    pipeline.process(&posting).expect("first pass succeeds");
    let second = pipeline.process(&posting).expect("second pass succeeds");

    assert_eq!(
        second,
        PostingOutcome::AlreadyLogged {
            url: "https://jobs.example.com/postings/5".to_string()
        }
    );
    let records = log.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "https://jobs.example.com/postings/5");
}

#[test]
fn concurrent_processing_logs_a_url_once() {
    let (pipeline, log, notifier) = build_pipeline();
    let posting = strong_posting();

    let outcomes: Vec<PostingOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| pipeline.process(&posting).expect("process succeeds")))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread completes"))
            .collect()
    });

    let applied = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, PostingOutcome::Applied { .. }))
        .count();
    assert_eq!(applied, 1);
    assert_eq!(log.records().len(), 1);
    assert_eq!(notifier.templates(), [APPLICATION_SUBMITTED, HIGH_MATCH]);
}

#[test]
fn recent_applications_are_newest_first() {
    let (pipeline, _log, _notifier) = build_pipeline();
    pipeline.run(&[strong_posting(), review_posting()]);

    let recent = pipeline.recent_applications(1).expect("log readable");

    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].title, "Data Scientist");
}

#[test]
fn pipeline_evaluate_has_no_side_effects() {
    let (pipeline, log, notifier) = build_pipeline();
    let posting = strong_posting();

    let evaluation = pipeline.evaluate(&posting);

    assert_eq!(
        evaluation,
        pipeline
            .engine()
            .evaluate(&posting.title, posting.description.as_deref())
    );
    assert!(log.records().is_empty());
    assert!(notifier.templates().is_empty());
}
