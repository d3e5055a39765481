use jobhunt_ai::config::{ConfigError, MatchingConfig};
use jobhunt_ai::workflows::matching::{
    AlertError, ApplicationLog, ApplicationLogError, ApplicationRecord, CsvApplicationLog,
    JobAlert, JobPipeline, MatchEngine, Notifier,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type ConfiguredPipeline = JobPipeline<ConfiguredLog, TracingNotifier>;

/// Loads profile and vocabulary and wires them to the configured log and a tracing notifier.
pub(crate) fn build_pipeline(config: &MatchingConfig) -> Result<ConfiguredPipeline, ConfigError> {
    let engine = MatchEngine::new(config.load_profile()?, config.load_vocabulary()?);
    let log = ConfiguredLog::from_config(config);
    info!(
        profile = %config.profile_path.display(),
        log = %log.describe(),
        "matching pipeline configured"
    );
    Ok(JobPipeline::new(
        Arc::new(engine),
        Arc::new(log),
        Arc::new(TracingNotifier),
        config.pipeline_options(),
    ))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationLog {
    records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl ApplicationLog for InMemoryApplicationLog {
    fn append(&self, record: ApplicationRecord) -> Result<(), ApplicationLogError> {
        let mut guard = self.records.lock().expect("application log mutex poisoned");
        guard.push(record);
        Ok(())
    }

    fn contains_url(&self, url: &str) -> Result<bool, ApplicationLogError> {
        let guard = self.records.lock().expect("application log mutex poisoned");
        Ok(guard.iter().any(|record| record.url == url))
    }

    fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, ApplicationLogError> {
        let guard = self.records.lock().expect("application log mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

/// Application log selected from configuration: a CSV file when one is set, memory otherwise.
pub(crate) enum ConfiguredLog {
    Csv(CsvApplicationLog),
    Memory(InMemoryApplicationLog),
}

impl ConfiguredLog {
    pub(crate) fn from_config(config: &MatchingConfig) -> Self {
        match &config.application_log {
            Some(path) => Self::Csv(CsvApplicationLog::new(path.clone())),
            None => Self::Memory(InMemoryApplicationLog::default()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Csv(log) => format!("csv:{}", log.path().display()),
            Self::Memory(_) => "memory".to_string(),
        }
    }
}

impl ApplicationLog for ConfiguredLog {
    fn append(&self, record: ApplicationRecord) -> Result<(), ApplicationLogError> {
        match self {
            Self::Csv(log) => log.append(record),
            Self::Memory(log) => log.append(record),
        }
    }

    fn contains_url(&self, url: &str) -> Result<bool, ApplicationLogError> {
        match self {
            Self::Csv(log) => log.contains_url(url),
            Self::Memory(log) => log.contains_url(url),
        }
    }

    fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, ApplicationLogError> {
        match self {
            Self::Csv(log) => log.recent(limit),
            Self::Memory(log) => log.recent(limit),
        }
    }
}

/// Writes every alert to the tracing output.
#[derive(Default, Clone, Copy)]
pub(crate) struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn publish(&self, alert: JobAlert) -> Result<(), AlertError> {
        info!(template = %alert.template, "{}", alert.render());
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotifier {
    events: Arc<Mutex<Vec<JobAlert>>>,
}

impl Notifier for InMemoryNotifier {
    fn publish(&self, alert: JobAlert) -> Result<(), AlertError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryNotifier {
    pub(crate) fn events(&self) -> Vec<JobAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}
