use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::workflows::matching::{
    CandidateProfile, MatchConfigError, PipelineOptions, ProfileSettings, SkillGroup,
    SkillSynonyms, SkillVocabulary, DEFAULT_HIGH_MATCH_SCORE,
};

const DEFAULT_PROFILE_PATH: &str = "config/profile.json";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let profile_path = env::var("JOBHUNT_PROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROFILE_PATH));
        let vocabulary_path = env::var("JOBHUNT_VOCABULARY").ok().map(PathBuf::from);
        let application_log = env::var("JOBHUNT_APPLICATION_LOG").ok().map(PathBuf::from);
        let high_match_score = match env::var("JOBHUNT_HIGH_MATCH_SCORE") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|score| *score <= 100)
                .ok_or(ConfigError::InvalidHighMatchScore)?,
            Err(_) => DEFAULT_HIGH_MATCH_SCORE,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: MatchingConfig {
                profile_path,
                vocabulary_path,
                application_log,
                high_match_score,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the candidate profile, vocabulary, and application log live.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    pub profile_path: PathBuf,
    pub vocabulary_path: Option<PathBuf>,
    pub application_log: Option<PathBuf>,
    pub high_match_score: u8,
}

impl MatchingConfig {
    pub fn load_profile(&self) -> Result<CandidateProfile, ConfigError> {
        load_profile(&self.profile_path)
    }

    pub fn load_vocabulary(&self) -> Result<SkillVocabulary, ConfigError> {
        match &self.vocabulary_path {
            Some(path) => load_vocabulary(path),
            None => Ok(SkillVocabulary::standard()),
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            high_match_score: self.high_match_score,
        }
    }
}

/// Reads and validates a candidate profile document.
pub fn load_profile(path: &Path) -> Result<CandidateProfile, ConfigError> {
    let settings: ProfileSettings = read_json(path)?;
    CandidateProfile::from_settings(settings).map_err(|source| ConfigError::Matching {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Deserialize)]
struct VocabularyDocument {
    #[serde(default)]
    synonyms: Vec<SkillSynonyms>,
    #[serde(default)]
    groups: Vec<SkillGroup>,
}

/// Reads a vocabulary document replacing the built-in synonym and group tables.
pub fn load_vocabulary(path: &Path) -> Result<SkillVocabulary, ConfigError> {
    let document: VocabularyDocument = read_json(path)?;
    SkillVocabulary::new(document.synonyms, document.groups).map_err(|source| {
        ConfigError::Matching {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn read_json<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidHighMatchScore,
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseFile {
        path: PathBuf,
        source: serde_json::Error,
    },
    Matching {
        path: PathBuf,
        source: MatchConfigError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidHighMatchScore => {
                write!(f, "JOBHUNT_HIGH_MATCH_SCORE must be an integer between 0 and 100")
            }
            ConfigError::ReadFile { path, .. } => {
                write!(f, "unable to read {}", path.display())
            }
            ConfigError::ParseFile { path, source } => {
                write!(f, "{} is not valid JSON: {}", path.display(), source)
            }
            ConfigError::Matching { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidHighMatchScore => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::ReadFile { source, .. } => Some(source),
            ConfigError::ParseFile { source, .. } => Some(source),
            ConfigError::Matching { source, .. } => Some(source),
        }
    }
}
