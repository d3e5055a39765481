use serde::{Deserialize, Serialize};

use super::evaluation::RoutingThresholds;

pub const DEFAULT_AUTO_APPLY_THRESHOLD: u8 = 70;
pub const DEFAULT_REVIEW_THRESHOLD: u8 = 60;

/// Raw profile document as stored in the external config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub target_roles: Vec<String>,
    #[serde(default)]
    pub exclusion_keywords: Vec<String>,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub candidate: CandidateContact,
}

/// Threshold block of the profile document. Missing values fall back to 70/60.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub auto_apply_threshold: Option<i64>,
    #[serde(default)]
    pub review_threshold: Option<i64>,
}

/// Contact details used to sign generated cover letters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateContact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

/// Validated, immutable candidate profile shared by every evaluation in a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateProfile {
    skills: Vec<String>,
    target_roles: Vec<String>,
    exclusion_keywords: Vec<String>,
    thresholds: RoutingThresholds,
    contact: CandidateContact,
}

impl CandidateProfile {
    pub fn from_settings(settings: ProfileSettings) -> Result<Self, MatchConfigError> {
        let ProfileSettings {
            skills,
            target_roles,
            exclusion_keywords,
            matching,
            candidate,
        } = settings;

        let auto_apply = threshold(
            "matching.auto_apply_threshold",
            matching.auto_apply_threshold,
            DEFAULT_AUTO_APPLY_THRESHOLD,
        )?;
        let review = threshold(
            "matching.review_threshold",
            matching.review_threshold,
            DEFAULT_REVIEW_THRESHOLD,
        )?;
        let thresholds = RoutingThresholds::new(auto_apply, review)?;

        let mut unique_skills: Vec<String> = Vec::new();
        for skill in normalize_phrases("skills", skills)? {
            if !unique_skills.contains(&skill) {
                unique_skills.push(skill);
            }
        }

        Ok(Self {
            skills: unique_skills,
            target_roles: normalize_phrases("target_roles", target_roles)?,
            exclusion_keywords: normalize_phrases("exclusion_keywords", exclusion_keywords)?,
            thresholds,
            contact: candidate,
        })
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn target_roles(&self) -> &[String] {
        &self.target_roles
    }

    pub fn exclusion_keywords(&self) -> &[String] {
        &self.exclusion_keywords
    }

    pub fn thresholds(&self) -> RoutingThresholds {
        self.thresholds
    }

    pub fn contact(&self) -> &CandidateContact {
        &self.contact
    }
}

fn threshold(field: &'static str, value: Option<i64>, default: u8) -> Result<u8, MatchConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => u8::try_from(raw)
            .ok()
            .filter(|value| *value <= 100)
            .ok_or(MatchConfigError::ThresholdOutOfRange { field, value: raw }),
    }
}

fn normalize_phrases(
    field: &'static str,
    values: Vec<String>,
) -> Result<Vec<String>, MatchConfigError> {
    values
        .into_iter()
        .map(|value| {
            let phrase = value.trim().to_lowercase();
            if phrase.is_empty() {
                Err(MatchConfigError::BlankEntry { field })
            } else {
                Ok(phrase)
            }
        })
        .collect()
}

/// Invalid matching configuration, reported when the engine is built.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatchConfigError {
    #[error("{field} must be between 0 and 100 (got {value})")]
    ThresholdOutOfRange { field: &'static str, value: i64 },
    #[error("auto_apply_threshold ({auto_apply}) must not be below review_threshold ({review})")]
    ThresholdOrder { auto_apply: u8, review: u8 },
    #[error("{field} contains a blank entry")]
    BlankEntry { field: &'static str },
}
