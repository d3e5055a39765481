mod policy;
mod rules;

pub use policy::{route, RoutingDecision, RoutingThresholds};

use super::profile::CandidateProfile;
use super::vocabulary::SkillVocabulary;
use serde::{Deserialize, Serialize};

/// Stateless evaluator that scores postings against an immutable profile and vocabulary.
///
/// Holds no interior mutability, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    profile: CandidateProfile,
    vocabulary: SkillVocabulary,
}

impl MatchEngine {
    pub fn new(profile: CandidateProfile, vocabulary: SkillVocabulary) -> Self {
        Self {
            profile,
            vocabulary,
        }
    }

    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Returns the first configured exclusion keyword present in the title or description.
    pub fn should_exclude(&self, title: &str, description: &str) -> Option<&str> {
        let text = format!("{title} {description}").to_lowercase();
        rules::find_exclusion(&self.profile, &text)
    }

    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        rules::extract_skills(&self.profile, &self.vocabulary, text)
    }

    pub fn score_title(&self, title: &str) -> u8 {
        to_score(rules::score_title(&self.profile, title))
    }

    /// Coverage step score plus group bonus for an already extracted skill list.
    pub fn score_skills(&self, matched_skills: &[String]) -> u8 {
        to_score(rules::score_skills(&self.vocabulary, matched_skills))
    }

    /// Scores and routes one posting. An absent description falls back to the title.
    pub fn evaluate(&self, title: &str, description: Option<&str>) -> Evaluation {
        let description = description.unwrap_or(title);

        if let Some(keyword) = self.should_exclude(title, description) {
            return Evaluation {
                score: 0,
                matched_skills: Vec::new(),
                decision: RoutingDecision::Exclude,
                exclusion_reason: Some(keyword.to_string()),
                title_score: 0,
                skill_score: 0,
                components: Vec::new(),
            };
        }

        let combined = format!("{title} {description}").to_lowercase();
        let matched_skills = self.extract_skills(&combined);
        let totals = rules::score_posting(
            &self.profile,
            &self.vocabulary,
            title,
            description,
            &matched_skills,
        );

        let score = to_score(totals.total_score);
        let decision = route(score, self.profile.thresholds());

        Evaluation {
            score,
            matched_skills,
            decision,
            exclusion_reason: None,
            title_score: to_score(totals.title_score),
            skill_score: to_score(totals.skill_score),
            components: totals.components,
        }
    }
}

fn to_score(value: u32) -> u8 {
    value.min(100) as u8
}

/// Scoring factor recorded on each component for audit trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    TitleMatch,
    SkillCoverage,
    ExperienceLevel,
    ToolDiversity,
}

/// Discrete contribution to an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub score: u32,
    pub notes: String,
}

/// Engine output for a single posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: u8,
    pub matched_skills: Vec<String>,
    pub decision: RoutingDecision,
    pub exclusion_reason: Option<String>,
    pub title_score: u8,
    pub skill_score: u8,
    pub components: Vec<ScoreComponent>,
}

impl Evaluation {
    /// Comma-joined skill list in the layout the application log stores.
    pub fn skills_summary(&self) -> String {
        self.matched_skills.join(", ")
    }

    /// Leading skills for short displays such as notifications and cover letters.
    pub fn top_skills(&self, limit: usize) -> &[String] {
        &self.matched_skills[..self.matched_skills.len().min(limit)]
    }

    pub fn summary(&self) -> String {
        match (&self.decision, &self.exclusion_reason) {
            (RoutingDecision::Exclude, Some(reason)) => format!("excluded: contains {reason}"),
            (decision, _) => format!("{} at {}%", decision.label(), self.score),
        }
    }
}
