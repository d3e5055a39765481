use serde::{Deserialize, Serialize};

use super::profile::MatchConfigError;

/// Canonical skill together with the phrases that signal it in posting text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSynonyms {
    pub skill: String,
    pub phrases: Vec<String>,
}

/// Named cluster of related skills. Only used for bonus scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    pub members: Vec<String>,
}

/// Read-only synonym and grouping tables consulted during skill extraction.
///
/// Entry order is preserved so that matched skills are reported in a stable
/// discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillVocabulary {
    synonyms: Vec<SkillSynonyms>,
    groups: Vec<SkillGroup>,
}

impl SkillVocabulary {
    pub fn new(
        synonyms: Vec<SkillSynonyms>,
        groups: Vec<SkillGroup>,
    ) -> Result<Self, MatchConfigError> {
        let vocabulary = Self {
            synonyms: synonyms
                .into_iter()
                .map(|entry| SkillSynonyms {
                    skill: entry.skill.trim().to_lowercase(),
                    phrases: lowercase_all(entry.phrases),
                })
                .collect(),
            groups: groups
                .into_iter()
                .map(|group| SkillGroup {
                    name: group.name.trim().to_lowercase(),
                    members: lowercase_all(group.members),
                })
                .collect(),
        };
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Built-in analytics vocabulary.
    pub fn standard() -> Self {
        Self {
            synonyms: STANDARD_SYNONYMS
                .iter()
                .map(|(skill, phrases)| SkillSynonyms {
                    skill: (*skill).to_string(),
                    phrases: phrases.iter().map(|phrase| (*phrase).to_string()).collect(),
                })
                .collect(),
            groups: STANDARD_GROUPS
                .iter()
                .map(|(name, members)| SkillGroup {
                    name: (*name).to_string(),
                    members: members.iter().map(|member| (*member).to_string()).collect(),
                })
                .collect(),
        }
    }

    pub fn synonyms(&self) -> &[SkillSynonyms] {
        &self.synonyms
    }

    pub fn groups(&self) -> &[SkillGroup] {
        &self.groups
    }

    fn validate(&self) -> Result<(), MatchConfigError> {
        for entry in &self.synonyms {
            if entry.skill.is_empty() || entry.phrases.iter().any(|phrase| phrase.trim().is_empty()) {
                return Err(MatchConfigError::BlankEntry {
                    field: "vocabulary.synonyms",
                });
            }
        }
        for group in &self.groups {
            if group.name.is_empty() || group.members.iter().any(|member| member.trim().is_empty()) {
                return Err(MatchConfigError::BlankEntry {
                    field: "vocabulary.groups",
                });
            }
        }
        Ok(())
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

fn lowercase_all(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.to_lowercase())
        .collect()
}

const STANDARD_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "sql",
        &[
            "sql",
            "sqlite",
            "mysql",
            "t-sql",
            "postgresql",
            "oracle",
            "database",
            "queries",
            "query",
        ],
    ),
    (
        "excel",
        &[
            "excel",
            "ms excel",
            "microsoft excel",
            "pivot tables",
            "vlookup",
            "data validation",
            "spreadsheet",
        ],
    ),
    (
        "tableau",
        &[
            "tableau",
            "tableau desktop",
            "tableau server",
            "tableau dashboard",
            "visualization",
            "viz",
        ],
    ),
    (
        "power bi",
        &["power bi", "powerbi", "power-bi", "pbi", "msbi", "microsoft bi"],
    ),
    // Single-letter phrase: matches inside almost any word.
    (
        "r",
        &[
            "r",
            "r programming",
            "rstudio",
            "r, ",
            "dplyr",
            "ggplot2",
            "tidyverse",
            "shiny",
        ],
    ),
    (
        "python",
        &[
            "python",
            "python3",
            "pandas",
            "numpy",
            "scipy",
            "matplotlib",
            "seaborn",
        ],
    ),
    (
        "data analysis",
        &[
            "data analysis",
            "data analytics",
            "analytics",
            "analyze data",
            "data analyst",
        ],
    ),
    (
        "statistical analysis",
        &[
            "statistical",
            "statistics",
            "stats",
            "anova",
            "regression",
            "hypothesis testing",
        ],
    ),
    (
        "data cleaning",
        &[
            "data cleaning",
            "data preprocessing",
            "preprocessing",
            "cleaning",
            "wrangling",
        ],
    ),
    ("eda", &["eda", "exploratory data analysis", "exploratory"]),
    (
        "data visualization",
        &[
            "data visualization",
            "visualization",
            "visualize",
            "charts",
            "graphs",
            "dashboards",
        ],
    ),
    (
        "database",
        &["database", "db", "sql", "queries", "data modeling", "schema"],
    ),
    (
        "reporting",
        &["reporting", "reports", "mis", "mis reporting", "kpi", "dashboard"],
    ),
    (
        "machine learning",
        &[
            "machine learning",
            "ml",
            "predictive",
            "predictive analytics",
            "modeling",
        ],
    ),
    (
        "customer analysis",
        &[
            "customer",
            "customer segmentation",
            "behavioral",
            "customer insights",
            "churn",
        ],
    ),
    (
        "bi",
        &["bi", "business intelligence", "intelligence", "analytics"],
    ),
    ("operations", &["operations", "operational", "supply chain"]),
    (
        "marketing",
        &["marketing", "market", "customer journey", "segmentation"],
    ),
    ("risk", &["risk", "credit risk", "risk assessment", "fraud"]),
    ("git", &["git", "version control", "github", "bitbucket"]),
    (
        "office",
        &[
            "microsoft office",
            "ms office",
            "google sheets",
            "sheets",
            "word",
            "powerpoint",
        ],
    ),
];

const STANDARD_GROUPS: &[(&str, &[&str])] = &[
    ("core_data", &["sql", "python", "r", "excel"]),
    (
        "visualization",
        &["tableau", "power bi", "data visualization"],
    ),
    (
        "analysis",
        &[
            "data analysis",
            "statistical analysis",
            "predictive analytics",
        ],
    ),
    ("tools", &["git", "microsoft office", "google sheets"]),
];
