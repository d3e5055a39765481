use super::super::profile::CandidateProfile;
use super::super::vocabulary::SkillVocabulary;
use super::{ScoreComponent, ScoreFactor};

const JUNIOR_TITLE_BONUS: u32 = 10;
const ANALYST_TITLE_BONUS: u32 = 5;
const GROUP_BONUS: u32 = 5;
const EXPERIENCE_BONUS: u32 = 5;
const TOOL_DIVERSITY_BONUS: u32 = 5;
const TOOL_DIVERSITY_MINIMUM: usize = 3;

const CORE_TOOLS: &[&str] = &["sql", "python", "r", "tableau", "power bi", "excel"];

/// Base scores for common role titles. The highest matching phrase wins, so order is irrelevant.
const TITLE_KEYWORDS: &[(&str, u32)] = &[
    ("junior data analyst", 100),
    ("jr. data analyst", 100),
    ("jr data analyst", 100),
    ("data analyst", 95),
    ("data analytics", 90),
    ("mis analyst", 95),
    ("mis executive", 90),
    ("management information system", 90),
    ("business analyst", 85),
    ("junior business analyst", 90),
    ("business analytics", 80),
    ("financial data analyst", 90),
    ("risk analyst", 85),
    ("retail analytics", 85),
    ("ecommerce analytics", 85),
    ("telecom analytics", 85),
    ("customer churn analyst", 85),
    ("aviation data analyst", 90),
    ("automotive analytics", 90),
    ("tableau developer", 90),
    ("power bi developer", 90),
    ("bi developer", 90),
    ("etl developer", 85),
    ("data visualization specialist", 85),
    ("operations analyst", 80),
    ("marketing analytics", 80),
    ("product analyst", 80),
    ("credit risk analyst", 80),
    ("customer insights", 80),
    ("supply chain analytics", 80),
    ("insights analyst", 80),
    ("analytics engineer", 85),
    ("database administrator", 75),
    ("data scientist", 75),
];

/// Returns the first exclusion keyword found in the combined lower-cased text.
pub(crate) fn find_exclusion<'p>(profile: &'p CandidateProfile, text: &str) -> Option<&'p str> {
    profile
        .exclusion_keywords()
        .iter()
        .find(|keyword| text.contains(keyword.as_str()))
        .map(String::as_str)
}

/// Collects canonical skills and group names present in `text`, in discovery order.
pub(crate) fn extract_skills(
    profile: &CandidateProfile,
    vocabulary: &SkillVocabulary,
    text: &str,
) -> Vec<String> {
    let text = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    let mut record = |skill: &str| {
        if !found.iter().any(|existing| existing == skill) {
            found.push(skill.to_string());
        }
    };

    for skill in profile.skills() {
        if text.contains(skill.as_str()) {
            record(skill.as_str());
        }
    }

    for entry in vocabulary.synonyms() {
        if entry
            .phrases
            .iter()
            .any(|phrase| text.contains(phrase.as_str()))
        {
            record(entry.skill.as_str());
        }
    }

    // Group names act as pseudo-skills so they count toward coverage.
    for group in vocabulary.groups() {
        if group
            .members
            .iter()
            .any(|member| text.contains(member.as_str()))
        {
            record(group.name.as_str());
        }
    }

    found
}

pub(crate) fn score_title(profile: &CandidateProfile, title: &str) -> u32 {
    let title = title.to_lowercase();

    let mut score = if profile
        .target_roles()
        .iter()
        .any(|role| title.contains(role.as_str()))
    {
        100
    } else {
        TITLE_KEYWORDS
            .iter()
            .filter(|(keyword, _)| title.contains(keyword))
            .map(|(_, score)| *score)
            .max()
            .unwrap_or(0)
    };

    if title.contains("junior") {
        score = (score + JUNIOR_TITLE_BONUS).min(100);
    }
    if title.contains("analyst") {
        score = (score + ANALYST_TITLE_BONUS).min(100);
    }

    score
}

/// Step function over the number of distinct matched skills. Never drops below 50.
pub(crate) fn coverage_score(matched_count: usize) -> u32 {
    if matched_count >= 10 {
        100
    } else if matched_count >= 8 {
        95
    } else if matched_count >= 6 {
        90
    } else if matched_count >= 5 {
        85
    } else if matched_count >= 4 {
        80
    } else if matched_count >= 3 {
        75
    } else if matched_count >= 2 {
        70
    } else if matched_count >= 1 {
        60
    } else {
        50
    }
}

/// Number of vocabulary groups with at least one member among `matched`.
pub(crate) fn groups_represented(vocabulary: &SkillVocabulary, matched: &[String]) -> usize {
    vocabulary
        .groups()
        .iter()
        .filter(|group| {
            group
                .members
                .iter()
                .any(|member| matched.iter().any(|skill| skill == member))
        })
        .count()
}

pub(crate) fn score_skills(vocabulary: &SkillVocabulary, matched: &[String]) -> u32 {
    let base = coverage_score(matched.len());
    let bonus = GROUP_BONUS * groups_represented(vocabulary, matched) as u32;
    (base + bonus).min(100)
}

pub(crate) struct ScoreTotals {
    pub title_score: u32,
    pub skill_score: u32,
    pub total_score: u32,
    pub components: Vec<ScoreComponent>,
}

pub(crate) fn score_posting(
    profile: &CandidateProfile,
    vocabulary: &SkillVocabulary,
    title: &str,
    description: &str,
    matched: &[String],
) -> ScoreTotals {
    let title_lower = title.to_lowercase();
    let description_lower = description.to_lowercase();

    let title_score = score_title(profile, title);
    let skill_score = score_skills(vocabulary, matched);

    let mut components = vec![
        ScoreComponent {
            factor: ScoreFactor::TitleMatch,
            score: title_score,
            notes: format!("title scored {title_score}"),
        },
        ScoreComponent {
            factor: ScoreFactor::SkillCoverage,
            score: skill_score,
            notes: format!(
                "{} skill(s) matched across {} group(s)",
                matched.len(),
                groups_represented(vocabulary, matched)
            ),
        },
    ];

    // Equal weighting; integer division truncates like a float-to-int cast.
    let mut total_score = (title_score + skill_score) / 2;

    if title_lower.contains("junior") || description_lower.contains("entry") {
        let next = (total_score + EXPERIENCE_BONUS).min(100);
        components.push(ScoreComponent {
            factor: ScoreFactor::ExperienceLevel,
            score: next - total_score,
            notes: "junior or entry-level posting".to_string(),
        });
        total_score = next;
    }

    let tool_diversity = CORE_TOOLS
        .iter()
        .filter(|tool| matched.iter().any(|skill| skill == *tool))
        .count();
    if tool_diversity >= TOOL_DIVERSITY_MINIMUM {
        let next = (total_score + TOOL_DIVERSITY_BONUS).min(100);
        components.push(ScoreComponent {
            factor: ScoreFactor::ToolDiversity,
            score: next - total_score,
            notes: format!("{tool_diversity} core tools requested"),
        });
        total_score = next;
    }

    ScoreTotals {
        title_score,
        skill_score,
        total_score,
        components,
    }
}
