use serde::{Deserialize, Serialize};

use super::super::profile::MatchConfigError;

/// Terminal classification assigned to one posting by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingDecision {
    Exclude,
    AutoApply,
    Review,
    Skip,
}

impl RoutingDecision {
    pub fn label(&self) -> &'static str {
        match self {
            RoutingDecision::Exclude => "exclude",
            RoutingDecision::AutoApply => "auto_apply",
            RoutingDecision::Review => "review",
            RoutingDecision::Skip => "skip",
        }
    }
}

/// Score cut-offs for the non-exclude decisions. `auto_apply >= review` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutingThresholds {
    auto_apply: u8,
    review: u8,
}

impl RoutingThresholds {
    pub fn new(auto_apply: u8, review: u8) -> Result<Self, MatchConfigError> {
        if auto_apply > 100 {
            return Err(MatchConfigError::ThresholdOutOfRange {
                field: "matching.auto_apply_threshold",
                value: i64::from(auto_apply),
            });
        }
        if review > 100 {
            return Err(MatchConfigError::ThresholdOutOfRange {
                field: "matching.review_threshold",
                value: i64::from(review),
            });
        }
        if auto_apply < review {
            return Err(MatchConfigError::ThresholdOrder { auto_apply, review });
        }
        Ok(Self { auto_apply, review })
    }

    pub fn auto_apply(&self) -> u8 {
        self.auto_apply
    }

    pub fn review(&self) -> u8 {
        self.review
    }
}

impl Default for RoutingThresholds {
    fn default() -> Self {
        Self {
            auto_apply: super::super::profile::DEFAULT_AUTO_APPLY_THRESHOLD,
            review: super::super::profile::DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

/// Routes a non-excluded score into exactly one of auto-apply, review, or skip.
pub fn route(score: u8, thresholds: RoutingThresholds) -> RoutingDecision {
    if score >= thresholds.auto_apply {
        RoutingDecision::AutoApply
    } else if score >= thresholds.review {
        RoutingDecision::Review
    } else {
        RoutingDecision::Skip
    }
}
