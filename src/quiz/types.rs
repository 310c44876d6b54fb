//! Question data types
//!
//! Pool entries carry an optional selection condition; conditions are data
//! (a tagged enum of named predicates with threshold parameters) evaluated
//! by a pure dispatch function, never closures over mutable state.

use serde::{Deserialize, Serialize};

use crate::tracker::record::BehaviorRecord;

/// One selectable answer option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Option identifier as recorded in the behavior record
    pub id: String,
    /// Display text
    pub text: String,
}

/// A question as presented to the user
///
/// The `id` is session-local and sequential, assigned at selection time; it
/// has no relation to pool ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based display identifier
    pub id: u32,
    /// Question text
    pub text: String,
    /// Optional secondary line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    /// Answer options, in display order
    pub options: Vec<QuestionOption>,
}

/// A pool entry: question content plus an optional eligibility condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolQuestion {
    /// Question text
    pub text: String,
    /// Optional secondary line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    /// Answer options, in display order
    pub options: Vec<QuestionOption>,
    /// Eligibility condition, evaluated once at selection time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<QuestionCondition>,
}

/// Named eligibility predicates over a behavior snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionCondition {
    /// The user scrolled before their first interaction
    ScrolledBeforeFirstClick,
    /// First interaction took longer than the threshold
    FirstInteractionSlowerThan { threshold_ms: u64 },
    /// First interaction came faster than the threshold
    FirstInteractionFasterThan { threshold_ms: u64 },
    /// Cumulative hover time exceeds the threshold
    TotalHoverLongerThan { threshold_ms: u64 },
}

impl QuestionCondition {
    /// Evaluate this condition against a behavior snapshot
    pub fn evaluate(&self, record: &BehaviorRecord) -> bool {
        match *self {
            QuestionCondition::ScrolledBeforeFirstClick => record.scrolled_before_first_click,
            QuestionCondition::FirstInteractionSlowerThan { threshold_ms } => record
                .time_to_first_interaction_ms
                .map_or(false, |t| t > threshold_ms),
            QuestionCondition::FirstInteractionFasterThan { threshold_ms } => record
                .time_to_first_interaction_ms
                .map_or(false, |t| t < threshold_ms),
            QuestionCondition::TotalHoverLongerThan { threshold_ms } => {
                record.total_hover_time_ms > threshold_ms
            }
        }
    }
}
