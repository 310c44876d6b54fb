//! Session data model
//!
//! This module defines the per-session behavior record accumulated from
//! interaction events, and the wire form of those events used for session
//! replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mouse movement intensity over one sampling window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseMovementIntensity {
    #[default]
    Low,
    Medium,
    High,
}

/// Accumulated interaction behavior for a single session
///
/// Created with all-default values at session start, mutated exclusively
/// through [`BehaviorTracker`](crate::tracker::BehaviorTracker) operations,
/// and replaced wholesale on restart.
///
/// Invariants: `answer_timings_ms.len() == answers.len()`, `scroll_depth`
/// never decreases, `behavior_score` never decreases, and
/// `time_to_first_interaction_ms` is write-once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorRecord {
    /// Milliseconds from session start to the first interaction, once recorded
    pub time_to_first_interaction_ms: Option<u64>,
    /// Gap in milliseconds before each answer (first gap is measured from the
    /// first interaction)
    pub answer_timings_ms: Vec<u64>,
    /// Whether any scroll event arrived before the first interaction
    pub scrolled_before_first_click: bool,
    /// Duration in milliseconds of each completed hover span
    pub hover_hesitations_ms: Vec<u64>,
    /// Running sum of hover span durations
    pub total_hover_time_ms: u64,
    /// Latest sampled movement classification (descriptive only)
    pub mouse_movement_intensity: MouseMovementIntensity,
    /// Chosen answer option identifiers, in order
    pub answers: Vec<String>,
    /// Running maximum of observed scroll-depth ratio (0-1)
    pub scroll_depth: f64,
    /// Accumulated behavior score; monotonically non-decreasing
    pub behavior_score: u32,
}

impl BehaviorRecord {
    /// Mean answer gap in milliseconds, or `None` before the first answer
    pub fn average_answer_time_ms(&self) -> Option<f64> {
        if self.answer_timings_ms.is_empty() {
            return None;
        }
        let sum: u64 = self.answer_timings_ms.iter().sum();
        Some(sum as f64 / self.answer_timings_ms.len() as f64)
    }
}

/// A recorded interaction event with timestamp and type-specific payload
///
/// This is the wire form of the fire-and-forget event surface: hosts that
/// log sessions serialize these (one per line) and replay them later through
/// [`BehaviorTracker::apply`](crate::tracker::BehaviorTracker::apply).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Event timestamp
    pub timestamp: DateTime<Utc>,
    /// Event type and payload
    #[serde(flatten)]
    pub kind: InteractionKind,
}

/// Interaction event types captured from the quiz surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum InteractionKind {
    /// First engagement with the page; recorded once per session
    FirstInteraction,
    /// An answer option was chosen
    Answer { option_id: String },
    /// Cursor entered an answer option
    HoverStart,
    /// Cursor left an answer option
    HoverEnd,
    /// A scroll event fired
    Scroll,
    /// Scroll depth ratio was observed
    ScrollDepth { depth: f64 },
    /// One mouse-movement event
    MouseMove,
    /// Periodic movement-sampling tick
    MovementSample,
}
