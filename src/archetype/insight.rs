//! Behavior insight text
//!
//! Composes a short free-text summary from fixed-order threshold checks on
//! the behavior record. Independent of the score-range table; it may
//! disagree with the resolved archetype, which is accepted behavior.

use crate::tracker::record::BehaviorRecord;

/// First-interaction gap above which the session reads as a long wait (ms)
const WAITED_THRESHOLD_MS: u64 = 10_000;

/// First-interaction gap below which the session reads as immediate (ms)
const IMMEDIATE_THRESHOLD_MS: u64 = 2000;

/// Cumulative hover time above which the cursor lingered (ms)
const LINGERING_HOVER_THRESHOLD_MS: u64 = 8000;

/// Scroll depth above which the user scrolled deeper than most
const DEEP_SCROLL_INSIGHT_THRESHOLD: f64 = 0.5;

/// Mean answer gap above which answers read as deliberate (ms)
const DELIBERATE_ANSWER_THRESHOLD_MS: f64 = 5000.0;

/// Mean answer gap below which answers read as quick (ms)
const QUICK_ANSWER_THRESHOLD_MS: f64 = 2000.0;

/// Compose the behavior insight text for a finished session
pub fn generate_insight(record: &BehaviorRecord) -> String {
    let mut phrases: Vec<&str> = Vec::new();

    if let Some(time_to_first) = record.time_to_first_interaction_ms {
        if time_to_first > WAITED_THRESHOLD_MS {
            phrases.push("You waited before beginning.");
        } else if time_to_first < IMMEDIATE_THRESHOLD_MS {
            phrases.push("You began almost immediately.");
        }
    }

    if record.scrolled_before_first_click {
        phrases.push("You looked around first.");
    }

    if record.total_hover_time_ms > LINGERING_HOVER_THRESHOLD_MS {
        phrases.push("Your cursor lingered.");
    }

    if record.scroll_depth > DEEP_SCROLL_INSIGHT_THRESHOLD {
        phrases.push("You scrolled deeper than most.");
    }

    if let Some(average) = record.average_answer_time_ms() {
        if average > DELIBERATE_ANSWER_THRESHOLD_MS {
            phrases.push("You took your time with each question.");
        } else if average < QUICK_ANSWER_THRESHOLD_MS {
            phrases.push("You moved quickly through the questions.");
        }
    }

    if phrases.is_empty() {
        "Your behavior was unremarkable. Perhaps intentionally so.".to_string()
    } else {
        phrases.join(" ")
    }
}
