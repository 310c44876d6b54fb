//! Result card encoding
//!
//! Assembles the final archetype, insight, and a behavior summary into the
//! stable JSON payload consumed by the result screen and export/share
//! collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::archetype::types::Archetype;
use crate::error::EngineError;
use crate::tracker::record::{BehaviorRecord, MouseMovementIntensity};
use crate::{ENGINE_VERSION, PRODUCER_NAME};

/// Producer metadata stamped on every card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardProducer {
    /// Name of the producing software
    pub name: String,
    /// Version of the producing software
    pub version: String,
}

/// Behavior summary block for display alongside the archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorSummary {
    /// Final behavior score
    pub behavior_score: u32,
    /// Milliseconds to first interaction, if recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_first_interaction_ms: Option<u64>,
    /// Mean answer gap in milliseconds, if any answers were given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_answer_time_ms: Option<f64>,
    /// Cumulative hover time in milliseconds
    pub total_hover_time_ms: u64,
    /// Deepest observed scroll ratio
    pub scroll_depth: f64,
    /// Latest movement classification
    pub mouse_movement_intensity: MouseMovementIntensity,
    /// Number of answers given
    pub answer_count: u32,
    /// Whether the user scrolled before their first interaction
    pub scrolled_before_first_click: bool,
}

/// The shareable result payload for one finished session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultCard {
    /// Unique card identifier
    pub card_id: String,
    /// Producer metadata
    pub producer: CardProducer,
    /// When the card was composed (RFC3339)
    pub computed_at_utc: String,
    /// The resolved archetype, description variant included
    pub archetype: Archetype,
    /// Behavior insight text
    pub insight: String,
    /// Plain-text share form: name and description
    pub share_text: String,
    /// Behavior summary block
    pub behavior: BehaviorSummary,
}

impl ResultCard {
    /// Compose a card from the resolved archetype and the finished record
    pub fn compose(
        archetype: Archetype,
        insight: String,
        record: &BehaviorRecord,
        computed_at: DateTime<Utc>,
    ) -> Self {
        let share_text = format!("{}\n\n{}", archetype.name, archetype.description);

        let behavior = BehaviorSummary {
            behavior_score: record.behavior_score,
            time_to_first_interaction_ms: record.time_to_first_interaction_ms,
            average_answer_time_ms: record.average_answer_time_ms(),
            total_hover_time_ms: record.total_hover_time_ms,
            scroll_depth: record.scroll_depth,
            mouse_movement_intensity: record.mouse_movement_intensity,
            answer_count: record.answers.len() as u32,
            scrolled_before_first_click: record.scrolled_before_first_click,
        };

        Self {
            card_id: Uuid::new_v4().to_string(),
            producer: CardProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
            },
            computed_at_utc: computed_at.to_rfc3339(),
            archetype,
            insight,
            share_text,
            behavior,
        }
    }

    /// Serialize the card to pretty JSON
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(EngineError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::table::default_archetype_table;
    use chrono::TimeZone;

    fn sample_record() -> BehaviorRecord {
        BehaviorRecord {
            time_to_first_interaction_ms: Some(1500),
            answer_timings_ms: vec![2000, 4000],
            answers: vec!["a".to_string(), "c".to_string()],
            total_hover_time_ms: 2600,
            scroll_depth: 0.4,
            behavior_score: 5,
            ..BehaviorRecord::default()
        }
    }

    #[test]
    fn test_share_text_format() {
        let table = default_archetype_table();
        let archetype = table.archetype_by_id("surface-level").unwrap().clone();
        let expected = format!("{}\n\n{}", archetype.name, archetype.description);

        let card = ResultCard::compose(
            archetype,
            "insight".to_string(),
            &sample_record(),
            Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap(),
        );

        assert_eq!(card.share_text, expected);
    }

    #[test]
    fn test_behavior_summary_fields() {
        let table = default_archetype_table();
        let archetype = table.archetype_by_id("surface-level").unwrap().clone();

        let card = ResultCard::compose(
            archetype,
            String::new(),
            &sample_record(),
            Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap(),
        );

        assert_eq!(card.behavior.behavior_score, 5);
        assert_eq!(card.behavior.answer_count, 2);
        assert_eq!(card.behavior.average_answer_time_ms, Some(3000.0));
        assert_eq!(card.producer.name, PRODUCER_NAME);
    }

    #[test]
    fn test_card_json_contains_expected_fields() {
        let table = default_archetype_table();
        let archetype = table.archetype_by_id("pattern-seeking").unwrap().clone();

        let card = ResultCard::compose(
            archetype,
            "You looked around first.".to_string(),
            &sample_record(),
            Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap(),
        );

        let json = card.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["archetype"]["id"], "pattern-seeking");
        assert_eq!(value["behavior"]["behavior_score"], 5);
        assert_eq!(value["producer"]["name"], "curio-engine");
        assert!(value["card_id"].is_string());
    }
}
