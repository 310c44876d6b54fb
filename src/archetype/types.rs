//! Archetype data types
//!
//! Archetypes are static narrative content keyed by an ordered table of
//! score ranges. The table is immutable for the process lifetime; custom
//! content loads from JSON through [`ArchetypeTable::from_json`].

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A narrative outcome bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    /// Stable identifier referenced by score ranges
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line tagline
    pub tagline: String,
    /// Primary description
    pub description: String,
    /// Alternate descriptions for replay variability
    #[serde(default)]
    pub alternate_descriptions: Vec<String>,
    /// Observation lines, in display order
    pub observations: Vec<String>,
    /// Closing text
    pub closing: String,
}

/// One contiguous score range mapped to an archetype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    /// Inclusive lower bound
    pub min: u32,
    /// Inclusive upper bound; `None` makes the range open-ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    /// Identifier of the mapped archetype
    pub archetype_id: String,
}

impl ScoreRange {
    /// Whether `score` falls inside this range
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min && self.max.map_or(true, |max| score <= max)
    }
}

/// Ordered score-range table plus the archetype content it references
///
/// Constructors reject empty content so resolution always has a fallback
/// archetype; range gaps are tolerated here and recovered at lookup time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeTable {
    archetypes: Vec<Archetype>,
    ranges: Vec<ScoreRange>,
}

impl ArchetypeTable {
    /// Build a table from content, validating that a fallback exists
    pub fn new(archetypes: Vec<Archetype>, ranges: Vec<ScoreRange>) -> Result<Self, EngineError> {
        let table = Self { archetypes, ranges };
        table.validate()?;
        Ok(table)
    }

    /// Load a table from JSON
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.archetypes.is_empty() {
            return Err(EngineError::InvalidContent(
                "archetype table has no archetypes".to_string(),
            ));
        }
        if self.ranges.is_empty() {
            return Err(EngineError::InvalidContent(
                "archetype table has no score ranges".to_string(),
            ));
        }
        Ok(())
    }

    /// All archetype content
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    /// The ordered score ranges
    pub fn ranges(&self) -> &[ScoreRange] {
        &self.ranges
    }

    /// Look up an archetype by identifier
    pub fn archetype_by_id(&self, id: &str) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.id == id)
    }

    /// The lowest-score archetype, used when no range matches a score
    pub fn fallback_archetype(&self) -> &Archetype {
        self.ranges
            .iter()
            .min_by_key(|range| range.min)
            .and_then(|range| self.archetype_by_id(&range.archetype_id))
            .unwrap_or(&self.archetypes[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_archetype(id: &str) -> Archetype {
        Archetype {
            id: id.to_string(),
            name: id.to_string(),
            tagline: String::new(),
            description: String::new(),
            alternate_descriptions: Vec::new(),
            observations: Vec::new(),
            closing: String::new(),
        }
    }

    #[test]
    fn test_range_containment() {
        let bounded = ScoreRange {
            min: 9,
            max: Some(14),
            archetype_id: "x".to_string(),
        };
        assert!(!bounded.contains(8));
        assert!(bounded.contains(9));
        assert!(bounded.contains(14));
        assert!(!bounded.contains(15));

        let open = ScoreRange {
            min: 27,
            max: None,
            archetype_id: "x".to_string(),
        };
        assert!(open.contains(27));
        assert!(open.contains(1000));
        assert!(!open.contains(26));
    }

    #[test]
    fn test_rejects_empty_content() {
        assert!(ArchetypeTable::new(vec![], vec![]).is_err());
        assert!(ArchetypeTable::new(vec![minimal_archetype("a")], vec![]).is_err());
    }

    #[test]
    fn test_fallback_is_lowest_range_archetype() {
        let table = ArchetypeTable::new(
            vec![minimal_archetype("high"), minimal_archetype("low")],
            vec![
                ScoreRange {
                    min: 10,
                    max: None,
                    archetype_id: "high".to_string(),
                },
                ScoreRange {
                    min: 0,
                    max: Some(9),
                    archetype_id: "low".to_string(),
                },
            ],
        )
        .unwrap();

        assert_eq!(table.fallback_archetype().id, "low");
    }

    #[test]
    fn test_json_roundtrip() {
        let table = ArchetypeTable::new(
            vec![minimal_archetype("only")],
            vec![ScoreRange {
                min: 0,
                max: None,
                archetype_id: "only".to_string(),
            }],
        )
        .unwrap();

        let json = serde_json::to_string(&table).unwrap();
        let loaded = ArchetypeTable::from_json(&json).unwrap();
        assert_eq!(loaded.archetypes().len(), 1);
        assert_eq!(loaded.ranges().len(), 1);
    }
}
