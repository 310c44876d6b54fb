//! Archetype resolution module
//!
//! Maps a final behavior score to one of the narrative archetypes via an
//! ordered score-range table, and derives the free-text behavior insight
//! shown alongside the result.

pub mod insight;
pub mod resolver;
pub mod table;
pub mod types;

pub use insight::generate_insight;
pub use resolver::resolve_archetype;
pub use table::default_archetype_table;
pub use types::{Archetype, ArchetypeTable, ScoreRange};
