//! Score-to-archetype resolution
//!
//! Maps a final behavior score onto the range table, falling back to the
//! lowest archetype when no range matches (a configuration defect is never
//! surfaced to the user), and randomizes the description variant for replay
//! variability.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::archetype::types::{Archetype, ArchetypeTable};

/// Probability of swapping in an alternate description
const ALTERNATE_DESCRIPTION_PROBABILITY: f64 = 0.5;

/// Resolve the archetype for a final behavior score
///
/// The first range containing the score wins. After selection, an
/// independent coin decides whether the primary description is replaced by
/// one uniformly-chosen alternate; the substitution never affects which
/// archetype was chosen.
pub fn resolve_archetype<R: Rng + ?Sized>(
    score: u32,
    table: &ArchetypeTable,
    rng: &mut R,
) -> Archetype {
    let matched = table
        .ranges()
        .iter()
        .find(|range| range.contains(score))
        .and_then(|range| table.archetype_by_id(&range.archetype_id));

    let mut archetype = match matched {
        Some(archetype) => archetype.clone(),
        None => {
            warn!(score, "no score range matched; using lowest archetype");
            table.fallback_archetype().clone()
        }
    };

    if !archetype.alternate_descriptions.is_empty()
        && rng.gen_bool(ALTERNATE_DESCRIPTION_PROBABILITY)
    {
        if let Some(alternate) = archetype.alternate_descriptions.choose(rng) {
            archetype.description = alternate.clone();
        }
    }

    archetype
}
