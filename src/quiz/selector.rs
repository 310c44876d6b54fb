//! Question selection
//!
//! Chooses a bounded question set from the pool, conditioning eligibility on
//! the behavior snapshot taken when the user begins. Called exactly once per
//! quiz attempt; randomness is injected so selection is deterministic under
//! a seeded source.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::types::{PoolQuestion, Question};
use crate::tracker::record::BehaviorRecord;

/// Questions presented per attempt
pub const DEFAULT_QUESTION_COUNT: usize = 8;

/// Select up to `desired_count` questions from the pool
///
/// Pool entries whose condition fails against the snapshot are held back and
/// drawn on only when the eligible set cannot fill the request, so the
/// returned sequence has exactly `desired_count` items whenever the pool is
/// large enough (and the whole shuffled pool otherwise). Display identifiers
/// are sequential and 1-based, assigned after selection.
pub fn select_questions<R: Rng + ?Sized>(
    pool: &[PoolQuestion],
    desired_count: usize,
    snapshot: &BehaviorRecord,
    rng: &mut R,
) -> Vec<Question> {
    let (mut eligible, mut ineligible): (Vec<&PoolQuestion>, Vec<&PoolQuestion>) = pool
        .iter()
        .partition(|q| q.condition.map_or(true, |c| c.evaluate(snapshot)));

    eligible.shuffle(rng);
    let mut picked: Vec<&PoolQuestion> = eligible.into_iter().take(desired_count).collect();

    if picked.len() < desired_count {
        ineligible.shuffle(rng);
        let shortfall = desired_count - picked.len();
        picked.extend(ineligible.into_iter().take(shortfall));
    }

    picked
        .into_iter()
        .enumerate()
        .map(|(index, entry)| Question {
            id: index as u32 + 1,
            text: entry.text.clone(),
            subtext: entry.subtext.clone(),
            options: entry.options.clone(),
        })
        .collect()
}
