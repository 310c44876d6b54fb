//! Mid-quiz narration content
//!
//! Commentary lines surface once per session partway through the quiz;
//! micro-observations are short per-click acknowledgements. Both are pure
//! content with random pickers.

use rand::seq::SliceRandom;
use rand::Rng;

/// Mid-quiz commentary, shown at most once per session
pub const COMMENTARY_LINES: [&str; 8] = [
    "You paused. That pause mattered.",
    "You hovered longer than 85% of users.",
    "You didn't read everything fully. Still here.",
    "You backtracked once. Smart move.",
    "You seem aware. That awareness doesn't stop you.",
    "You clicked immediately. Bold choice.",
    "Interesting reaction time.",
    "You hesitated. We noticed.",
];

/// Per-click micro-text acknowledgements
pub const MICRO_OBSERVATION_LINES: [&str; 5] = [
    "You didn't rush that.",
    "Noted.",
    "Interesting.",
    "Proceeding.",
    "Understood.",
];

/// Pick one commentary line
pub fn pick_commentary<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    COMMENTARY_LINES.choose(rng).copied().unwrap_or(COMMENTARY_LINES[0])
}

/// Pick one micro-observation line
pub fn pick_micro_observation<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MICRO_OBSERVATION_LINES
        .choose(rng)
        .copied()
        .unwrap_or(MICRO_OBSERVATION_LINES[0])
}
