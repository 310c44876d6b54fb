//! Default archetype content
//!
//! The five shipped archetypes and their score ranges. The topmost range is
//! open-ended so the table covers every possible score.

use crate::archetype::types::{Archetype, ArchetypeTable, ScoreRange};

fn archetype(
    id: &str,
    name: &str,
    tagline: &str,
    description: &str,
    alternates: &[&str],
    observations: &[&str],
    closing: &str,
) -> Archetype {
    Archetype {
        id: id.to_string(),
        name: name.to_string(),
        tagline: tagline.to_string(),
        description: description.to_string(),
        alternate_descriptions: alternates.iter().map(|s| s.to_string()).collect(),
        observations: observations.iter().map(|s| s.to_string()).collect(),
        closing: closing.to_string(),
    }
}

fn range(min: u32, max: Option<u32>, archetype_id: &str) -> ScoreRange {
    ScoreRange {
        min,
        max,
        archetype_id: archetype_id.to_string(),
    }
}

/// Build the default score-to-archetype table
pub fn default_archetype_table() -> ArchetypeTable {
    let archetypes = vec![
        archetype(
            "surface-level",
            "Surface-Level Curious",
            "Quick to decide.",
            "You clicked quickly. You didn't hesitate. Most things don't need your full attention. This almost did.",
            &[
                "You answered fast. You skimmed. You didn't stay long. That's your style.",
                "You moved through this quickly. Efficiently, even. The kind of person who reads the first paragraph and assumes the rest.",
            ],
            &[
                "You answered without much hesitation.",
                "The pauses between questions were brief.",
                "You did not linger.",
            ],
            "Curiosity, for you, is a checkbox. You came, you saw, you concluded. Whether you actually looked is a different question.",
        ),
        archetype(
            "cautiously-investigative",
            "Cautiously Investigative",
            "Reads the room.",
            "Curiosity, but with boundaries. You didn't rush. You didn't leave. That's a choice.",
            &[
                "You weigh before you act. You explore carefully. You observe before committing.",
                "You took your time, but not too much. Careful. Measured. The kind of curious that keeps one foot near the door.",
            ],
            &[
                "Your pace was deliberate but not slow.",
                "You hovered before committing.",
                "You prefer to know what you're getting into.",
            ],
            "You're curious enough to explore, but not enough to get lost. That's either wisdom or fear dressed up as prudence.",
        ),
        archetype(
            "pattern-seeking",
            "Pattern-Seeking",
            "Looks for the mechanism.",
            "You notice structure where others see noise. You're here for the mechanism.",
            &[
                "You look for connections. You read between the lines. You see the system.",
                "You were looking for something. The structure. The trick. The thing that explains the thing.",
            ],
            &[
                "You scrolled. You paused. You reconsidered.",
                "Your attention lingered longer than necessary.",
                "You were reading between the lines.",
            ],
            "You suspect there's more here than meets the eye. You're not wrong. But the real question is whether you're comfortable with what you find.",
        ),
        archetype(
            "reluctantly-curious",
            "Reluctantly Curious",
            "Stays despite himself.",
            "You didn't plan to care. You stayed anyway. You could have left. You didn't.",
            &[
                "You resist curiosity but it finds you. You observe unwillingly. Still, you continue.",
                "You almost didn't start. And yet here you are, at the end. Something pulled you forward despite yourself.",
            ],
            &[
                "The first interaction took longer than expected.",
                "Your pace was uneven — hesitant, then committed.",
                "You finished, though you seemed unsure why.",
            ],
            "Curiosity isn't always enthusiastic. Sometimes it's a quiet compulsion. You followed it anyway. That says something.",
        ),
        archetype(
            "uncomfortably-observant",
            "Uncomfortably Observant",
            "Notices the invisible.",
            "You knew something was off. You continued. Most people would have closed the page. You wanted to see what it would say next.",
            &[
                "You saw the cracks, hesitated, and kept going. You noticed the invisible. That's dangerous.",
                "You noticed. The timing. The phrasing. The quiet ways this was watching you back.",
            ],
            &[
                "Your behavior suggested awareness.",
                "You moved like someone being observed.",
                "You may have wondered what was being tracked.",
            ],
            "Most people don't notice. You did. Whether that's a gift or a burden depends entirely on what you do with it.",
        ),
    ];

    let ranges = vec![
        range(0, Some(8), "surface-level"),
        range(9, Some(14), "cautiously-investigative"),
        range(15, Some(20), "pattern-seeking"),
        range(21, Some(26), "reluctantly-curious"),
        range(27, None, "uncomfortably-observant"),
    ];

    // Content above is statically non-empty; new() cannot fail here
    ArchetypeTable::new(archetypes, ranges).unwrap_or_else(|_| {
        unreachable!("default archetype table is statically valid")
    })
}
