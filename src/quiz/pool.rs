//! Default question pool
//!
//! The embedded pool shipped with the engine: unconditioned questions open
//! to every session, plus conditioned questions that become eligible only
//! when the behavior snapshot shows the matching trait. Custom pools load
//! from JSON through [`pool_from_json`].

use crate::error::EngineError;
use crate::quiz::types::{PoolQuestion, QuestionCondition, QuestionOption};

/// First-interaction gap above which a session counts as slow to start (ms)
pub const SLOW_START_CONDITION_MS: u64 = 5000;

/// First-interaction gap below which a session counts as fast to start (ms)
pub const FAST_START_CONDITION_MS: u64 = 2000;

/// Cumulative hover time above which a session counts as hover-heavy (ms)
pub const LONG_HOVER_CONDITION_MS: u64 = 3000;

fn q(text: &str, options: &[(&str, &str)]) -> PoolQuestion {
    PoolQuestion {
        text: text.to_string(),
        subtext: None,
        options: options
            .iter()
            .map(|(id, text)| QuestionOption {
                id: id.to_string(),
                text: text.to_string(),
            })
            .collect(),
        condition: None,
    }
}

fn q_if(condition: QuestionCondition, text: &str, options: &[(&str, &str)]) -> PoolQuestion {
    PoolQuestion {
        condition: Some(condition),
        ..q(text, options)
    }
}

/// Build the default question pool
pub fn default_question_pool() -> Vec<PoolQuestion> {
    let scrolled_first = QuestionCondition::ScrolledBeforeFirstClick;
    let slow_to_start = QuestionCondition::FirstInteractionSlowerThan {
        threshold_ms: SLOW_START_CONDITION_MS,
    };
    let fast_to_start = QuestionCondition::FirstInteractionFasterThan {
        threshold_ms: FAST_START_CONDITION_MS,
    };
    let hovered_long = QuestionCondition::TotalHoverLongerThan {
        threshold_ms: LONG_HOVER_CONDITION_MS,
    };

    vec![
        q(
            "Do you usually finish things you start online?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "No")],
        ),
        q(
            "Did you scroll before answering the first question?",
            &[("a", "Yes"), ("b", "No"), ("c", "Didn't notice")],
        ),
        q(
            "When something slightly confuses you, what do you do?",
            &[
                ("a", "Figure it out"),
                ("b", "Google it"),
                ("c", "Leave"),
                ("d", "Stare"),
            ],
        ),
        q(
            "How long do you usually think before clicking something unfamiliar?",
            &[("a", "Immediate"), ("b", "Few seconds"), ("c", "Overthink")],
        ),
        q(
            "Be honest. Why are you still here?",
            &[
                ("a", "Curious"),
                ("b", "Mildly invested"),
                ("c", "Don't like stopping"),
                ("d", "Nothing better"),
            ],
        ),
        q(
            "If this page suddenly closed, how would you feel?",
            &[
                ("a", "Fine"),
                ("b", "Annoyed"),
                ("c", "Curious"),
                ("d", "Reopen immediately"),
            ],
        ),
        q(
            "Do you click links without reading them first?",
            &[("a", "Always"), ("b", "Sometimes"), ("c", "Never")],
        ),
        q(
            "Do you notice small changes on a webpage?",
            &[("a", "Always"), ("b", "Sometimes"), ("c", "Never")],
        ),
        q(
            "Do you reread instructions before starting?",
            &[("a", "Always"), ("b", "Sometimes"), ("c", "Never")],
        ),
        q(
            "When a question seems pointless, do you answer it anyway?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "No")],
        ),
        q(
            "Do you scroll to the bottom of articles even if uninterested?",
            &[("a", "Always"), ("b", "Sometimes"), ("c", "Never")],
        ),
        q(
            "Do you like to figure out puzzles or skip them?",
            &[("a", "Figure out"), ("b", "Skip"), ("c", "Half-half")],
        ),
        q(
            "How many tabs are open right now?",
            &[("a", "0-2"), ("b", "3-5"), ("c", "6+")],
        ),
        q(
            "Do you read the fine print?",
            &[("a", "Always"), ("b", "Sometimes"), ("c", "Never")],
        ),
        q(
            "Do you click buttons just to see what happens?",
            &[("a", "Always"), ("b", "Sometimes"), ("c", "Never")],
        ),
        // Conditioned: scrolled before the first click
        q_if(
            scrolled_first,
            "You looked around before committing. Do you do that often?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "Not really")],
        ),
        q_if(
            scrolled_first,
            "Do you skim the whole page before interacting?",
            &[("a", "Always"), ("b", "Sometimes"), ("c", "Rarely")],
        ),
        // Conditioned: slow to first interaction
        q_if(
            slow_to_start,
            "You took a moment before starting. Is that typical?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "No")],
        ),
        q_if(
            slow_to_start,
            "Do you prefer to understand something before engaging?",
            &[("a", "Yes"), ("b", "It depends"), ("c", "No")],
        ),
        // Conditioned: fast to first interaction
        q_if(
            fast_to_start,
            "You started quickly. Do you usually dive in without hesitation?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "No")],
        ),
        // Conditioned: hovered a long time
        q_if(
            hovered_long,
            "Do you often hover over options before choosing?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "Rarely")],
        ),
        q_if(
            hovered_long,
            "When unsure, do you pause before clicking?",
            &[("a", "Always"), ("b", "Sometimes"), ("c", "No")],
        ),
        q(
            "Do you close tabs you never finished reading?",
            &[("a", "Rarely"), ("b", "Sometimes"), ("c", "Often")],
        ),
        q(
            "When you see \"Learn more\", do you usually click?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "No")],
        ),
        q(
            "Do you read comments before forming an opinion?",
            &[("a", "Always"), ("b", "Sometimes"), ("c", "Never")],
        ),
        q(
            "If a page loads slowly, do you wait or leave?",
            &[("a", "Wait"), ("b", "It depends"), ("c", "Leave")],
        ),
        q(
            "Do you use the back button often?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "Rarely")],
        ),
        q(
            "Do you trust the first result or keep searching?",
            &[
                ("a", "First result"),
                ("b", "A few more"),
                ("c", "Keep searching"),
            ],
        ),
        q(
            "Do you notice when a site tracks your cursor?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "No")],
        ),
        q(
            "Do you read terms and conditions?",
            &[("a", "Always"), ("b", "Skim"), ("c", "Never")],
        ),
        q(
            "When a pop-up appears, do you read it or dismiss it?",
            &[("a", "Read"), ("b", "Sometimes read"), ("c", "Dismiss")],
        ),
        q(
            "Do you care if a site remembers your choices?",
            &[("a", "Yes"), ("b", "It depends"), ("c", "No")],
        ),
        q(
            "Do you revisit pages to check if something changed?",
            &[("a", "Often"), ("b", "Sometimes"), ("c", "Rarely")],
        ),
        q(
            "Do you prefer short or long-form content?",
            &[("a", "Short"), ("b", "Depends"), ("c", "Long")],
        ),
        q(
            "When you disagree with something online, do you engage?",
            &[("a", "Yes"), ("b", "Sometimes"), ("c", "No")],
        ),
        q(
            "Do you open links in new tabs or the same tab?",
            &[("a", "New tabs"), ("b", "Mixed"), ("c", "Same tab")],
        ),
        q(
            "Do you finish videos or skip to the end?",
            &[("a", "Finish"), ("b", "Sometimes skip"), ("c", "Skip")],
        ),
    ]
}

/// Load a custom question pool from JSON
pub fn pool_from_json(json: &str) -> Result<Vec<PoolQuestion>, EngineError> {
    let pool: Vec<PoolQuestion> = serde_json::from_str(json)?;
    if pool.is_empty() {
        return Err(EngineError::InvalidContent(
            "question pool is empty".to_string(),
        ));
    }
    for (index, question) in pool.iter().enumerate() {
        if question.options.is_empty() {
            return Err(EngineError::InvalidContent(format!(
                "question at index {} has no options",
                index
            )));
        }
    }
    Ok(pool)
}
