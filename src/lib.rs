//! Curio Engine - Behavior-scoring and adaptive question-selection engine
//!
//! The engine silently accumulates interaction behavior (timing, hovering,
//! scrolling, mouse movement) into a session score, selects a question set
//! conditioned on early-session behavior, and maps the final score to a
//! narrative archetype with a shareable summary card.
//!
//! ## Modules
//!
//! - **Tracker**: Accumulate interaction events into a per-session behavior record
//! - **Quiz**: Select questions from a conditional pool
//! - **Archetype**: Resolve the final score to a narrative outcome
//! - **Engine**: Orchestrate one attempt from intro to result

pub mod archetype;
pub mod card;
pub mod engine;
pub mod error;
pub mod quiz;
pub mod tracker;

pub use archetype::{
    default_archetype_table, generate_insight, resolve_archetype, Archetype, ArchetypeTable,
    ScoreRange,
};
pub use card::ResultCard;
pub use engine::{QuizEngine, QuizOutcome, QuizPhase, SessionEpoch};
pub use error::EngineError;
pub use quiz::{
    default_question_pool, pool_from_json, select_questions, PoolQuestion, Question,
    QuestionCondition, QuestionOption, DEFAULT_QUESTION_COUNT,
};
pub use tracker::{
    BehaviorRecord, BehaviorTracker, InteractionEvent, InteractionKind, MouseMovementIntensity,
};

/// Engine version stamped on result cards
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name stamped on result cards
pub const PRODUCER_NAME: &str = "curio-engine";
