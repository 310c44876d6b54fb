//! Question selection module
//!
//! Holds the question data model, the embedded default pool, the selection
//! algorithm conditioned on early-session behavior, and the mid-quiz
//! narration content.

pub mod narration;
pub mod pool;
pub mod selector;
pub mod types;

pub use pool::{default_question_pool, pool_from_json};
pub use selector::{select_questions, DEFAULT_QUESTION_COUNT};
pub use types::{PoolQuestion, Question, QuestionCondition, QuestionOption};
