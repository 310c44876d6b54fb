//! Behavior accumulation module
//!
//! This module observes the user's interaction behavior (timing, hovering,
//! scrolling, mouse movement) and accumulates it into a per-session
//! [`BehaviorRecord`] with a running behavior score.
//!
//! Flow: interaction events → [`BehaviorTracker`] (stateful) → record
//! snapshot consumed by question selection and archetype resolution.

pub mod accumulator;
pub mod record;
pub mod sampler;

pub use accumulator::BehaviorTracker;
pub use record::{BehaviorRecord, InteractionEvent, InteractionKind, MouseMovementIntensity};
