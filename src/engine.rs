//! Session orchestration
//!
//! The engine owns the behavior tracker, the screen-phase state machine
//! (intro → questions → thinking → result), the question set selected for
//! the attempt, and the injected random source. It exposes two surfaces:
//! explicit-timestamp operations for hosts that schedule their own events,
//! and fire-and-forget `on_*` methods that stamp the current time.
//!
//! Scheduled callbacks (the periodic movement sampler) carry a
//! [`SessionEpoch`]; a tick whose epoch predates the latest restart is
//! discarded, so stale timers can never mutate a record created after
//! `restart`.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::archetype::insight::generate_insight;
use crate::archetype::resolver::resolve_archetype;
use crate::archetype::table::default_archetype_table;
use crate::archetype::types::{Archetype, ArchetypeTable};
use crate::card::ResultCard;
use crate::quiz::narration::{pick_commentary, pick_micro_observation};
use crate::quiz::pool::default_question_pool;
use crate::quiz::selector::{select_questions, DEFAULT_QUESTION_COUNT};
use crate::quiz::types::{PoolQuestion, Question};
use crate::tracker::accumulator::BehaviorTracker;
use crate::tracker::record::BehaviorRecord;

/// The screen phases of one quiz attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    Intro,
    Questions,
    Thinking,
    Result,
}

/// Token identifying one tracker lifetime
///
/// Hosts capture the epoch when scheduling a periodic callback and pass it
/// back on every tick; restart invalidates all previously captured epochs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEpoch(u64);

/// The narrative outcome of a finished attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Resolved archetype, description variant included
    pub archetype: Archetype,
    /// Behavior insight text
    pub insight: String,
}

/// Stateful quiz session engine
pub struct QuizEngine {
    tracker: BehaviorTracker,
    pool: Vec<PoolQuestion>,
    table: ArchetypeTable,
    question_count: usize,
    rng: StdRng,
    phase: QuizPhase,
    epoch: u64,
    questions: Vec<Question>,
    current_question: usize,
    outcome: Option<QuizOutcome>,
    commentary_shown: bool,
}

impl QuizEngine {
    /// Create an engine with the default pool, table, and question count
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self::with_content(
            default_question_pool(),
            default_archetype_table(),
            DEFAULT_QUESTION_COUNT,
            started_at,
        )
    }

    /// Create an engine with custom content
    pub fn with_content(
        pool: Vec<PoolQuestion>,
        table: ArchetypeTable,
        question_count: usize,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tracker: BehaviorTracker::new(started_at),
            pool,
            table,
            question_count,
            rng: StdRng::from_entropy(),
            phase: QuizPhase::Intro,
            epoch: 0,
            questions: Vec::new(),
            current_question: 0,
            outcome: None,
            commentary_shown: false,
        }
    }

    /// Replace the random source with a seeded one for deterministic runs
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current screen phase
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Epoch token for the current session
    pub fn epoch(&self) -> SessionEpoch {
        SessionEpoch(self.epoch)
    }

    /// The behavior tracker (read access)
    pub fn tracker(&self) -> &BehaviorTracker {
        &self.tracker
    }

    /// Read-only snapshot of the behavior record
    pub fn record(&self) -> &BehaviorRecord {
        self.tracker.record()
    }

    /// The question set selected for this attempt (empty before `begin`)
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question currently presented, while in the questions phase
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == QuizPhase::Questions {
            self.questions.get(self.current_question)
        } else {
            None
        }
    }

    /// The outcome of a finished attempt
    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    /// Start the attempt: record the first interaction and select the
    /// question set from the behavior snapshot taken at this moment
    ///
    /// Selection happens exactly once per attempt. Ignored outside the
    /// intro phase.
    pub fn begin(&mut self, at: DateTime<Utc>) {
        if self.phase != QuizPhase::Intro {
            debug!(phase = ?self.phase, "begin ignored outside intro");
            return;
        }
        self.tracker.record_first_interaction(at);
        let snapshot = self.tracker.record().clone();
        self.questions =
            select_questions(&self.pool, self.question_count, &snapshot, &mut self.rng);
        self.current_question = 0;
        self.phase = QuizPhase::Questions;
    }

    /// Record an answer to the current question and advance
    ///
    /// The final answer moves the attempt into the thinking phase. Ignored
    /// outside the questions phase.
    pub fn answer(&mut self, option_id: &str, at: DateTime<Utc>) {
        if self.phase != QuizPhase::Questions {
            debug!(phase = ?self.phase, "answer ignored outside questions");
            return;
        }
        self.tracker.record_answer(option_id, at);
        self.current_question += 1;
        if self.current_question >= self.questions.len() {
            self.phase = QuizPhase::Thinking;
        }
    }

    /// Finish the thinking phase: resolve the archetype and insight
    ///
    /// Ignored outside the thinking phase.
    pub fn complete_thinking(&mut self) {
        if self.phase != QuizPhase::Thinking {
            debug!(phase = ?self.phase, "complete_thinking ignored");
            return;
        }
        let record = self.tracker.record().clone();
        let archetype = resolve_archetype(record.behavior_score, &self.table, &mut self.rng);
        let insight = generate_insight(&record);
        self.outcome = Some(QuizOutcome { archetype, insight });
        self.phase = QuizPhase::Result;
    }

    /// Compose the shareable result card for a finished attempt
    pub fn result_card(&self, computed_at: DateTime<Utc>) -> Option<ResultCard> {
        self.outcome.as_ref().map(|outcome| {
            ResultCard::compose(
                outcome.archetype.clone(),
                outcome.insight.clone(),
                self.tracker.record(),
                computed_at,
            )
        })
    }

    /// Discard the session and return to the intro phase
    ///
    /// Replaces the behavior record wholesale, restarts the session clock,
    /// and bumps the epoch so outstanding scheduled callbacks go stale.
    /// Safe to call from any phase.
    pub fn restart(&mut self, at: DateTime<Utc>) {
        self.tracker.reset(at);
        self.epoch += 1;
        self.questions.clear();
        self.current_question = 0;
        self.outcome = None;
        self.commentary_shown = false;
        self.phase = QuizPhase::Intro;
    }

    /// Periodic movement-sampling tick
    ///
    /// Ticks scheduled before the latest restart carry a stale epoch and
    /// are discarded.
    pub fn movement_tick(&mut self, epoch: SessionEpoch) {
        if epoch != self.epoch() {
            debug!("stale movement tick discarded");
            return;
        }
        self.tracker.sample_movement();
    }

    /// The mid-quiz commentary line, at most once per session
    pub fn take_commentary(&mut self) -> Option<&'static str> {
        if self.commentary_shown {
            return None;
        }
        self.commentary_shown = true;
        Some(pick_commentary(&mut self.rng))
    }

    /// A per-click micro-observation line
    pub fn micro_observation(&mut self) -> &'static str {
        pick_micro_observation(&mut self.rng)
    }

    // Fire-and-forget surface: each stamps the current time and forwards to
    // the matching tracker operation.

    /// First engagement with the page (idempotent)
    pub fn on_first_interaction(&mut self) {
        self.tracker.record_first_interaction(Utc::now());
    }

    /// Start the attempt now
    pub fn on_begin(&mut self) {
        self.begin(Utc::now());
    }

    /// Answer the current question now
    pub fn on_answer(&mut self, option_id: &str) {
        self.answer(option_id, Utc::now());
    }

    /// Hover entered an answer option
    pub fn on_hover_start(&mut self) {
        self.tracker.record_hover_start(Utc::now());
    }

    /// Hover left an answer option
    pub fn on_hover_end(&mut self) {
        self.tracker.record_hover_end(Utc::now());
    }

    /// A scroll event fired
    pub fn on_scroll(&mut self) {
        self.tracker.record_scroll();
    }

    /// A scroll-depth ratio was observed
    pub fn on_scroll_depth(&mut self, depth: f64) {
        self.tracker.record_scroll_depth(depth);
    }

    /// One mouse-movement event
    pub fn on_mouse_move(&mut self) {
        self.tracker.record_mouse_move();
    }

    /// Externally-judged score bonus
    pub fn add_behavior_score(&mut self, delta: u32) {
        self.tracker.add_behavior_score(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap()
    }

    fn at(ms: i64) -> DateTime<Utc> {
        t0() + Duration::milliseconds(ms)
    }

    fn engine() -> QuizEngine {
        QuizEngine::new(t0()).with_rng_seed(42)
    }

    #[test]
    fn test_full_attempt_flow() {
        let mut engine = engine();
        assert_eq!(engine.phase(), QuizPhase::Intro);

        engine.begin(at(1000));
        assert_eq!(engine.phase(), QuizPhase::Questions);
        assert_eq!(engine.questions().len(), 8);
        assert_eq!(engine.current_question().unwrap().id, 1);

        let mut clock = 1000;
        for _ in 0..8 {
            clock += 1500;
            engine.answer("a", at(clock));
        }
        assert_eq!(engine.phase(), QuizPhase::Thinking);

        engine.complete_thinking();
        assert_eq!(engine.phase(), QuizPhase::Result);

        let outcome = engine.outcome().unwrap();
        // 8 fast answers: score 8, lowest bucket
        assert_eq!(engine.record().behavior_score, 8);
        assert_eq!(outcome.archetype.id, "surface-level");

        let card = engine.result_card(at(clock)).unwrap();
        assert_eq!(card.behavior.answer_count, 8);
    }

    #[test]
    fn test_selection_happens_once_per_attempt() {
        let mut engine = engine();
        engine.begin(at(1000));
        let first: Vec<String> = engine.questions().iter().map(|q| q.text.clone()).collect();

        // A second begin in the questions phase is ignored
        engine.begin(at(2000));
        let second: Vec<String> = engine.questions().iter().map(|q| q.text.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_phase_calls_are_ignored() {
        let mut engine = engine();

        // Answer before begin does nothing
        engine.answer("a", at(500));
        assert!(engine.record().answers.is_empty());

        // Thinking completion before thinking does nothing
        engine.complete_thinking();
        assert!(engine.outcome().is_none());
        assert_eq!(engine.phase(), QuizPhase::Intro);
    }

    #[test]
    fn test_conditioned_selection_from_begin_snapshot() {
        // Scrolling before begin makes the scroll-conditioned questions
        // eligible at selection time
        for seed in 0..10 {
            let mut engine = QuizEngine::new(t0()).with_rng_seed(seed);
            engine.on_scroll();
            engine.begin(at(1000));
            assert_eq!(engine.questions().len(), 8);
        }
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut engine = engine();
        engine.begin(at(1000));
        engine.answer("a", at(9500));
        engine.on_scroll_depth(0.6);

        engine.restart(at(20_000));

        assert_eq!(engine.phase(), QuizPhase::Intro);
        assert!(engine.questions().is_empty());
        assert!(engine.outcome().is_none());
        assert_eq!(engine.record().behavior_score, 0);
        assert_eq!(engine.record().time_to_first_interaction_ms, None);
    }

    #[test]
    fn test_stale_movement_tick_discarded() {
        let mut engine = engine();
        let stale = engine.epoch();

        for _ in 0..50 {
            engine.on_mouse_move();
        }
        engine.restart(at(1000));

        // The pre-restart tick must not touch the fresh record
        engine.movement_tick(stale);
        assert_eq!(
            engine.record().mouse_movement_intensity,
            crate::tracker::record::MouseMovementIntensity::Low
        );

        // A current-epoch tick samples normally
        for _ in 0..50 {
            engine.on_mouse_move();
        }
        let current = engine.epoch();
        engine.movement_tick(current);
        assert_eq!(
            engine.record().mouse_movement_intensity,
            crate::tracker::record::MouseMovementIntensity::Medium
        );
    }

    #[test]
    fn test_commentary_shown_once_per_session() {
        let mut engine = engine();

        assert!(engine.take_commentary().is_some());
        assert!(engine.take_commentary().is_none());

        engine.restart(at(1000));
        assert!(engine.take_commentary().is_some());
    }

    #[test]
    fn test_slow_deliberate_attempt_scores_higher() {
        let mut engine = engine();
        engine.on_scroll();
        engine.begin(at(12_000));

        let mut clock = 12_000;
        for _ in 0..8 {
            engine.tracker_hover(at(clock + 100), at(clock + 2600));
            clock += 8000;
            engine.answer("c", at(clock));
        }
        engine.on_scroll_depth(0.6);
        engine.complete_thinking();

        // 8 very slow answers (24) + 8 long hovers (8) + deep scroll (1) = 33
        assert_eq!(engine.record().behavior_score, 33);
        assert_eq!(
            engine.outcome().unwrap().archetype.id,
            "uncomfortably-observant"
        );
    }

    impl QuizEngine {
        fn tracker_hover(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
            self.tracker.record_hover_start(start);
            self.tracker.record_hover_end(end);
        }
    }
}
