//! Behavior accumulation
//!
//! The tracker ingests discrete interaction events and maintains the
//! session's [`BehaviorRecord`]. All mutations happen through the
//! `record_*` operations; each takes an explicit timestamp so event
//! delivery is deterministic and replayable. Every operation runs to
//! completion synchronously; the record needs no locking, only serialized
//! event delivery.

use chrono::{DateTime, Utc};

use crate::tracker::record::{BehaviorRecord, InteractionEvent, InteractionKind};
use crate::tracker::sampler::classify_movement;

/// Answer gaps above this add one bonus point (milliseconds)
pub const SLOW_ANSWER_THRESHOLD_MS: u64 = 4000;

/// Answer gaps above this add two bonus points instead (milliseconds)
pub const VERY_SLOW_ANSWER_THRESHOLD_MS: u64 = 7000;

/// Hover spans above this add one point (milliseconds)
pub const LONG_HOVER_THRESHOLD_MS: u64 = 2000;

/// Scroll-depth ratio whose first crossing adds one point
pub const DEEP_SCROLL_THRESHOLD: f64 = 0.3;

/// Scroll depth above this counts as recent activity for display purposes
pub const RECENT_ACTIVITY_SCROLL_DEPTH: f64 = 0.25;

/// Total hover time above this counts as recent activity (milliseconds)
pub const RECENT_ACTIVITY_HOVER_MS: u64 = 4000;

/// Session-scoped behavior accumulator
///
/// Owns the [`BehaviorRecord`] together with the transient session state
/// (session clock origin, answer-gap marker, open hover mark, movement
/// counter) that the record itself does not expose.
#[derive(Debug, Clone)]
pub struct BehaviorTracker {
    record: BehaviorRecord,
    session_started_at: DateTime<Utc>,
    last_answer_marker: DateTime<Utc>,
    hover_started_at: Option<DateTime<Utc>>,
    movement_events: u32,
    has_interacted: bool,
}

impl BehaviorTracker {
    /// Create a fresh tracker with the session clock starting at `started_at`
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            record: BehaviorRecord::default(),
            session_started_at: started_at,
            last_answer_marker: started_at,
            hover_started_at: None,
            movement_events: 0,
            has_interacted: false,
        }
    }

    /// Read-only snapshot of the accumulated record
    pub fn record(&self) -> &BehaviorRecord {
        &self.record
    }

    /// When the current session started
    pub fn session_started_at(&self) -> DateTime<Utc> {
        self.session_started_at
    }

    /// Record the first engagement with the page
    ///
    /// Write-once: calls after the first are ignored. Also moves the
    /// answer-gap marker so the first answer is timed from here.
    pub fn record_first_interaction(&mut self, at: DateTime<Utc>) {
        if self.has_interacted {
            return;
        }
        self.has_interacted = true;
        self.record.time_to_first_interaction_ms =
            Some(elapsed_ms(self.session_started_at, at));
        self.last_answer_marker = at;
    }

    /// Record a chosen answer option
    ///
    /// The gap since the previous answer (or the first interaction) is
    /// appended to the timings; the score grows by 1, by 2 for gaps above
    /// [`SLOW_ANSWER_THRESHOLD_MS`], or by 3 for gaps above
    /// [`VERY_SLOW_ANSWER_THRESHOLD_MS`] (the larger bonus wins).
    pub fn record_answer(&mut self, option_id: &str, at: DateTime<Utc>) {
        let gap = elapsed_ms(self.last_answer_marker, at);
        self.last_answer_marker = at;

        let delta = if gap > VERY_SLOW_ANSWER_THRESHOLD_MS {
            3
        } else if gap > SLOW_ANSWER_THRESHOLD_MS {
            2
        } else {
            1
        };

        self.record.answer_timings_ms.push(gap);
        self.record.answers.push(option_id.to_string());
        self.record.behavior_score += delta;
    }

    /// Mark the start of a hover span
    ///
    /// A second call before [`record_hover_end`](Self::record_hover_end)
    /// overwrites the previous mark; spans do not stack.
    pub fn record_hover_start(&mut self, at: DateTime<Utc>) {
        self.hover_started_at = Some(at);
    }

    /// Complete an open hover span
    ///
    /// No-op without an open mark. Spans longer than
    /// [`LONG_HOVER_THRESHOLD_MS`] add one point.
    pub fn record_hover_end(&mut self, at: DateTime<Utc>) {
        if let Some(started) = self.hover_started_at.take() {
            let duration = elapsed_ms(started, at);
            self.record.hover_hesitations_ms.push(duration);
            self.record.total_hover_time_ms += duration;
            if duration > LONG_HOVER_THRESHOLD_MS {
                self.record.behavior_score += 1;
            }
        }
    }

    /// Note a scroll event; only meaningful before the first interaction
    pub fn record_scroll(&mut self) {
        if !self.has_interacted {
            self.record.scrolled_before_first_click = true;
        }
    }

    /// Update the running scroll-depth maximum
    ///
    /// One point is awarded the instant the maximum first crosses above
    /// [`DEEP_SCROLL_THRESHOLD`]; later crossings never re-award it.
    pub fn record_scroll_depth(&mut self, depth: f64) {
        let depth = depth.clamp(0.0, 1.0);
        if depth > DEEP_SCROLL_THRESHOLD && self.record.scroll_depth <= DEEP_SCROLL_THRESHOLD {
            self.record.behavior_score += 1;
        }
        if depth > self.record.scroll_depth {
            self.record.scroll_depth = depth;
        }
    }

    /// Unconditional additive score adjustment for externally-judged bonuses
    pub fn add_behavior_score(&mut self, delta: u32) {
        self.record.behavior_score += delta;
    }

    /// Count one mouse-movement event toward the current sampling window
    pub fn record_mouse_move(&mut self) {
        self.movement_events = self.movement_events.saturating_add(1);
    }

    /// Close the current sampling window: classify its movement-event count
    /// and reset the counter
    ///
    /// The host scheduler calls this every
    /// [`MOVEMENT_SAMPLE_INTERVAL_MS`](crate::tracker::sampler::MOVEMENT_SAMPLE_INTERVAL_MS).
    pub fn sample_movement(&mut self) {
        self.record.mouse_movement_intensity = classify_movement(self.movement_events);
        self.movement_events = 0;
    }

    /// Replace the whole record with fresh defaults and restart the session
    /// clock
    pub fn reset(&mut self, at: DateTime<Utc>) {
        *self = Self::new(at);
    }

    /// Whether the session shows recent activity worth reflecting in the UI
    pub fn recent_activity(&self) -> bool {
        self.record.scroll_depth > RECENT_ACTIVITY_SCROLL_DEPTH
            || self.record.total_hover_time_ms > RECENT_ACTIVITY_HOVER_MS
    }

    /// Dispatch a recorded interaction event to the matching operation
    pub fn apply(&mut self, event: &InteractionEvent) {
        match &event.kind {
            InteractionKind::FirstInteraction => self.record_first_interaction(event.timestamp),
            InteractionKind::Answer { option_id } => {
                self.record_answer(option_id, event.timestamp)
            }
            InteractionKind::HoverStart => self.record_hover_start(event.timestamp),
            InteractionKind::HoverEnd => self.record_hover_end(event.timestamp),
            InteractionKind::Scroll => self.record_scroll(),
            InteractionKind::ScrollDepth { depth } => self.record_scroll_depth(*depth),
            InteractionKind::MouseMove => self.record_mouse_move(),
            InteractionKind::MovementSample => self.sample_movement(),
        }
    }
}

/// Milliseconds from `from` to `to`, clamped at zero for out-of-order stamps
fn elapsed_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from).num_milliseconds().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::record::MouseMovementIntensity;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap()
    }

    fn at(ms: i64) -> DateTime<Utc> {
        t0() + Duration::milliseconds(ms)
    }

    #[test]
    fn test_first_interaction_is_write_once() {
        let mut tracker = BehaviorTracker::new(t0());

        tracker.record_first_interaction(at(1200));
        tracker.record_first_interaction(at(9000));

        assert_eq!(tracker.record().time_to_first_interaction_ms, Some(1200));
    }

    #[test]
    fn test_answer_score_deltas() {
        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_first_interaction(at(0));

        // Gap 3000ms: fast, +1
        tracker.record_answer("a", at(3000));
        assert_eq!(tracker.record().behavior_score, 1);

        // Gap 5000ms: slow, +2
        tracker.record_answer("b", at(8000));
        assert_eq!(tracker.record().behavior_score, 3);

        // Gap 8000ms: very slow, +3 (not cumulative with +2)
        tracker.record_answer("c", at(16_000));
        assert_eq!(tracker.record().behavior_score, 6);

        assert_eq!(tracker.record().answer_timings_ms, vec![3000, 5000, 8000]);
        assert_eq!(tracker.record().answers, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_answer_threshold_boundaries() {
        // Exactly 4000ms is not "slow", exactly 7000ms is not "very slow"
        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_first_interaction(at(0));

        tracker.record_answer("a", at(4000));
        assert_eq!(tracker.record().behavior_score, 1);

        tracker.record_answer("b", at(11_000));
        assert_eq!(tracker.record().behavior_score, 3);
    }

    #[test]
    fn test_first_answer_timed_from_first_interaction() {
        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_first_interaction(at(2000));
        tracker.record_answer("a", at(3000));

        assert_eq!(tracker.record().answer_timings_ms, vec![1000]);
    }

    #[test]
    fn test_answer_without_first_interaction_times_from_session_start() {
        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_answer("a", at(1500));

        assert_eq!(tracker.record().answer_timings_ms, vec![1500]);
    }

    #[test]
    fn test_hover_span_and_bonus() {
        let mut tracker = BehaviorTracker::new(t0());

        tracker.record_hover_start(at(0));
        tracker.record_hover_end(at(2500));

        assert_eq!(tracker.record().hover_hesitations_ms, vec![2500]);
        assert_eq!(tracker.record().total_hover_time_ms, 2500);
        assert_eq!(tracker.record().behavior_score, 1);

        // Short hover accumulates time but no point
        tracker.record_hover_start(at(3000));
        tracker.record_hover_end(at(4000));

        assert_eq!(tracker.record().total_hover_time_ms, 3500);
        assert_eq!(tracker.record().behavior_score, 1);
    }

    #[test]
    fn test_hover_start_overwrites_open_mark() {
        let mut tracker = BehaviorTracker::new(t0());

        tracker.record_hover_start(at(0));
        tracker.record_hover_start(at(5000));
        tracker.record_hover_end(at(6000));

        assert_eq!(tracker.record().hover_hesitations_ms, vec![1000]);
    }

    #[test]
    fn test_hover_end_without_mark_is_noop() {
        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_hover_end(at(1000));

        assert!(tracker.record().hover_hesitations_ms.is_empty());
        assert_eq!(tracker.record().behavior_score, 0);
    }

    #[test]
    fn test_scroll_before_first_click() {
        let mut tracker = BehaviorTracker::new(t0());

        tracker.record_scroll();
        assert!(tracker.record().scrolled_before_first_click);

        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_first_interaction(at(100));
        tracker.record_scroll();
        assert!(!tracker.record().scrolled_before_first_click);
    }

    #[test]
    fn test_scroll_depth_bonus_awarded_once() {
        let mut tracker = BehaviorTracker::new(t0());

        tracker.record_scroll_depth(0.1);
        assert_eq!(tracker.record().behavior_score, 0);

        tracker.record_scroll_depth(0.4);
        assert_eq!(tracker.record().behavior_score, 1);

        // Shallower reading does not lower the maximum
        tracker.record_scroll_depth(0.2);
        assert_eq!(tracker.record().scroll_depth, 0.4);

        // Crossing again never re-awards
        tracker.record_scroll_depth(0.5);
        assert_eq!(tracker.record().behavior_score, 1);
        assert_eq!(tracker.record().scroll_depth, 0.5);
    }

    #[test]
    fn test_scroll_depth_clamped() {
        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_scroll_depth(1.7);

        assert_eq!(tracker.record().scroll_depth, 1.0);
        assert_eq!(tracker.record().behavior_score, 1);
    }

    #[test]
    fn test_movement_sampling_classifies_and_resets() {
        let mut tracker = BehaviorTracker::new(t0());

        for _ in 0..45 {
            tracker.record_mouse_move();
        }
        tracker.sample_movement();
        assert_eq!(
            tracker.record().mouse_movement_intensity,
            MouseMovementIntensity::Medium
        );

        // Counter reset: an empty window drops back to low
        tracker.sample_movement();
        assert_eq!(
            tracker.record().mouse_movement_intensity,
            MouseMovementIntensity::Low
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_first_interaction(at(500));
        tracker.record_answer("a", at(9000));
        tracker.record_scroll_depth(0.8);
        tracker.record_hover_start(at(9100));

        tracker.reset(at(10_000));

        let record = tracker.record();
        assert_eq!(record.time_to_first_interaction_ms, None);
        assert!(record.answers.is_empty());
        assert_eq!(record.scroll_depth, 0.0);
        assert_eq!(record.behavior_score, 0);
        assert_eq!(tracker.session_started_at(), at(10_000));

        // The open hover mark died with the old session
        tracker.record_hover_end(at(11_000));
        assert!(tracker.record().hover_hesitations_ms.is_empty());

        // The clock restarted
        tracker.record_first_interaction(at(10_400));
        assert_eq!(tracker.record().time_to_first_interaction_ms, Some(400));
    }

    #[test]
    fn test_recent_activity_thresholds() {
        let mut tracker = BehaviorTracker::new(t0());
        assert!(!tracker.recent_activity());

        tracker.record_scroll_depth(0.26);
        assert!(tracker.recent_activity());

        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_hover_start(at(0));
        tracker.record_hover_end(at(4500));
        assert!(tracker.recent_activity());
    }

    #[test]
    fn test_score_is_monotone() {
        let mut tracker = BehaviorTracker::new(t0());
        let mut last = 0;
        let mut clock = 0;

        for i in 0..20 {
            clock += 1000 * (i % 9);
            tracker.record_answer("a", at(clock));
            let score = tracker.record().behavior_score;
            assert!(score >= last);
            assert!(score - last >= 1 && score - last <= 3);
            last = score;
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        // First interaction at t=0, answer after 8s (+3), hover 2.5s (+1),
        // deep scroll (+1): final score 5
        let mut tracker = BehaviorTracker::new(t0());
        tracker.record_first_interaction(at(0));
        tracker.record_answer("a", at(8000));
        tracker.record_hover_start(at(8100));
        tracker.record_hover_end(at(10_600));
        tracker.record_scroll_depth(0.35);

        assert_eq!(tracker.record().behavior_score, 5);
    }

    #[test]
    fn test_apply_replays_events() {
        use crate::tracker::record::{InteractionEvent, InteractionKind};

        let events = vec![
            InteractionEvent {
                timestamp: at(0),
                kind: InteractionKind::FirstInteraction,
            },
            InteractionEvent {
                timestamp: at(8000),
                kind: InteractionKind::Answer {
                    option_id: "a".to_string(),
                },
            },
            InteractionEvent {
                timestamp: at(8100),
                kind: InteractionKind::HoverStart,
            },
            InteractionEvent {
                timestamp: at(10_600),
                kind: InteractionKind::HoverEnd,
            },
            InteractionEvent {
                timestamp: at(10_700),
                kind: InteractionKind::ScrollDepth { depth: 0.35 },
            },
        ];

        let mut live = BehaviorTracker::new(t0());
        live.record_first_interaction(at(0));
        live.record_answer("a", at(8000));
        live.record_hover_start(at(8100));
        live.record_hover_end(at(10_600));
        live.record_scroll_depth(0.35);

        let mut replayed = BehaviorTracker::new(t0());
        for event in &events {
            replayed.apply(event);
        }

        assert_eq!(
            replayed.record().behavior_score,
            live.record().behavior_score
        );
        assert_eq!(replayed.record().answer_timings_ms, live.record().answer_timings_ms);
    }
}
