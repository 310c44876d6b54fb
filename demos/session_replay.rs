//! Replay a scripted session and print the result card

use chrono::{Duration, TimeZone, Utc};
use curio_engine::QuizEngine;

fn main() {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap();
    let at = |ms: i64| t0 + Duration::milliseconds(ms);

    let mut engine = QuizEngine::new(t0).with_rng_seed(42);

    // A hesitant session: scroll before starting, slow deliberate answers
    engine.on_scroll();
    engine.on_scroll_depth(0.45);
    engine.begin(at(6500));

    let mut clock = 6500;
    for question in 0..engine.questions().len() {
        clock += if question % 2 == 0 { 8200 } else { 3100 };
        engine.answer("b", at(clock));
    }
    engine.complete_thinking();

    match engine.result_card(at(clock + 2000)) {
        Some(card) => match card.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e:?}"),
        },
        None => eprintln!("Error: no outcome composed"),
    }
}
