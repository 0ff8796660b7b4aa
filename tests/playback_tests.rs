// Integration tests for the playback engine

use algoscope::playback::{ManualClock, PlaybackEngine, PlaybackSettings, PlaybackState};
use algoscope::trace::{ArrayView, RunResult, Step, Summary};
use proptest::prelude::*;
use std::time::Duration;

const SECOND: Duration = Duration::from_millis(1000);

fn run_of(len: usize) -> RunResult {
    let steps = (0..len)
        .map(|i| Step::new(format!("step {}", i), ArrayView::capture(&[i as i64])))
        .collect();
    RunResult::new(steps, Summary::default())
}

fn engine() -> PlaybackEngine<ManualClock> {
    PlaybackEngine::with_clock(PlaybackSettings::default(), ManualClock::new())
}

#[test]
fn test_play_runs_to_the_last_step_and_stops() {
    let mut engine = engine();
    engine.load(run_of(10));
    engine.play();
    assert_eq!(engine.state(), PlaybackState::Playing);

    for _ in 0..10 {
        engine.clock().advance(SECOND);
        engine.poll();
    }

    assert_eq!(engine.cursor(), 9);
    assert!(!engine.is_playing());
    assert_eq!(engine.state(), PlaybackState::Finished);
    assert!(engine.pending_tick().is_none());
}

#[test]
fn test_one_long_wait_fires_every_due_tick() {
    let mut engine = engine();
    engine.load(run_of(10));
    engine.play();
    engine.clock().advance(SECOND * 4);
    assert_eq!(engine.poll(), 4);
    assert_eq!(engine.cursor(), 4);
    assert!(engine.is_playing());
}

#[test]
fn test_step_backward_at_start_is_a_no_op() {
    let mut engine = engine();
    engine.load(run_of(3));
    engine.step_backward();
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.state(), PlaybackState::Ready);
}

#[test]
fn test_pause_before_the_tick_cancels_it() {
    let mut engine = engine();
    engine.load(run_of(5));
    engine.play();
    let token = engine.pending_tick().expect("tick armed");

    engine.clock().advance(SECOND / 2);
    engine.pause();
    engine.clock().advance(SECOND * 3);
    assert_eq!(engine.poll(), 0);
    assert_eq!(engine.cursor(), 0);

    // a stale token is ignored even if fired by hand
    assert!(!engine.fire(token));
    assert_eq!(engine.cursor(), 0);
}

#[test]
fn test_load_rewinds_and_stops() {
    let mut engine = engine();
    engine.load(run_of(5));
    engine.play();
    engine.clock().advance(SECOND * 2);
    engine.poll();
    assert_eq!(engine.cursor(), 2);

    engine.load(run_of(3));
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.len(), 3);
    assert!(!engine.is_playing());
}

#[test]
fn test_empty_run_leaves_engine_idle() {
    let mut engine = engine();
    engine.load(run_of(0));
    assert_eq!(engine.state(), PlaybackState::Idle);
    engine.play();
    engine.step_forward();
    assert!(!engine.is_playing());
    assert!(engine.current_step().is_none());
    assert!(engine.summary().is_none());
}

#[test]
fn test_play_on_the_last_step_does_nothing() {
    let mut engine = engine();
    engine.load(run_of(4));
    engine.jump_to_end();
    engine.play();
    assert!(!engine.is_playing());
    assert_eq!(engine.cursor(), 3);
}

#[test]
fn test_speed_is_clamped_and_scales_the_delay() {
    let mut engine = engine();
    engine.set_speed(10.0);
    assert_eq!(engine.speed(), 3.0);
    engine.set_speed(0.01);
    assert_eq!(engine.speed(), 0.25);
    assert_eq!(engine.delay(), SECOND * 4);

    // invalid multipliers are ignored
    engine.set_speed(f64::NAN);
    engine.set_speed(-1.0);
    assert_eq!(engine.speed(), 0.25);
}

#[test]
fn test_inverted_speed_bounds_do_not_panic() {
    let settings = PlaybackSettings {
        min_speed: 3.0,
        max_speed: 0.25,
        ..PlaybackSettings::default()
    };
    let mut engine = PlaybackEngine::with_clock(settings, ManualClock::new());
    assert_eq!(engine.speed(), 1.0);
    engine.set_speed(10.0);
    assert_eq!(engine.speed(), 3.0);

    engine.load(run_of(3));
    engine.play();
    engine.clock().advance(SECOND * 2);
    assert_eq!(engine.poll(), 2);
    assert_eq!(engine.state(), PlaybackState::Finished);
}

#[test]
fn test_double_speed_halves_the_interval() {
    let mut engine = engine();
    engine.load(run_of(10));
    engine.set_speed(2.0);
    engine.play();
    engine.clock().advance(SECOND);
    assert_eq!(engine.poll(), 2);
    assert_eq!(engine.cursor(), 2);
}

#[test]
fn test_manual_step_while_playing_rebases_the_tick() {
    let mut engine = engine();
    engine.load(run_of(10));
    engine.play();
    engine.clock().advance(SECOND * 3 / 4);
    engine.step_forward();
    assert_eq!(engine.cursor(), 1);
    assert!(engine.is_playing());

    // the old deadline has passed but the new one is a full delay away
    engine.clock().advance(SECOND / 2);
    assert_eq!(engine.poll(), 0);
    engine.clock().advance(SECOND / 2);
    assert_eq!(engine.poll(), 1);
    assert_eq!(engine.cursor(), 2);
}

#[test]
fn test_seek_clamps_to_the_run() {
    let mut engine = engine();
    engine.load(run_of(5));
    engine.seek(2);
    assert_eq!(engine.cursor(), 2);
    engine.seek(100);
    assert_eq!(engine.cursor(), 4);
    engine.reset();
    assert_eq!(engine.cursor(), 0);
}

#[derive(Debug, Clone)]
enum Op {
    Play,
    Pause,
    Toggle,
    Forward,
    Backward,
    Seek(usize),
    End,
    Reset,
    Speed(f64),
    Wait(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Play),
        Just(Op::Pause),
        Just(Op::Toggle),
        Just(Op::Forward),
        Just(Op::Backward),
        (0usize..50).prop_map(Op::Seek),
        Just(Op::End),
        Just(Op::Reset),
        (0.1f64..5.0).prop_map(Op::Speed),
        (0u64..5000).prop_map(Op::Wait),
    ]
}

proptest! {
    #[test]
    fn cursor_stays_within_the_run(len in 0usize..20, ops in prop::collection::vec(op(), 0..60)) {
        let mut engine = engine();
        engine.load(run_of(len));
        for op in ops {
            match op {
                Op::Play => engine.play(),
                Op::Pause => engine.pause(),
                Op::Toggle => engine.toggle(),
                Op::Forward => engine.step_forward(),
                Op::Backward => engine.step_backward(),
                Op::Seek(i) => engine.seek(i),
                Op::End => engine.jump_to_end(),
                Op::Reset => engine.reset(),
                Op::Speed(s) => engine.set_speed(s),
                Op::Wait(ms) => {
                    engine.clock().advance(Duration::from_millis(ms));
                    engine.poll();
                }
            }
            prop_assert!(engine.cursor() < len.max(1));
            prop_assert!(engine.speed() >= 0.25 && engine.speed() <= 3.0);
            if engine.is_playing() {
                prop_assert!(engine.cursor() + 1 < len);
                prop_assert!(engine.pending_tick().is_some());
            } else {
                prop_assert!(engine.pending_tick().is_none());
            }
        }
    }
}
