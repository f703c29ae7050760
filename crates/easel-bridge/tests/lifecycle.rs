mod common;

use common::{FakeEngine, RecordingProvider, entries, trace};
use easel_bridge::{
    BridgeConfig, BridgeError, ClosureHandlers, FrameLifecycleBridge, Lifecycle, Modifiers, MouseEvent, Phase,
    RunState, UnregisteredDrawPolicy,
};

type Bridge = FrameLifecycleBridge<FakeEngine, RecordingProvider>;

fn bridge_with(provider: RecordingProvider, policy: UnregisteredDrawPolicy) -> Bridge {
    let config = BridgeConfig {
        unregistered_draw: policy,
    };
    FrameLifecycleBridge::new(FakeEngine::headless(), provider, config).unwrap()
}

fn bridge(provider: RecordingProvider) -> Bridge {
    bridge_with(provider, UnregisteredDrawPolicy::default())
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn unreachable_provider_fails_session_start() {
    let t = trace();
    let mut p = RecordingProvider::new(&["setup"], &t);
    p.unreachable = true;

    let result = FrameLifecycleBridge::new(FakeEngine::headless(), p, BridgeConfig::default());
    assert!(matches!(result, Err(BridgeError::BoundaryUnavailable(ref m)) if m.contains("closed")));
    assert!(entries(&t).is_empty());
}

#[test]
fn duplicate_and_unknown_names_collapse() {
    let t = trace();
    let b = bridge(RecordingProvider::new(&["draw", "draw", "setup", "not_a_phase"], &t));
    assert_eq!(b.handlers().len(), 2);
    assert!(b.handlers().contains(Phase::Draw));
    assert!(b.handlers().contains(Phase::Setup));
}

// ============================================================================
// Dispatch and defaults
// ============================================================================

#[test]
fn registered_phases_reach_the_handler_once_per_call() {
    let t = trace();
    let mut b = bridge(RecordingProvider::new(
        &["settings", "setup", "draw", "mouse_pressed", "key_typed"],
        &t,
    ));

    b.settings();
    b.setup();
    b.draw();
    b.mouse_pressed();
    b.key_typed();
    b.draw();

    assert_eq!(entries(&t), vec![
        "settings", "setup", "draw", "mouse_pressed", "key_typed", "draw"
    ]);
    assert_eq!(b.engine().default_settings, 0);
    assert_eq!(b.engine().default_setup, 0);
    assert_eq!(b.frame_count(), 2);
}

#[test]
fn unregistered_settings_and_setup_fall_back_to_engine_defaults() {
    let t = trace();
    let mut b = bridge(RecordingProvider::new(&["draw"], &t));
    b.settings();
    b.setup();
    assert_eq!(b.engine().default_settings, 1);
    assert_eq!(b.engine().default_setup, 1);
    assert!(entries(&t).is_empty());
}

#[test]
fn unregistered_input_phases_are_skipped() {
    let t = trace();
    let mut b = bridge(RecordingProvider::new(&["draw"], &t));
    b.mouse_moved();
    b.mouse_entered();
    b.key_pressed();
    b.mouse_wheel(&MouseEvent::wheel(0.0, 0.0, 1, Modifiers::default()));
    assert!(entries(&t).is_empty());
    assert!(b.run_state().is_healthy());
}

#[test]
fn unregistered_draw_stops_looping_under_default_policy() {
    let t = trace();
    let mut b = bridge(RecordingProvider::new(&["setup"], &t));
    b.draw();
    assert!(!b.engine().looping);
    assert_eq!(b.engine().default_draw, 0);
}

#[test]
fn unregistered_draw_runs_engine_default_when_configured() {
    let t = trace();
    let mut b = bridge_with(RecordingProvider::new(&["setup"], &t), UnregisteredDrawPolicy::DefaultDraw);
    for _ in 0..3 {
        b.draw();
    }
    assert!(b.engine().looping);
    assert_eq!(b.engine().default_draw, 3);
}

#[test]
fn wheel_event_reaches_the_handler_unchanged() {
    let t = trace();
    let mut b = bridge(RecordingProvider::new(&["mouse_wheel"], &t));
    let ev = MouseEvent::wheel(10.0, 20.0, -2, Modifiers {
        shift: true,
        ..Modifiers::default()
    });
    b.mouse_wheel(&ev);
    assert_eq!(b.provider().events, vec![ev]);
}

// ============================================================================
// Degraded run state
// ============================================================================

#[test]
fn draw_failing_on_third_call_stops_all_later_draws() {
    let t = trace();
    let p = RecordingProvider::new(&["setup", "draw"], &t).failing_on(Phase::Draw, 3);
    let mut b = bridge(p);

    b.setup();
    for frame in 1..=10 {
        b.draw();
        let expected = if frame < 3 {
            RunState::Healthy
        } else {
            RunState::Degraded
        };
        assert_eq!(b.run_state(), expected, "after frame {frame}");
    }

    assert_eq!(b.provider().calls(Phase::Draw), 3);
    assert_eq!(b.engine().default_draw, 0);
    assert_eq!(b.engine().no_loop_calls, 0);
    assert_eq!(b.frame_count(), 10);
}

#[test]
fn degraded_bridge_skips_every_per_frame_phase() {
    let t = trace();
    let names = [
        "setup", "draw", "pre_draw", "post_draw", "mouse_pressed", "mouse_dragged", "mouse_wheel",
        "key_pressed", "key_released", "exiting",
    ];
    let p = RecordingProvider::new(&names, &t).failing(Phase::Setup);
    let mut b = bridge(p);

    b.setup();
    assert!(b.run_state().is_degraded());

    b.draw();
    b.mouse_pressed();
    b.mouse_dragged();
    b.mouse_wheel(&MouseEvent::wheel(0.0, 0.0, 1, Modifiers::default()));
    b.key_pressed();
    b.key_released();
    b.setup();
    assert_eq!(entries(&t), vec!["setup"]);
    assert_eq!(b.engine().default_setup, 0);

    b.exit_actual();
    assert_eq!(entries(&t), vec!["setup", "exiting", "runtime_shutdown"]);
    assert!(b.is_dead_from_error());
}

#[test]
fn pre_draw_failure_degrades_before_draw_runs() {
    let t = trace();
    let p = RecordingProvider::new(&["pre_draw", "draw", "post_draw"], &t).failing(Phase::PreDraw);
    let mut b = bridge(p);
    b.draw();
    b.draw();
    assert_eq!(entries(&t), vec!["pre_draw"]);
}

#[test]
fn draw_failure_still_lets_nothing_after_it_run() {
    let t = trace();
    let p = RecordingProvider::new(&["pre_draw", "draw", "post_draw"], &t).failing(Phase::Draw);
    let mut b = bridge(p);
    b.draw();
    assert_eq!(entries(&t), vec!["pre_draw", "draw"]);
}

// ============================================================================
// Session status
// ============================================================================

#[test]
fn session_moves_from_ready_to_running_to_dead() {
    let t = trace();
    let mut b = bridge(RecordingProvider::new(&["draw"], &t));
    assert!(b.is_ready());
    b.draw();
    assert!(b.is_running());
    b.exit_actual();
    assert!(b.is_dead());
    assert!(!b.is_dead_from_error());
}

#[test]
fn calls_after_exit_are_ignored() {
    let t = trace();
    let mut b = bridge(RecordingProvider::new(&["draw", "key_typed", "exiting"], &t));
    b.exit_actual();
    b.draw();
    b.key_typed();
    b.exit_actual();
    assert_eq!(entries(&t), vec!["exiting", "runtime_shutdown"]);
    assert_eq!(b.provider().shutdown_calls, 1);
}

// ============================================================================
// Closure-backed provider end to end
// ============================================================================

#[test]
fn closure_handlers_drive_a_session() {
    use std::cell::Cell;
    use std::rc::Rc;

    let frames = Rc::new(Cell::new(0u32));
    let exited = Rc::new(Cell::new(false));

    let handlers = ClosureHandlers::new()
        .setup(|| Ok(()))
        .draw({
            let frames = frames.clone();
            move || {
                frames.set(frames.get() + 1);
                if frames.get() == 2 {
                    anyhow::bail!("boom");
                }
                Ok(())
            }
        })
        .exiting({
            let exited = exited.clone();
            move || {
                exited.set(true);
                Ok(())
            }
        });

    let mut b = FrameLifecycleBridge::new(FakeEngine::headless(), handlers, BridgeConfig::default()).unwrap();
    b.setup();
    for _ in 0..5 {
        b.draw();
    }
    b.exit_actual();

    assert_eq!(frames.get(), 2);
    assert!(exited.get());
    assert!(b.is_dead_from_error());
}
