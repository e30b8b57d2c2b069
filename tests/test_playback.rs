use std::time::Duration;

use chrono::{TimeDelta, TimeZone};
use chrono_tz::America::Guayaquil;

use sun_tracker_playback::playback::PlaybackController;
use sun_tracker_playback::types::*;

fn trajectory(frames: usize) -> Trajectory {
    let start = Guayaquil.with_ymd_and_hms(2024, 6, 21, 6, 0, 0).unwrap();
    Trajectory::from_samples((0..frames).map(|i| {
        (
            start + TimeDelta::minutes(15 * i as i64),
            SolarAngles {
                elevation: i as f64 * 5.0,
                azimuth: 60.0 + i as f64,
            },
        )
    }))
}

fn loaded(frames: usize) -> PlaybackController {
    let mut c = PlaybackController::new(Duration::from_millis(200));
    c.load(trajectory(frames));
    c
}

/// Fires pending ticks until playback stops, returning every event.
fn run_to_completion(c: &mut PlaybackController) -> Vec<PlaybackEvent> {
    let mut events = Vec::new();
    while let Some(token) = c.pending_tick() {
        events.extend(c.tick(token));
    }
    events
}

// ── Initial state / load ──

#[test]
fn test_new_controller_is_stopped_at_zero() {
    let c = PlaybackController::default();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.current_frame(), 0);
    assert_eq!(c.frame_count(), 0);
    assert_eq!(c.tick_period(), Duration::from_millis(200));
}

#[test]
fn test_load_pauses_at_first_frame() {
    let mut c = PlaybackController::default();
    assert_eq!(c.load(trajectory(4)), Some(PlaybackEvent::Frame(0)));
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.frame_count(), 4);
    assert!(c.pending_tick().is_none());
}

#[test]
fn test_load_empty_trajectory_signals_stop() {
    let mut c = PlaybackController::default();
    assert_eq!(
        c.load(Trajectory::default()),
        Some(PlaybackEvent::Stopped(StopReason::EmptyTrajectory))
    );
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.play(), None);
    assert_eq!(c.step_forward(), None);
    assert_eq!(c.seek(3), None);
    assert_eq!(c.current_frame(), 0);
}

// ── Play / tick ──

#[test]
fn test_play_runs_to_last_frame_and_pauses() {
    let mut c = loaded(5);
    assert_eq!(c.play(), Some(PlaybackEvent::Frame(0)));
    assert_eq!(c.state(), PlaybackState::Playing);

    let events = run_to_completion(&mut c);
    assert_eq!(
        events,
        vec![
            PlaybackEvent::Frame(1),
            PlaybackEvent::Frame(2),
            PlaybackEvent::Frame(3),
            PlaybackEvent::Stopped(StopReason::EndOfTrajectory { frame: 4 }),
        ]
    );
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.current_frame(), 4);
    assert!(c.pending_tick().is_none());
}

#[test]
fn test_play_at_last_frame_is_noop() {
    let mut c = loaded(5);
    c.seek(4);
    assert_eq!(c.play(), None);
    assert_eq!(c.state(), PlaybackState::Paused);
    assert!(c.pending_tick().is_none());
}

#[test]
fn test_play_single_frame_trajectory_is_noop() {
    let mut c = loaded(1);
    assert_eq!(c.play(), None);
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn test_play_while_playing_is_noop() {
    let mut c = loaded(5);
    c.play();
    let token = c.pending_tick();
    assert_eq!(c.play(), None);
    assert_eq!(c.pending_tick(), token);
}

#[test]
fn test_play_resumes_from_current_frame() {
    let mut c = loaded(6);
    c.seek(3);
    c.play();
    let events = run_to_completion(&mut c);
    assert_eq!(
        events,
        vec![
            PlaybackEvent::Frame(4),
            PlaybackEvent::Stopped(StopReason::EndOfTrajectory { frame: 5 }),
        ]
    );
}

// ── Pause ──

#[test]
fn test_pause_keeps_frame_and_cancels_tick() {
    let mut c = loaded(6);
    c.play();
    let token = c.pending_tick().unwrap();
    c.tick(token);
    c.tick(token);
    assert_eq!(c.pause(), Some(PlaybackEvent::Frame(2)));
    assert_eq!(c.state(), PlaybackState::Paused);
    assert!(c.pending_tick().is_none());
    // The tick that was in flight when we paused must not move the frame.
    assert_eq!(c.tick(token), None);
    assert_eq!(c.current_frame(), 2);
}

#[test]
fn test_pause_when_not_playing_is_noop() {
    let mut c = loaded(3);
    assert_eq!(c.pause(), None);
}

#[test]
fn test_toggle_alternates() {
    let mut c = loaded(4);
    assert_eq!(c.toggle(), Some(PlaybackEvent::Frame(0)));
    assert!(c.is_playing());
    assert_eq!(c.toggle(), Some(PlaybackEvent::Frame(0)));
    assert!(!c.is_playing());
}

// ── Step / seek ──

#[test]
fn test_steps_clamp_at_boundaries() {
    let mut c = loaded(3);
    assert_eq!(c.step_back(), None);
    assert_eq!(c.step_forward(), Some(PlaybackEvent::Frame(1)));
    assert_eq!(c.step_forward(), Some(PlaybackEvent::Frame(2)));
    assert_eq!(c.step_forward(), None);
    assert_eq!(c.current_frame(), 2);
    assert_eq!(c.step_back(), Some(PlaybackEvent::Frame(1)));
}

#[test]
fn test_seek_then_step_forward() {
    for k in [0, 3, 8, 9, 50] {
        let mut c = loaded(10);
        c.seek(k);
        c.step_forward();
        assert_eq!(c.current_frame(), (k + 1).min(9), "k={k}");
    }
}

#[test]
fn test_seek_clamps() {
    let mut c = loaded(10);
    assert_eq!(c.seek(99), Some(PlaybackEvent::Frame(9)));
    assert_eq!(c.seek(0), Some(PlaybackEvent::Frame(0)));
}

#[test]
fn test_manual_moves_ignored_while_playing() {
    let mut c = loaded(10);
    c.play();
    assert_eq!(c.seek(7), None);
    assert_eq!(c.step_forward(), None);
    assert_eq!(c.step_back(), None);
    assert_eq!(c.current_frame(), 0);
    assert!(c.is_playing());
}

#[test]
fn test_next_tick_advances_from_scrubbed_frame() {
    let mut c = loaded(10);
    c.play();
    let token = c.pending_tick().unwrap();
    c.tick(token);
    c.tick(token);
    c.tick(token);
    c.pause();

    c.seek(1);
    c.play();
    let token = c.pending_tick().unwrap();
    assert_eq!(c.tick(token), Some(PlaybackEvent::Frame(2)));

    c.pause();
    c.seek(7);
    c.step_back();
    c.play();
    let token = c.pending_tick().unwrap();
    assert_eq!(c.tick(token), Some(PlaybackEvent::Frame(7)));
}

#[test]
fn test_stale_token_from_previous_play_is_ignored() {
    let mut c = loaded(10);
    c.play();
    let old = c.pending_tick().unwrap();
    c.pause();
    c.play();
    let new = c.pending_tick().unwrap();
    assert_ne!(old, new);
    assert_eq!(c.tick(old), None);
    assert_eq!(c.current_frame(), 0);
    assert_eq!(c.tick(new), Some(PlaybackEvent::Frame(1)));
}

// ── Reset ──

#[test]
fn test_reset_from_every_state() {
    let mut c = loaded(5);
    c.seek(3);
    assert_eq!(c.reset(), Some(PlaybackEvent::Frame(0)));
    assert_eq!((c.state(), c.current_frame()), (PlaybackState::Paused, 0));

    c.play();
    let token = c.pending_tick().unwrap();
    c.tick(token);
    assert_eq!(c.reset(), Some(PlaybackEvent::Frame(0)));
    assert_eq!((c.state(), c.current_frame()), (PlaybackState::Paused, 0));
    assert_eq!(c.tick(token), None);

    c.play();
    run_to_completion(&mut c);
    assert_eq!(c.reset(), Some(PlaybackEvent::Frame(0)));
    assert_eq!((c.state(), c.current_frame()), (PlaybackState::Paused, 0));
}

#[test]
fn test_reset_without_trajectory_stays_stopped() {
    let mut c = PlaybackController::default();
    assert_eq!(
        c.reset(),
        Some(PlaybackEvent::Stopped(StopReason::EmptyTrajectory))
    );
    assert_eq!(c.state(), PlaybackState::Stopped);
}

// ── Reload ──

#[test]
fn test_load_while_playing_cancels_pending_tick() {
    let mut c = loaded(10);
    c.play();
    let token = c.pending_tick().unwrap();
    c.tick(token);
    c.tick(token);

    assert_eq!(c.load(trajectory(3)), Some(PlaybackEvent::Frame(0)));
    assert_eq!(c.state(), PlaybackState::Paused);
    assert!(c.pending_tick().is_none());
    assert_eq!(c.tick(token), None);
    assert_eq!(c.current_frame(), 0);
    assert_eq!(c.frame_count(), 3);
}
