//! Frame-index state machine behind play, pause, step and scrub.
//!
//! The controller never sleeps. While playing it holds a [`TickToken`]; the
//! scheduler hands the token back through [`PlaybackController::tick`] once per
//! period. Any transition that stops playback drops the token, so a tick that
//! was already in flight is recognised as stale and ignored.

use std::time::Duration;

use log::{debug, info, trace};

use crate::types::{PlaybackEvent, PlaybackState, StopReason, Trajectory};

/// Identifies one armed tick schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
}

/// Forward-only source of the next frame to show while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameCursor {
    next: usize,
    end: usize,
}

impl FrameCursor {
    fn anchored(frame: usize, len: usize) -> Self {
        FrameCursor {
            next: frame + 1,
            end: len,
        }
    }
}

impl Iterator for FrameCursor {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.end {
            return None;
        }
        let frame = self.next;
        self.next += 1;
        Some(frame)
    }
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    trajectory: Trajectory,
    state: PlaybackState,
    current: usize,
    cursor: FrameCursor,
    generation: u64,
    pending: Option<TickToken>,
    tick_period: Duration,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

impl PlaybackController {
    pub fn new(tick_period: Duration) -> Self {
        PlaybackController {
            trajectory: Trajectory::default(),
            state: PlaybackState::Stopped,
            current: 0,
            cursor: FrameCursor::anchored(0, 0),
            generation: 0,
            pending: None,
            tick_period,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_frame(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// The token the next tick must carry, if a tick is scheduled.
    pub fn pending_tick(&self) -> Option<TickToken> {
        self.pending
    }

    fn last_frame(&self) -> usize {
        self.trajectory.len().saturating_sub(1)
    }

    fn cancel_tick(&mut self) {
        if let Some(token) = self.pending.take() {
            trace!("cancelled tick generation {}", token.generation);
        }
    }

    /// Points the advancing cursor just past `frame` and makes it current.
    fn anchor(&mut self, frame: usize) {
        self.current = frame;
        self.cursor = FrameCursor::anchored(frame, self.trajectory.len());
    }

    /// Replaces the trajectory. Any scheduled tick is cancelled first.
    pub fn load(&mut self, trajectory: Trajectory) -> Option<PlaybackEvent> {
        self.cancel_tick();
        self.trajectory = trajectory;
        self.anchor(0);
        if self.trajectory.is_empty() {
            info!("loaded empty trajectory");
            self.state = PlaybackState::Stopped;
            return Some(PlaybackEvent::Stopped(StopReason::EmptyTrajectory));
        }
        info!("loaded trajectory with {} frames", self.trajectory.len());
        self.state = PlaybackState::Paused;
        Some(PlaybackEvent::Frame(0))
    }

    /// Starts auto-advance from the current frame. No-op unless paused
    /// before the last frame.
    pub fn play(&mut self) -> Option<PlaybackEvent> {
        if self.state != PlaybackState::Paused || self.current >= self.last_frame() {
            return None;
        }
        self.anchor(self.current);
        self.generation += 1;
        self.pending = Some(TickToken {
            generation: self.generation,
        });
        self.state = PlaybackState::Playing;
        debug!("playing from frame {}", self.current);
        Some(PlaybackEvent::Frame(self.current))
    }

    /// Advances one frame. Ignored unless `token` is the pending one.
    pub fn tick(&mut self, token: TickToken) -> Option<PlaybackEvent> {
        if self.state != PlaybackState::Playing || self.pending != Some(token) {
            trace!("ignored stale tick generation {}", token.generation);
            return None;
        }
        let Some(frame) = self.cursor.next() else {
            self.cancel_tick();
            self.state = PlaybackState::Paused;
            return Some(PlaybackEvent::Stopped(StopReason::EndOfTrajectory {
                frame: self.current,
            }));
        };
        trace!("tick -> frame {frame}");
        self.current = frame;
        if frame == self.last_frame() {
            self.cancel_tick();
            self.state = PlaybackState::Paused;
            info!("playback reached final frame {frame}");
            return Some(PlaybackEvent::Stopped(StopReason::EndOfTrajectory { frame }));
        }
        Some(PlaybackEvent::Frame(frame))
    }

    pub fn pause(&mut self) -> Option<PlaybackEvent> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        self.cancel_tick();
        self.state = PlaybackState::Paused;
        self.anchor(self.current);
        Some(PlaybackEvent::Frame(self.current))
    }

    /// Pauses when playing, plays otherwise.
    pub fn toggle(&mut self) -> Option<PlaybackEvent> {
        if self.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    pub fn step_forward(&mut self) -> Option<PlaybackEvent> {
        if self.state != PlaybackState::Paused || self.current >= self.last_frame() {
            return None;
        }
        self.anchor(self.current + 1);
        Some(PlaybackEvent::Frame(self.current))
    }

    pub fn step_back(&mut self) -> Option<PlaybackEvent> {
        if self.state != PlaybackState::Paused || self.current == 0 {
            return None;
        }
        self.anchor(self.current - 1);
        Some(PlaybackEvent::Frame(self.current))
    }

    /// Jumps to `frame`, clamped to the trajectory. Only while paused.
    pub fn seek(&mut self, frame: usize) -> Option<PlaybackEvent> {
        if self.state != PlaybackState::Paused {
            return None;
        }
        self.anchor(frame.min(self.last_frame()));
        Some(PlaybackEvent::Frame(self.current))
    }

    /// Back to frame 0, paused, from any state.
    pub fn reset(&mut self) -> Option<PlaybackEvent> {
        self.cancel_tick();
        self.anchor(0);
        if self.trajectory.is_empty() {
            self.state = PlaybackState::Stopped;
            return Some(PlaybackEvent::Stopped(StopReason::EmptyTrajectory));
        }
        self.state = PlaybackState::Paused;
        Some(PlaybackEvent::Frame(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_yields_frames_after_anchor() {
        let cursor = FrameCursor::anchored(2, 5);
        assert_eq!(cursor.collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn cursor_at_last_frame_is_exhausted() {
        let mut cursor = FrameCursor::anchored(4, 5);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn cursor_on_empty_trajectory_is_exhausted() {
        let mut cursor = FrameCursor::anchored(0, 0);
        assert_eq!(cursor.next(), None);
    }
}
