//! Cooperative driver: feeds commands and timer ticks into a
//! [`PlaybackController`] on a single task and hands each resulting frame
//! to a [`Renderer`].

use std::future;
use std::time::Duration;

use log::{debug, trace};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::config::TrackerConfig;
use crate::frame::frame_view;
use crate::playback::{PlaybackController, TickToken};
use crate::types::{FrameView, PlaybackEvent, StopReason, Trajectory};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    Load(Trajectory),
    Play,
    Pause,
    Toggle,
    StepForward,
    StepBack,
    Seek(usize),
    Reset,
}

/// Draws frames. Called on the driver task, never concurrently.
pub trait Renderer {
    fn render(&mut self, frame: &FrameView);

    fn stopped(&mut self, reason: StopReason);
}

pub struct Player<R> {
    controller: PlaybackController,
    config: TrackerConfig,
    renderer: R,
}

impl<R: Renderer> Player<R> {
    pub fn new(config: TrackerConfig, renderer: R) -> Self {
        Player {
            controller: PlaybackController::new(config.tick_period()),
            config,
            renderer,
        }
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Applies one command synchronously and renders its outcome.
    pub fn apply(&mut self, command: PlaybackCommand) {
        debug!("command {:?}", CommandName(&command));
        let event = match command {
            PlaybackCommand::Load(trajectory) => self.controller.load(trajectory),
            PlaybackCommand::Play => self.controller.play(),
            PlaybackCommand::Pause => self.controller.pause(),
            PlaybackCommand::Toggle => self.controller.toggle(),
            PlaybackCommand::StepForward => self.controller.step_forward(),
            PlaybackCommand::StepBack => self.controller.step_back(),
            PlaybackCommand::Seek(frame) => self.controller.seek(frame),
            PlaybackCommand::Reset => self.controller.reset(),
        };
        self.emit(event);
    }

    fn emit(&mut self, event: Option<PlaybackEvent>) {
        let Some(event) = event else {
            return;
        };
        match event {
            PlaybackEvent::Frame(index) => self.render(index),
            PlaybackEvent::Stopped(reason) => {
                if let StopReason::EndOfTrajectory { frame } = reason {
                    self.render(frame);
                }
                self.renderer.stopped(reason);
            }
        }
    }

    fn render(&mut self, index: usize) {
        if let Some(view) = frame_view(self.controller.trajectory(), index, &self.config) {
            self.renderer.render(&view);
        }
    }

    /// Runs until `commands` is closed. Commands take priority over a tick
    /// that becomes due at the same time.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<PlaybackCommand>) {
        let period = self.controller.tick_period().max(Duration::from_millis(1));
        let mut ticker: Option<(Interval, TickToken)> = None;
        loop {
            let armed = ticker.as_ref().map(|(_, token)| *token);
            match (self.controller.pending_tick(), armed) {
                (Some(token), Some(armed)) if armed == token => {}
                (Some(token), _) => {
                    let mut interval = time::interval_at(Instant::now() + period, period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    ticker = Some((interval, token));
                }
                (None, _) => ticker = None,
            }

            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                token = next_tick(&mut ticker) => {
                    trace!("timer fired");
                    let event = self.controller.tick(token);
                    self.emit(event);
                }
            }
        }
        debug!("command channel closed, driver exiting");
    }
}

async fn next_tick(ticker: &mut Option<(Interval, TickToken)>) -> TickToken {
    match ticker {
        Some((interval, token)) => {
            interval.tick().await;
            *token
        }
        None => future::pending().await,
    }
}

/// Logs a command without dumping a whole trajectory.
struct CommandName<'a>(&'a PlaybackCommand);

impl std::fmt::Debug for CommandName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            PlaybackCommand::Load(t) => write!(f, "Load({} frames)", t.len()),
            other => write!(f, "{other:?}"),
        }
    }
}
