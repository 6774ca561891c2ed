//! # Timer loop
//!
//! Runs sessions one after another. While a session runs, a one second
//! ticker reports progress and a one-shot deadline marks its end; both are
//! awaited together with `tokio::select!`, ticks first, so the last tick of
//! a session is always reported before the session ends.
//!
//! Once the deadline fires the loop plays the optional chime, advances the
//! [`TimerState`] and either starts the next session right away (autostart)
//! or asks the user first.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval_at, sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, TimerConfig};
use crate::display::{color, ProgressDisplay, YELLOW};
use crate::prompt::{Answer, Prompt};
use crate::session::{Session, TimerState};
use crate::sound::SoundPlayer;

/// Period of the progress ticker
pub const TICK: Duration = Duration::from_secs(1);

/// Where the loop currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A session is being timed
    Running(Session),
    /// A session ended, waiting for the user to start this one
    AwaitingConfirmation(Session),
    /// The loop is over
    Stopped,
}

/// The timer loop, owning the session state and its collaborators
pub struct Timer<D, P, S> {
    config: TimerConfig,
    state: TimerState,
    loop_state: LoopState,
    display: D,
    prompt: P,
    player: S,
}

impl<D, P, S> Timer<D, P, S>
where
    D: ProgressDisplay,
    P: Prompt,
    S: SoundPlayer,
{
    /// Build a timer for a validated configuration.
    pub fn new(config: TimerConfig, display: D, prompt: P, player: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = TimerState::new(config.durations, config.max_sessions);
        let loop_state = LoopState::Running(state.current());

        Ok(Self {
            config,
            state,
            loop_state,
            display,
            prompt,
            player,
        })
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    /// Run until the user declines to continue.
    pub async fn run(&mut self) {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Run until the user declines to continue or `shutdown` resolves.
    ///
    /// `shutdown` is raced against every wait: ticks, the chime and the
    /// confirmation prompt.
    pub async fn run_until<F: Future>(&mut self, shutdown: F) {
        tokio::pin!(shutdown);

        info!(
            autostart = self.config.autostart,
            sound = self.config.sound,
            max_sessions = self.config.max_sessions,
            "starting timer"
        );

        loop {
            match self.loop_state {
                LoopState::Running(session) => {
                    let ended = tokio::select! {
                        biased;
                        _ = &mut shutdown => false,
                        _ = self.run_session(session) => true,
                    };

                    self.display.finish();
                    if !ended {
                        debug!("shutdown requested while running");
                        self.loop_state = LoopState::Stopped;
                        continue;
                    }

                    let chimed = if self.config.sound {
                        tokio::select! {
                            biased;
                            _ = &mut shutdown => false,
                            _ = self.chime() => true,
                        }
                    } else {
                        true
                    };

                    self.loop_state = if chimed {
                        self.end_session()
                    } else {
                        debug!("shutdown requested while playing sound");
                        LoopState::Stopped
                    };
                }
                LoopState::AwaitingConfirmation(next) => {
                    let answer = tokio::select! {
                        biased;
                        _ = &mut shutdown => None,
                        answer = self.prompt.confirm(&next) => Some(answer),
                    };

                    self.loop_state = match answer {
                        None => {
                            debug!("shutdown requested while awaiting confirmation");
                            LoopState::Stopped
                        }
                        Some(Ok(Answer::Continue)) => LoopState::Running(next),
                        Some(Ok(Answer::Stop)) => LoopState::Stopped,
                        Some(Err(err)) => {
                            warn!("cannot read confirmation, continuing: {err}");
                            eprintln!("{} Error reading input: {}", color(YELLOW, "[warn]"), err);
                            LoopState::Running(next)
                        }
                    };
                }
                LoopState::Stopped => break,
            }
        }

        info!("timer stopped");
    }

    /// Time one session: one progress unit per tick until the deadline.
    async fn run_session(&mut self, session: Session) {
        let caption = self.state.describe();
        info!(session = session.label(), duration = ?session.duration, "session started");
        self.display.start(&caption, &session);

        let total = session.total_seconds();
        let start = Instant::now();
        let deadline = sleep_until(start + session.duration);
        tokio::pin!(deadline);
        let mut ticker = interval_at(start + TICK, TICK);
        let mut elapsed = 0;

        loop {
            tokio::select! {
                biased;
                _ = ticker.tick() => {
                    if elapsed < total {
                        elapsed += 1;
                        self.display.advance(1);
                    }
                }
                _ = &mut deadline => break,
            }
        }

        debug!(session = session.label(), elapsed, "session deadline reached");
    }

    /// Play the end-of-session sound; failures are reported and skipped.
    async fn chime(&self) {
        if let Err(err) = self.player.play(&self.config.sound_file).await {
            warn!("cannot play sound, skipping it: {err}");
            eprintln!("{} Error playing sound: {}", color(YELLOW, "[warn]"), err);
        }
    }

    /// Advance the session state and pick the next loop state.
    fn end_session(&mut self) -> LoopState {
        let next = self.state.transition();
        debug!(
            next = next.label(),
            completed_work = self.state.completed_work(),
            "session switched"
        );

        if self.config.autostart {
            LoopState::Running(next)
        } else {
            LoopState::AwaitingConfirmation(next)
        }
    }
}
