//! Timer configuration
//!
//! Built once from the command line and moved into the timer loop.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::session::{Durations, SessionKind};

/// Default sound played when a session ends
pub const DEFAULT_SOUND_FILE: &str = "./sounds/chime.wav";

/// Default external program used to play the sound
pub const DEFAULT_PLAYER: &str = "aplay";

/// Default number of work sessions before a long break
pub const DEFAULT_SESSIONS: u32 = 3;

/// Longest accepted session length
pub const MAX_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Duration is empty")]
    EmptyDuration,

    #[error("Invalid duration '{0}' (expected e.g. 25m, 1h30m, 90s)")]
    InvalidDuration(String),

    #[error("Duration must be greater than zero: {0}")]
    ZeroDuration(String),

    #[error("Duration must be at most 24h: {0}")]
    DurationTooLong(String),

    #[error("Invalid number of sessions '{0}' (expected a positive integer)")]
    InvalidSessions(String),

    #[error("Sound player command is empty")]
    EmptyPlayer,
}

/// Parse the number of work sessions before a long break
pub fn parse_sessions(s: &str) -> Result<u32, ConfigError> {
    match s.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidSessions(s.to_string())),
    }
}

/// Everything the timer loop needs to know before it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// Length of each session kind
    pub durations: Durations,
    /// Work sessions before a long break
    pub max_sessions: u32,
    /// Play a sound when a session ends
    pub sound: bool,
    /// Start the next session without asking
    pub autostart: bool,
    /// Sound file handed to the player
    pub sound_file: PathBuf,
    /// Program invoked to play the sound file
    pub player: String,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            max_sessions: DEFAULT_SESSIONS,
            sound: false,
            autostart: false,
            sound_file: PathBuf::from(DEFAULT_SOUND_FILE),
            player: DEFAULT_PLAYER.to_string(),
        }
    }
}

impl TimerConfig {
    /// Check the invariants the timer loop relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in SessionKind::ALL {
            let duration = self.durations.of(kind);
            if duration.is_zero() {
                return Err(ConfigError::ZeroDuration(kind.label().to_string()));
            }
            if duration > MAX_DURATION {
                return Err(ConfigError::DurationTooLong(kind.label().to_string()));
            }
        }

        if self.max_sessions == 0 {
            return Err(ConfigError::InvalidSessions(self.max_sessions.to_string()));
        }

        if self.sound && self.player.trim().is_empty() {
            return Err(ConfigError::EmptyPlayer);
        }

        Ok(())
    }
}
