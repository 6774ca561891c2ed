//! Sound playback at session boundaries
//!
//! Playback is best effort: the timer loop reports a [`SoundError`] and
//! moves on to the next session.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Upper bound on how long a chime may hold up the next session
const PLAY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("Failed to run {player}: {source}")]
    Spawn {
        player: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{player} exited with {status}")]
    Failed { player: String, status: ExitStatus },

    #[error("{player} timed out after {} seconds", .timeout.as_secs())]
    TimedOut { player: String, timeout: Duration },
}

/// Plays a sound file
#[async_trait]
pub trait SoundPlayer: Send + Sync {
    async fn play(&self, file: &Path) -> Result<(), SoundError>;
}

/// Plays sounds by running an external program, `aplay` by default
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
    timeout: Duration,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: PLAY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl SoundPlayer for CommandPlayer {
    async fn play(&self, file: &Path) -> Result<(), SoundError> {
        debug!(player = %self.program, file = %file.display(), "playing sound");

        // Player chatter would garble the progress bar
        let child = tokio::process::Command::new(&self.program)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SoundError::Spawn {
                player: self.program.clone(),
                source,
            })?;

        let status = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output.status,
            Ok(Err(source)) => {
                return Err(SoundError::Spawn {
                    player: self.program.clone(),
                    source,
                })
            }
            Err(_) => {
                return Err(SoundError::TimedOut {
                    player: self.program.clone(),
                    timeout: self.timeout,
                })
            }
        };

        if !status.success() {
            return Err(SoundError::Failed {
                player: self.program.clone(),
                status,
            });
        }

        Ok(())
    }
}
