//! pomo - Pomodoro timer for the terminal
//!
//! Alternates work sessions with short breaks, and inserts a long break
//! after a configurable number of work sessions. Progress is drawn while a
//! session runs and a chime can be played when it ends.
//!
//! Modules:
//! - session: session kinds and the cycling state machine
//! - timer: the tick/deadline loop driving the sessions
//! - config, duration: command-line configuration
//! - display, prompt, sound: terminal collaborators of the loop

pub mod config;
pub mod display;
pub mod duration;
pub mod prompt;
pub mod session;
pub mod sound;
pub mod timer;

pub use config::{ConfigError, TimerConfig};
pub use session::{Durations, Session, SessionError, SessionKind, TimerState};
pub use timer::{LoopState, Timer};
