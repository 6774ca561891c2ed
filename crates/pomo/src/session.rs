//! Session kinds and the session-cycling state machine
//!
//! A pomodoro run alternates work sessions with short breaks and inserts a
//! long break once enough work sessions have gone by. [`TimerState`] holds
//! everything the cycle needs and [`TimerState::transition`] moves it one
//! step forward.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the session controller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid session kind: {0}")]
    InvalidSessionKind(String),
}

/// Kind of timed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    /// Focus interval, counted toward the long break threshold
    Work,
    /// Short rest between two work sessions
    Break,
    /// Extended rest after a full cycle of work sessions
    LongBreak,
}

impl SessionKind {
    pub const ALL: [SessionKind; 3] = [SessionKind::Work, SessionKind::Break, SessionKind::LongBreak];

    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
            SessionKind::LongBreak => "longbreak",
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, SessionKind::Break | SessionKind::LongBreak)
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SessionKind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" => Ok(SessionKind::Work),
            "break" => Ok(SessionKind::Break),
            "longbreak" => Ok(SessionKind::LongBreak),
            _ => Err(SessionError::InvalidSessionKind(s.to_string())),
        }
    }
}

/// Configured length of each session kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub work: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: Duration::from_secs(25 * 60),
            short_break: Duration::from_secs(5 * 60),
            long_break: Duration::from_secs(15 * 60),
        }
    }
}

impl Durations {
    /// Get the configured duration for a session kind
    pub fn of(&self, kind: SessionKind) -> Duration {
        match kind {
            SessionKind::Work => self.work,
            SessionKind::Break => self.short_break,
            SessionKind::LongBreak => self.long_break,
        }
    }
}

/// A session kind together with its length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub kind: SessionKind,
    pub duration: Duration,
}

impl Session {
    pub fn new(kind: SessionKind, duration: Duration) -> Self {
        Self { kind, duration }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Number of one-second progress units the session lasts
    pub fn total_seconds(&self) -> u64 {
        self.duration.as_secs()
    }
}

/// Live state of the session cycle
///
/// The work counter always stays within `[0, max_sessions]`. It is reset to
/// 0 when a long break is entered and the next work session counts as 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    current: Session,
    completed_work: u32,
    max_sessions: u32,
    durations: Durations,
}

impl TimerState {
    /// Create the state for a fresh run: first work session, counter at 1
    pub fn new(durations: Durations, max_sessions: u32) -> Self {
        Self {
            current: Session::new(SessionKind::Work, durations.work),
            completed_work: 1,
            max_sessions: max_sessions.max(1),
            durations,
        }
    }

    pub fn current(&self) -> Session {
        self.current
    }

    pub fn completed_work(&self) -> u32 {
        self.completed_work
    }

    pub fn max_sessions(&self) -> u32 {
        self.max_sessions
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    /// Make `kind` the current session, with its configured duration
    pub fn set_session(&mut self, kind: SessionKind) {
        self.current = Session::new(kind, self.durations.of(kind));
    }

    /// Same as [`TimerState::set_session`], for a kind given by its label
    pub fn set_session_named(&mut self, name: &str) -> Result<(), SessionError> {
        let kind = name.parse()?;
        self.set_session(kind);
        Ok(())
    }

    /// Compute the state that follows this one, leaving `self` untouched
    pub fn next(&self) -> TimerState {
        let mut next = self.clone();

        match self.current.kind {
            SessionKind::Break => next.set_session(SessionKind::Work),
            SessionKind::LongBreak => {
                next.set_session(SessionKind::Work);
                next.completed_work = 1;
            }
            SessionKind::Work if self.completed_work >= self.max_sessions => {
                next.set_session(SessionKind::LongBreak);
                next.completed_work = 0;
            }
            SessionKind::Work => {
                next.set_session(SessionKind::Break);
                next.completed_work += 1;
            }
        }

        next
    }

    /// Advance to the next session and return it
    pub fn transition(&mut self) -> Session {
        *self = self.next();
        self.current
    }

    /// Caption shown next to the progress bar, e.g. `work: [2/3]`
    pub fn describe(&self) -> String {
        format!(
            "{}: [{}/{}]",
            self.current.label(),
            self.completed_work,
            self.max_sessions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(max_sessions: u32) -> TimerState {
        TimerState::new(Durations::default(), max_sessions)
    }

    #[test]
    fn test_initial_state() {
        let state = state(3);
        assert_eq!(state.current().kind, SessionKind::Work);
        assert_eq!(state.current().duration, Duration::from_secs(25 * 60));
        assert_eq!(state.completed_work(), 1);
        assert_eq!(state.max_sessions(), 3);
    }

    #[test]
    fn test_cycle_with_three_sessions() {
        let mut state = state(3);
        let mut seen = vec![(state.current().kind, state.completed_work())];

        for _ in 0..8 {
            state.transition();
            seen.push((state.current().kind, state.completed_work()));
        }

        use SessionKind::*;
        assert_eq!(
            seen,
            vec![
                (Work, 1),
                (Break, 2),
                (Work, 2),
                (Break, 3),
                (Work, 3),
                (LongBreak, 0),
                (Work, 1),
                (Break, 2),
                (Work, 2),
            ]
        );
    }

    #[test]
    fn test_long_break_every_max_sessions() {
        for max in 1..=6 {
            let mut state = state(max);
            let mut work_sessions = 0;

            for _ in 0..200 {
                let before = state.current().kind;
                let after = state.transition().kind;

                if before == SessionKind::Work {
                    work_sessions += 1;
                    let expect_long = work_sessions % max == 0;
                    assert_eq!(after == SessionKind::LongBreak, expect_long, "max={max}");
                }
                if after == SessionKind::LongBreak {
                    assert_eq!(state.completed_work(), 0);
                }
                assert!(state.completed_work() <= state.max_sessions());
            }
        }
    }

    #[test]
    fn test_breaks_always_lead_to_work() {
        for count in 0..=4 {
            for kind in [SessionKind::Break, SessionKind::LongBreak] {
                let mut state = state(4);
                state.set_session(kind);
                state.completed_work = count;
                assert_eq!(state.transition().kind, SessionKind::Work);
            }
        }
    }

    #[test]
    fn test_next_does_not_mutate() {
        let state = state(2);
        let next = state.next();
        assert_eq!(state.current().kind, SessionKind::Work);
        assert_eq!(next.current().kind, SessionKind::Break);
    }

    #[test]
    fn test_transition_uses_configured_durations() {
        let durations = Durations {
            work: Duration::from_secs(3),
            short_break: Duration::from_secs(2),
            long_break: Duration::from_secs(4),
        };
        let mut state = TimerState::new(durations, 1);
        assert_eq!(state.transition(), Session::new(SessionKind::LongBreak, Duration::from_secs(4)));
        assert_eq!(state.transition(), Session::new(SessionKind::Work, Duration::from_secs(3)));
    }

    #[test]
    fn test_zero_max_sessions_is_clamped() {
        let mut state = state(0);
        assert_eq!(state.max_sessions(), 1);
        assert_eq!(state.transition().kind, SessionKind::LongBreak);
    }

    #[test]
    fn test_session_kind_labels() {
        for kind in SessionKind::ALL {
            assert_eq!(kind.label().parse::<SessionKind>().unwrap(), kind);
        }
        assert_eq!("LongBreak".parse::<SessionKind>().unwrap(), SessionKind::LongBreak);
    }

    #[test]
    fn test_invalid_session_kind() {
        let mut state = state(3);
        let err = state.set_session_named("nap").unwrap_err();
        assert_eq!(err, SessionError::InvalidSessionKind("nap".to_string()));
        assert_eq!(state.current().kind, SessionKind::Work);
    }

    #[test]
    fn test_describe() {
        let mut state = state(3);
        assert_eq!(state.describe(), "work: [1/3]");
        state.transition();
        assert_eq!(state.describe(), "break: [2/3]");
    }
}
