//! Progress display
//!
//! The timer loop reports progress through [`ProgressDisplay`]. The
//! terminal implementation redraws a single progress bar line in place.

use std::io::{self, IsTerminal, Write};

use chrono::{Duration as ChronoDuration, Local};
use tracing::debug;

use crate::duration::{format_duration, format_mmss};
use crate::session::Session;

// ANSI color codes
pub const GREEN: &str = "\x1b[0;32m";
pub const YELLOW: &str = "\x1b[0;33m";
pub const CYAN: &str = "\x1b[0;36m";
pub const MAGENTA: &str = "\x1b[0;35m";
pub const BOLD: &str = "\x1b[1m";
pub const NC: &str = "\x1b[0m";

const BAR_WIDTH: usize = 30;

/// Check if stdout is a TTY and colors should be used
pub fn use_colors() -> bool {
    io::stdout().is_terminal()
}

/// Conditionally apply color
pub fn color(code: &str, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", code, text, NC)
    } else {
        text.to_string()
    }
}

/// Receives progress updates from the timer loop
pub trait ProgressDisplay: Send {
    /// A new session started; progress restarts at zero out of `session`'s seconds
    fn start(&mut self, caption: &str, session: &Session);

    /// `units` more seconds of the current session elapsed
    fn advance(&mut self, units: u64);

    /// The current session is over (or the loop stopped)
    fn finish(&mut self);
}

/// Render the bar line, e.g. `work: [1/3] [██████░░░…]  20% (05:00/25:00)`
pub fn render_bar(caption: &str, done: u64, total: u64, width: usize) -> String {
    let done = done.min(total);
    let percent = if total == 0 { 100 } else { done * 100 / total };
    let filled = if total == 0 {
        width
    } else {
        (width as u64 * done / total) as usize
    };
    let empty = width.saturating_sub(filled);

    format!(
        "{} [{}{}] {:>3}% ({}/{})",
        caption,
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(empty),
        percent,
        format_mmss(std::time::Duration::from_secs(done)),
        format_mmss(std::time::Duration::from_secs(total)),
    )
}

/// Progress bar drawn on a terminal
pub struct TerminalDisplay<W> {
    out: W,
    caption: String,
    done: u64,
    total: u64,
    active: bool,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            caption: String::new(),
            done: 0,
            total: 0,
            active: false,
        }
    }

    pub fn done(&self) -> u64 {
        self.done
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn banner(&mut self, session: &Session) -> io::Result<()> {
        let ends_at = ChronoDuration::from_std(session.duration)
            .ok()
            .and_then(|delta| Local::now().checked_add_signed(delta));

        let title = color(&format!("{}{}", BOLD, MAGENTA), &session.label().to_uppercase());
        match ends_at {
            Some(end) => writeln!(
                self.out,
                "{}  {} {}  {} {}",
                title,
                color(CYAN, "Duration:"),
                format_duration(session.duration),
                color(CYAN, "Ends at:"),
                end.format("%H:%M")
            ),
            None => writeln!(
                self.out,
                "{}  {} {}",
                title,
                color(CYAN, "Duration:"),
                format_duration(session.duration)
            ),
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let line = render_bar(&self.caption, self.done, self.total, BAR_WIDTH);
        write!(self.out, "\r{}", line)?;
        self.out.flush()
    }

    fn report(result: io::Result<()>) {
        if let Err(err) = result {
            debug!("cannot draw progress: {err}");
        }
    }
}

impl<W: Write + Send> ProgressDisplay for TerminalDisplay<W> {
    fn start(&mut self, caption: &str, session: &Session) {
        if self.active {
            self.finish();
        }

        self.caption = caption.to_string();
        self.done = 0;
        self.total = session.total_seconds();
        self.active = true;

        let result = self.banner(session).and_then(|_| self.draw());
        Self::report(result);
    }

    fn advance(&mut self, units: u64) {
        if !self.active {
            return;
        }
        self.done = (self.done + units).min(self.total);
        let result = self.draw();
        Self::report(result);
    }

    fn finish(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let result = writeln!(self.out).and_then(|_| self.out.flush());
        Self::report(result);
    }
}
