//! Continuation prompt
//!
//! Asked between two sessions when autostart is off.

use std::io::{self, Write};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use crate::display::{color, BOLD};
use crate::duration::format_duration;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Cannot read input: {0}")]
    Read(#[from] io::Error),

    #[error("Input stream closed")]
    Closed,
}

/// What the user decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Continue,
    Stop,
}

/// Decide from the first character of a line: `y`, `Y` or nothing continues.
pub fn parse_answer(line: &str) -> Answer {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.chars().next() {
        None | Some('y') | Some('Y') => Answer::Continue,
        Some(_) => Answer::Stop,
    }
}

/// Asks whether the next session should start
#[async_trait]
pub trait Prompt: Send {
    async fn confirm(&mut self, next: &Session) -> Result<Answer, InputError>;
}

/// Prompt writing its question to `W` and reading one line from `R`
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl LinePrompt<BufReader<Stdin>, io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), io::stdout())
    }
}

impl<R, W> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<R, W> Prompt for LinePrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn confirm(&mut self, next: &Session) -> Result<Answer, InputError> {
        let question = format!(
            "Start next session: {} {} (Y/n -- exit)? ",
            format_duration(next.duration),
            next.label()
        );
        write!(self.writer, "{}", color(BOLD, &question))?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Err(InputError::Closed);
        }

        Ok(parse_answer(&line))
    }
}
