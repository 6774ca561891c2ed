//! pomo - Pomodoro timer for the terminal
//!
//! Usage:
//!   pomo                          25m work, 5m break, 15m long break every 3 sessions
//!   pomo --work 50m --break 10m   Custom durations
//!   pomo --sessions 4             Long break after 4 work sessions
//!   pomo --auto                   Start the next session without asking
//!   pomo --sound                  Play a chime when a session ends

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pomo::config::{parse_sessions, TimerConfig, DEFAULT_PLAYER, DEFAULT_SOUND_FILE};
use pomo::display::{color, TerminalDisplay, GREEN};
use pomo::duration::parse_duration;
use pomo::prompt::LinePrompt;
use pomo::session::Durations;
use pomo::sound::CommandPlayer;
use pomo::Timer;

/// Pomo - Pomodoro timer for the terminal
#[derive(Parser, Debug)]
#[command(name = "pomo")]
#[command(about = "Pomodoro timer cycling work, break and long break sessions")]
#[command(version)]
#[command(after_help = r#"DURATIONS:
    25m, 1h30m, 90s, or a bare number of minutes

SESSION CYCLE:
    work -> break -> work -> ... -> work -> longbreak -> work ...
    A long break replaces the break after every --sessions work sessions.

EXAMPLES:
    pomo                            # Classic 25/5/15 pomodoro
    pomo --work 50m --break 10m     # Longer focus blocks
    pomo --auto --sound             # Run unattended with a chime
    pomo --sound --sound-file ~/bell.wav --player paplay

Between sessions, answer Y (or just press enter) to continue, anything else
to exit. Ctrl-C stops the timer at any time.
"#)]
struct Cli {
    /// Work session length
    #[arg(long, value_name = "DURATION", default_value = "25m", value_parser = parse_duration)]
    work: Duration,

    /// Short break length
    #[arg(long = "break", value_name = "DURATION", default_value = "5m", value_parser = parse_duration)]
    short_break: Duration,

    /// Long break length
    #[arg(long = "longbreak", value_name = "DURATION", default_value = "15m", value_parser = parse_duration)]
    long_break: Duration,

    /// Number of work sessions before a long break
    #[arg(long, value_name = "COUNT", default_value = "3", value_parser = parse_sessions)]
    sessions: u32,

    /// Play a sound when a session ends
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    sound: bool,

    /// Start the next session without asking
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    auto: bool,

    /// Sound file played when --sound is on
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SOUND_FILE)]
    sound_file: PathBuf,

    /// Program used to play the sound file
    #[arg(long, value_name = "CMD", default_value = DEFAULT_PLAYER)]
    player: String,
}

impl Cli {
    fn into_config(self) -> TimerConfig {
        TimerConfig {
            durations: Durations {
                work: self.work,
                short_break: self.short_break,
                long_break: self.long_break,
            },
            max_sessions: self.sessions,
            sound: self.sound,
            autostart: self.auto,
            sound_file: self.sound_file,
            player: self.player,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config();

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(run(config));
    // stdin may still be read by a blocking task after Ctrl-C
    rt.shutdown_background();

    result
}

async fn run(config: TimerConfig) -> Result<()> {
    let player = CommandPlayer::new(config.player.clone());
    let mut timer = Timer::new(config, TerminalDisplay::stdout(), LinePrompt::stdin(), player)?;

    timer.run_until(shutdown_signal()).await;

    println!("{} Timer stopped", color(GREEN, "[ok]"));
    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
