//! Rhythm FPS headless entry point
//!
//! Runs a seeded autoplay session and prints the result as JSON.
//!
//! Usage: `rhythm-fps [seed] [level] [difficulty]`
//!
//! `RHYTHM_SETTINGS` and `RHYTHM_HIGHSCORES` point at optional JSON files.

use std::path::PathBuf;
use std::process::ExitCode;

use rhythm_fps::autoplay::Autoplay;
use rhythm_fps::consts::SIM_DT;
use rhythm_fps::sim::format_duration;
use rhythm_fps::{Difficulty, HighScores, Session, SessionError, Settings};
use thiserror::Error;

/// Ten minutes of simulated play
const MAX_TICKS: u64 = 60 * 60 * 10;
const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Error)]
enum CliError {
    #[error("seed must be a non-negative integer, got {0:?}")]
    BadSeed(String),
    #[error("level must be a number, got {0:?}")]
    BadLevel(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Positional `[seed] [level] [difficulty]`, falling back to `settings`
fn parse_args(
    mut args: impl Iterator<Item = String>,
    settings: &Settings,
) -> Result<(u64, u8, Difficulty), CliError> {
    let seed = match args.next() {
        Some(s) => s.trim().parse::<u64>().map_err(|_| CliError::BadSeed(s))?,
        None => DEFAULT_SEED,
    };
    let level = match args.next() {
        Some(s) => s.trim().parse::<u8>().map_err(|_| CliError::BadLevel(s))?,
        None => settings.level.number(),
    };
    let difficulty = match args.next() {
        Some(s) => s.parse::<Difficulty>()?,
        None => settings.difficulty,
    };
    Ok((seed, level, difficulty))
}

fn run() -> Result<(), CliError> {
    let settings = std::env::var_os("RHYTHM_SETTINGS")
        .map(|p| Settings::load(&PathBuf::from(p)))
        .unwrap_or_default();

    let (seed, level, difficulty) = parse_args(std::env::args().skip(1), &settings)?;

    log::info!("Autoplay seed {} on level {} ({})", seed, level, difficulty);

    let mut session = Session::with_tuning(settings.tuning.clone())?;
    session.start(level, difficulty)?;
    let summary = Autoplay::new(seed).run(&mut session, SIM_DT, MAX_TICKS)?;

    for event in session.drain_events() {
        log::debug!("{:?}", event);
    }

    match summary {
        Some(summary) => {
            log::info!(
                "Survived {} and reached round {}",
                format_duration(summary.survival_time),
                summary.round_reached
            );
            if let Ok(json) = serde_json::to_string_pretty(&summary) {
                println!("{json}");
            }

            if let Some(path) = std::env::var_os("RHYTHM_HIGHSCORES").map(PathBuf::from) {
                let mut scores = HighScores::load(&path);
                let timestamp = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_millis() as f64)
                    .unwrap_or(0.0);
                if scores.add_summary(&summary, timestamp).is_some() {
                    if let Err(e) = scores.save(&path) {
                        log::warn!("Could not save high scores: {}", e);
                    }
                }
            }
        }
        None => {
            log::info!("Run still going after {} ticks", MAX_TICKS);
            if let Ok(json) = serde_json::to_string_pretty(&session.snapshot()) {
                println!("{json}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Rhythm FPS (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<(u64, u8, Difficulty), CliError> {
        parse_args(args.iter().map(|s| s.to_string()), &Settings::default())
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        let (seed, level, difficulty) = parse(&[]).unwrap();
        assert_eq!(seed, DEFAULT_SEED);
        assert_eq!(level, settings.level.number());
        assert_eq!(difficulty, settings.difficulty);
    }

    #[test]
    fn test_explicit_args() {
        let (seed, level, difficulty) = parse(&["7", "3", "hard"]).unwrap();
        assert_eq!((seed, level, difficulty), (7, 3, Difficulty::Hard));
    }

    #[test]
    fn test_bad_args_are_reported_verbatim() {
        assert!(matches!(parse(&["abc"]), Err(CliError::BadSeed(s)) if s == "abc"));
        assert!(matches!(parse(&["1", "300"]), Err(CliError::BadLevel(s)) if s == "300"));
        assert!(matches!(parse(&["1", "two"]), Err(CliError::BadLevel(s)) if s == "two"));
        assert!(matches!(
            parse(&["1", "2", "nightmare"]),
            Err(CliError::Session(SessionError::UnknownDifficulty(_)))
        ));
    }

    #[test]
    fn test_out_of_range_level_fails_at_start() {
        let (_, level, difficulty) = parse(&["1", "9"]).unwrap();
        let mut session = Session::new();
        assert_eq!(
            session.start(level, difficulty),
            Err(SessionError::InvalidLevel(9))
        );
    }
}
