use std::path::PathBuf;

use tetrion_engine::{GameState, PieceSeed};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Board height in cells
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(4..=100))]
    rows: u16,
    /// Board width in cells
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(8..=100))]
    cols: u16,
    /// Seed for the shape sequence, as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Game updates per second
    #[clap(long, default_value_t = 60.0, value_parser = parse_tick_rate)]
    tick_rate: f64,
    /// File that finished games are appended to
    #[clap(long, default_value = "results.txt")]
    score_log: PathBuf,
}

impl PlayArg {
    pub(crate) fn board_size(&self) -> (usize, usize) {
        (usize::from(self.rows), usize::from(self.cols))
    }
}

fn parse_tick_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("tick rate must be a positive number, got {rate}"))
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let (rows, cols) = arg.board_size();
    let game = match arg.seed {
        Some(seed) => GameState::with_seed(rows, cols, seed),
        None => GameState::new(rows, cols),
    };

    let mut app = PlayApp::new(game, arg.tick_rate, arg.score_log.clone());
    Tui::new().run(&mut app)?;
    app.into_result()
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[derive(Debug, clap::Parser)]
    struct TestArgs {
        #[clap(flatten)]
        play: PlayArg,
    }

    #[test]
    fn test_defaults() {
        let args = TestArgs::try_parse_from(["play"]).unwrap().play;
        assert_eq!(args.board_size(), (20, 10));
        assert!(args.seed.is_none());
        assert!((args.tick_rate - 60.0).abs() < f64::EPSILON);
        assert_eq!(args.score_log, PathBuf::from("results.txt"));
    }

    #[test]
    fn test_seed_and_size() {
        let args = TestArgs::try_parse_from([
            "play",
            "--rows",
            "16",
            "--cols",
            "12",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
        ])
        .unwrap()
        .play;
        assert_eq!(args.board_size(), (16, 12));
        assert_eq!(
            args.seed.map(|seed| seed.to_string()).as_deref(),
            Some("000102030405060708090a0b0c0d0e0f")
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(TestArgs::try_parse_from(["play", "--cols", "4"]).is_err());
        assert!(TestArgs::try_parse_from(["play", "--rows", "0"]).is_err());
        assert!(TestArgs::try_parse_from(["play", "--seed", "xyz"]).is_err());
        assert!(TestArgs::try_parse_from(["play", "--tick-rate", "0"]).is_err());
    }
}
