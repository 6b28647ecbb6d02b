use clap::{Parser, Subcommand};

use self::{play::PlayArg, scores::ScoresArg};

mod play;
mod scores;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Options for `play` when no subcommand is given
    #[command(flatten)]
    play: PlayArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// List the best results from the score log
    Scores(#[clap(flatten)] ScoresArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(args.play)) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Scores(arg) => scores::run(&arg)?,
    }
    Ok(())
}
