use blockfall_engine::GameOverRule;
use clap::{Parser, Subcommand, ValueEnum};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run a headless session with a random player and print the final state as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

/// When the game ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum GameOverRuleArg {
    /// Only when a piece locks above the top row
    #[default]
    LockAboveTop,
    /// Also when a new piece spawns on top of the stack
    BlockedSpawn,
}

impl From<GameOverRuleArg> for GameOverRule {
    fn from(arg: GameOverRuleArg) -> Self {
        match arg {
            GameOverRuleArg::LockAboveTop => GameOverRule::LockAboveTop,
            GameOverRuleArg::BlockedSpawn => GameOverRule::BlockedSpawn,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
