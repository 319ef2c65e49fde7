use blockfall_engine::{GameConfig, PieceRule, PieceSeed};
use clap::{Parser, Subcommand, ValueEnum};
use rand::Rng as _;

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
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Play random moves without a terminal and print the result as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Piece generation flags shared by every mode.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// How the next piece is chosen
    #[clap(long, value_enum, default_value_t = RuleArg::Uniform)]
    rule: RuleArg,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RuleArg {
    /// Independent uniform draws
    #[default]
    Uniform,
    /// Every run of seven pieces contains each kind once
    Bag7,
}

impl From<RuleArg> for PieceRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Uniform => PieceRule::Uniform,
            RuleArg::Bag7 => PieceRule::Bag7,
        }
    }
}

impl GameArg {
    /// Session configuration with the seed fixed, drawing one if none was given.
    pub(crate) fn config(&self) -> GameConfig {
        GameConfig {
            seed: Some(self.seed.unwrap_or_else(|| rand::rng().random())),
            rule: self.rule.into(),
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
