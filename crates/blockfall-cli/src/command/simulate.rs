use std::path::PathBuf;

use blockfall_engine::{Command, Direction, GameConfig, GameSession, GameSnapshot, GameStats};
use rand::{Rng, SeedableRng as _, rngs::StdRng};
use serde::Serialize;

use crate::{command::GameArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(super) game: GameArg,
    /// Stop after this many pieces even if the game is not over
    #[clap(long, default_value_t = 1000)]
    max_pieces: usize,
    /// Output file path (prints to stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

/// Outcome of a headless game.
#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    config: GameConfig,
    pieces: usize,
    game_over: bool,
    stats: GameStats,
    final_snapshot: GameSnapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let report = simulate(arg.game.config(), arg.max_pieces);
    util::save_json(&report, arg.output.as_deref())
}

/// Plays random placements until game over or `max_pieces` locks.
///
/// Moves are drawn from a stream seeded with the piece seed, so the same
/// configuration always plays the same game.
fn simulate(config: GameConfig, max_pieces: usize) -> SimulationReport {
    let mut session = GameSession::with_config(config);
    let mut rng = move_rng(&session);

    let mut pieces = 0;
    while pieces < max_pieces && !session.session_state().is_game_over() {
        play_random_piece(&mut session, &mut rng);
        pieces += 1;
    }

    SimulationReport {
        config: session.config(),
        pieces,
        game_over: session.session_state().is_game_over(),
        stats: session.stats().clone(),
        final_snapshot: session.snapshot(),
    }
}

fn move_rng(session: &GameSession) -> StdRng {
    let bytes = session.seed().to_bytes();
    let mut seed = [0; 32];
    seed[..16].copy_from_slice(&bytes);
    seed[16..].copy_from_slice(&bytes);
    StdRng::from_seed(seed)
}

fn play_random_piece<R>(session: &mut GameSession, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for _ in 0..rng.random_range(0..4) {
        _ = session.apply(Command::Rotate);
    }
    let shift: i8 = rng.random_range(-5..=5);
    let direction = if shift < 0 {
        Direction::Left
    } else {
        Direction::Right
    };
    for _ in 0..shift.unsigned_abs() {
        // blocked moves are simply skipped
        _ = session.apply(Command::Move(direction));
    }
    _ = session.apply(Command::HardDrop);
}
