use std::{path::PathBuf, time::Duration};

use blockfall_engine::{Command, GameOverRule, PieceSeed, Session, SessionConfig, Snapshot};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{command::GameOverRuleArg, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for the piece sequence and the simulated player (32 hex digits); random if omitted
    #[clap(long)]
    pub(super) seed: Option<PieceSeed>,
    /// Maximum number of frames to run
    #[clap(long, default_value_t = 10000)]
    pub(super) frames: usize,
    /// Simulated time per frame in milliseconds
    #[clap(long, default_value_t = 16)]
    pub(super) frame_ms: u64,
    /// When the game ends
    #[clap(long, value_enum, default_value_t)]
    pub(super) game_over_rule: GameOverRuleArg,
    /// Output file path for the final snapshot (JSON); stdout if omitted
    #[clap(long)]
    pub(super) output: Option<PathBuf>,
}

/// Outcome of a headless run.
#[derive(Debug, Clone)]
struct Simulation {
    frames: usize,
    snapshot: Snapshot,
    pieces: usize,
}

/// Picks zero or one command per frame.
#[derive(Debug, Clone)]
struct RandomPlayer {
    rng: Pcg32,
}

impl RandomPlayer {
    const CHOICES: [Option<Command>; 6] = [
        Some(Command::MoveLeft),
        Some(Command::MoveRight),
        Some(Command::SoftDrop),
        Some(Command::Rotate),
        None,
        None,
    ];

    fn new(seed: PieceSeed) -> Self {
        // A different stream than the piece factory, which seeds from the same bytes
        let bytes = seed.as_bytes();
        let mut head = [0; 8];
        head.copy_from_slice(&bytes[..8]);
        Self {
            rng: Pcg32::seed_from_u64(u64::from_le_bytes(head)),
        }
    }

    fn next_command(&mut self) -> Option<Command> {
        Self::CHOICES[self.rng.random_range(0..Self::CHOICES.len())]
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        frames,
        frame_ms,
        game_over_rule,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());

    eprintln!("Simulating up to {frames} frames of {frame_ms}ms with seed {seed}...");
    let result = simulate(
        seed,
        (*game_over_rule).into(),
        *frames,
        Duration::from_millis(*frame_ms),
    );
    eprintln!(
        "Finished after {} frames: score {}, level {}, {} lines, {} pieces{}",
        result.frames,
        result.snapshot.score,
        result.snapshot.level,
        result.snapshot.lines,
        result.pieces,
        if result.snapshot.game_over {
            " (game over)"
        } else {
            ""
        }
    );

    Output::save_json(&result.snapshot, output.as_deref())?;
    Ok(())
}

/// Runs a session with a seeded random player until game over or `max_frames`.
fn simulate(
    seed: PieceSeed,
    game_over_rule: GameOverRule,
    max_frames: usize,
    frame: Duration,
) -> Simulation {
    let mut player = RandomPlayer::new(seed);
    let mut session = Session::with_config(SessionConfig {
        seed: Some(seed),
        game_over_rule,
    });

    let mut frames = 0;
    while frames < max_frames && session.state().is_running() {
        session.step(player.next_command(), frame);
        frames += 1;
    }

    Simulation {
        frames,
        snapshot: session.snapshot(),
        pieces: session.stats().completed_pieces(),
    }
}
