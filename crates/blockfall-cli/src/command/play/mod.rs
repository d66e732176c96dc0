use anyhow::Context as _;
use blockfall_engine::{PieceSeed, SessionConfig};
use blockfall_runtime::Runtime;

use crate::command::GameOverRuleArg;

use self::app::PlayApp;

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Frames per second; the session advances once per frame
    #[clap(long, default_value_t = 60.0)]
    pub(super) fps: f64,
    /// Seed for the piece sequence (32 hex digits); random if omitted
    #[clap(long)]
    pub(super) seed: Option<PieceSeed>,
    /// When the game ends
    #[clap(long, value_enum, default_value_t)]
    pub(super) game_over_rule: GameOverRuleArg,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            fps: 60.0,
            seed: None,
            game_over_rule: GameOverRuleArg::default(),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        fps,
        seed,
        game_over_rule,
    } = arg;
    anyhow::ensure!(
        fps.is_finite() && *fps > 0.0,
        "--fps must be a positive number, got {fps}"
    );

    let config = SessionConfig {
        seed: *seed,
        game_over_rule: (*game_over_rule).into(),
    };
    let mut app = PlayApp::new(*fps, config);
    Runtime::new()
        .run(&mut app)
        .context("Failed to run the terminal session")?;

    let stats = app.session().stats();
    eprintln!(
        "Final score: {} (level {}, {} lines, {} pieces)",
        stats.score(),
        stats.level(),
        stats.total_cleared_lines(),
        stats.completed_pieces()
    );
    Ok(())
}
