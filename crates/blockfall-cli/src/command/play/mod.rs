use std::path::PathBuf;

use anyhow::Context as _;
use ratatui_runtime::{Runtime, ScreenStack};

use crate::command::{GameArg, play::screens::GameScreen};

mod input;
mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    game: GameArg,
    /// Save the game recording to a file when the session ends
    #[clap(long)]
    save_recording: bool,
    /// Directory to save recording files
    #[clap(long, default_value = "./data/recordings/")]
    record_dir: PathBuf,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game,
        save_recording,
        record_dir,
    } = arg;

    let mut recording = None;
    let mut screens = ScreenStack::new(Box::new(GameScreen::new(game.config(), &mut recording)));
    Runtime::new()
        .run(&mut screens)
        .context("Failed to run the terminal UI")?;
    drop(screens);

    if *save_recording && let Some(recording) = recording {
        let path = recording.save(record_dir)?;
        eprintln!("Recording saved to {}", path.display());
    }

    Ok(())
}
