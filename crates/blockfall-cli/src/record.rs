use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    ops::Deref,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use blockfall_engine::{
    Command, CommandError, GameConfig, GameSession, GameSnapshot, GameStats, LockOutcome, Piece,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A [`GameSession`] that remembers where every piece locked.
///
/// Commands go through [`Self::apply`]; read access derefs to the session.
/// A reset starts a new recording.
#[derive(Debug)]
pub struct RecordingSession {
    session: GameSession,
    placements: Vec<PlacementRecord>,
}

/// Read-only access to the session.
///
/// There is no `DerefMut`: a command applied to the inner session directly
/// would lock pieces without recording them.
impl Deref for RecordingSession {
    type Target = GameSession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl RecordingSession {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: GameSession::with_config(config),
            placements: Vec::new(),
        }
    }

    pub fn placements(&self) -> &[PlacementRecord] {
        &self.placements
    }

    pub fn apply(&mut self, command: Command) -> Result<Option<LockOutcome>, CommandError> {
        // A piece always locks where it would land, whether it got there by
        // gravity or by a hard drop.
        let landing = self.session.ghost_piece();
        let outcome = self.session.apply(command)?;
        if command == Command::Reset {
            self.placements.clear();
        }
        if let Some(lock) = outcome {
            self.placements.push(PlacementRecord {
                turn: self.placements.len(),
                placement: landing,
                cleared_lines: lock.cleared_lines,
                points: lock.points,
            });
        }
        Ok(outcome)
    }

    /// Captures the game played so far.
    pub fn to_recording(&self, play_time: Duration) -> SessionRecording {
        SessionRecording {
            recorded_at: Utc::now(),
            config: self.session.config(),
            play_time,
            final_stats: self.session.stats().clone(),
            final_snapshot: self.session.snapshot().with_elapsed(play_time),
            placements: self.placements().to_vec(),
        }
    }
}

/// One locked piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Zero-based count of pieces locked before this one
    pub turn: usize,
    /// Where the piece locked, including its rotation
    pub placement: Piece,
    pub cleared_lines: usize,
    pub points: usize,
}

/// A finished game, as written by `play --save-recording`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecording {
    /// When the recording was taken (ISO 8601)
    pub recorded_at: DateTime<Utc>,
    /// Seed and piece rule; replaying with them deals the same pieces
    pub config: GameConfig,
    /// Time spent playing, excluding pauses
    pub play_time: Duration,
    pub final_stats: GameStats,
    pub final_snapshot: GameSnapshot,
    pub placements: Vec<PlacementRecord>,
}

impl SessionRecording {
    /// Writes the recording as pretty JSON to `record_dir`, creating the
    /// directory if needed.
    ///
    /// The file is named after the recording time:
    /// `blockfall_{YYYYMMDD_HHMMSS}.json`. Returns the path written.
    pub fn save(&self, record_dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(record_dir)
            .with_context(|| format!("Failed to create directory {}", record_dir.display()))?;

        let filename = format!("blockfall_{}.json", self.recorded_at.format("%Y%m%d_%H%M%S"));
        let filepath = record_dir.join(filename);

        let file = File::create(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", filepath.display()))?;

        Ok(filepath)
    }
}
