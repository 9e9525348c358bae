use std::io::Write;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayKind {
    Move,
    Pass,
    Exchange,
    /// End-of-game settlement of the tiles left on a rack
    OutOfTiles,
}

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player: usize,
    pub kind: PlayKind,
    pub notation: String,
    pub score: i32,
}

impl Play {
    pub fn new(player: usize, kind: PlayKind, notation: impl Into<String>, score: i32) -> Self {
        Self {
            player,
            kind,
            notation: notation.into(),
            score,
        }
    }
}

/// Appends plays to an aggregate log, one JSON object per line
pub fn write_play_log<W: Write>(writer: &mut W, plays: &[Play]) -> std::io::Result<()> {
    for play in plays {
        serde_json::to_writer(&mut *writer, play)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
