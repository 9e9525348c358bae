// Board, racks, bag and the turn state machine

pub mod bag;
pub mod board;
pub mod check;
pub mod game;
pub mod play;
pub mod rack;
pub mod tile;
pub mod util;

pub use check::PlayCheck;
pub use game::{Game, GameError, GameStatus};
pub use play::{write_play_log, Play, PlayKind};
pub use tile::{Tile, TileId};
pub use util::{Direction, Position};
