// Word-game engine: lexicon, rule sets, a two-player turn state machine,
// advisory word statistics and a deterministic primality test.

pub mod engine;
pub mod lexicon;
pub mod prime;
pub mod rules;
pub mod stats;

pub use engine::{Game, GameError, GameStatus, Play, PlayCheck, PlayKind};
pub use lexicon::{Lexicon, LexiconError};
pub use rules::{RuleSet, RuleSetError};
pub use stats::{LeaveEstimate, WordSet};
