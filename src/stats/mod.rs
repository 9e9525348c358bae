// Advisory statistics over a lexicon and tile distribution

pub mod leave;
pub mod word_set;

pub use leave::{LeaveEstimate, Tally};
pub use word_set::WordSet;

/// Monte Carlo trials per rack evaluation unless overridden
pub const DEFAULT_TRIALS: usize = 200_000;

/// Blanks expanded per completed rack, any further blanks are dropped
pub const MAX_EXPANDED_BLANKS: u8 = 2;
