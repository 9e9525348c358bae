use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::engine::util::Position;

mod parse;
mod presets;

/// Symbol used for blank tiles in distributions, racks and rule files
pub const BLANK: char = '?';

#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("failed to read rule set: {0}")]
    Io(#[from] std::io::Error),
    #[error("rule set line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("invalid rule set: {0}")]
    Invalid(String),
}

/// Multiplier printed on a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SquareEffect {
    #[default]
    None,
    DoubleLetter,
    TripleLetter,
    QuadLetter,
    DoubleWord,
    TripleWord,
    QuadWord,
}

impl SquareEffect {
    pub fn letter_multiplier(&self) -> i32 {
        match self {
            Self::DoubleLetter => 2,
            Self::TripleLetter => 3,
            Self::QuadLetter => 4,
            _ => 1,
        }
    }

    pub fn word_multiplier(&self) -> i32 {
        match self {
            Self::DoubleWord => 2,
            Self::TripleWord => 3,
            Self::QuadWord => 4,
            _ => 1,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Self::None => '.',
            Self::DoubleLetter => 'd',
            Self::TripleLetter => 't',
            Self::QuadLetter => 'q',
            Self::DoubleWord => 'D',
            Self::TripleWord => 'T',
            Self::QuadWord => 'Q',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            '.' => Self::None,
            'd' => Self::DoubleLetter,
            't' => Self::TripleLetter,
            'q' => Self::QuadLetter,
            'D' => Self::DoubleWord,
            'T' => Self::TripleWord,
            'Q' => Self::QuadWord,
            _ => return None,
        })
    }
}

/// Count, point value and display glyph of one letter in the distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpec {
    pub count: usize,
    pub points: i32,
    pub display: char,
}

/// Reference data for one game variant. Cloned and edited between games,
/// never mutated while a game is using it.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub description: String,
    pub board_size: usize,
    pub rack_size: usize,
    pub bingo_bonus: i32,
    /// Reject placements that form words missing from the lexicon
    pub validate_words: bool,
    /// Allow a placed blank to be re-designated within the same turn
    pub flip: bool,
    /// Consecutive scoreless turns that end the game, 0 disables the rule
    pub scoreless_turn_limit: usize,
    pub star: Position,
    multipliers: Vec<SquareEffect>,
    tiles: BTreeMap<char, TileSpec>,
}

impl RuleSet {
    /// Empty board of the given size with no tiles. The star defaults to the center cell.
    pub fn new(description: &str, board_size: usize, rack_size: usize) -> Self {
        Self {
            description: description.to_string(),
            board_size,
            rack_size,
            bingo_bonus: 50,
            validate_words: true,
            flip: false,
            scoreless_turn_limit: 6,
            star: Position::new(board_size / 2, board_size / 2),
            multipliers: vec![SquareEffect::None; board_size * board_size],
            tiles: BTreeMap::new(),
        }
    }

    pub fn multiplier(&self, pos: Position) -> SquareEffect {
        self.multipliers
            .get(pos.as_index(self.board_size))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_multiplier(&mut self, pos: Position, effect: SquareEffect) {
        let idx = pos.as_index(self.board_size);
        if let Some(cell) = self.multipliers.get_mut(idx) {
            *cell = effect;
        }
    }

    pub fn set_tile(&mut self, letter: char, spec: TileSpec) {
        self.tiles.insert(letter.to_ascii_uppercase(), spec);
    }

    pub fn tile(&self, letter: char) -> Option<&TileSpec> {
        self.tiles.get(&letter.to_ascii_uppercase())
    }

    /// Letters of the distribution (including the blank) in sorted order
    pub fn tiles(&self) -> impl Iterator<Item = (char, &TileSpec)> {
        self.tiles.iter().map(|(c, spec)| (*c, spec))
    }

    pub fn count(&self, letter: char) -> usize {
        self.tile(letter).map(|t| t.count).unwrap_or(0)
    }

    pub fn points(&self, letter: char) -> i32 {
        self.tile(letter).map(|t| t.points).unwrap_or(0)
    }

    pub fn display(&self, letter: char) -> char {
        self.tile(letter).map(|t| t.display).unwrap_or(letter)
    }

    /// Number of tiles in a full bag
    pub fn total_tiles(&self) -> usize {
        self.tiles.values().map(|t| t.count).sum()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.board_size && pos.col < self.board_size
    }

    /// Whether the letters of `word` could be drawn from the full distribution,
    /// using blanks only once a letter's own tiles run out.
    pub fn is_word_playable(&self, word: &str) -> bool {
        let word = word.to_uppercase();
        if word.chars().count() > self.board_size {
            return false;
        }

        let mut needed: HashMap<char, usize> = HashMap::new();
        for c in word.chars() {
            *needed.entry(c).or_insert(0) += 1;
        }

        let mut blanks = self.count(BLANK);
        for (letter, need) in needed {
            let have = self.count(letter);
            if need <= have {
                continue;
            }
            let missing = need - have;
            if missing > blanks {
                return false;
            }
            blanks -= missing;
        }
        true
    }

    /// Checks internal consistency of an edited or freshly parsed rule set
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.board_size == 0 || self.board_size > 26 {
            return Err(RuleSetError::Invalid(format!(
                "board size {} out of range 1..=26",
                self.board_size
            )));
        }
        if self.rack_size == 0 {
            return Err(RuleSetError::Invalid("rack size must be positive".into()));
        }
        if self.multipliers.len() != self.board_size * self.board_size {
            return Err(RuleSetError::Invalid(format!(
                "expected {} multiplier cells, found {}",
                self.board_size * self.board_size,
                self.multipliers.len()
            )));
        }
        if !self.contains(self.star) {
            return Err(RuleSetError::Invalid(format!(
                "star {} is off the board",
                self.star
            )));
        }
        if self.total_tiles() < self.rack_size * 2 {
            return Err(RuleSetError::Invalid(format!(
                "{} tiles cannot fill two racks of {}",
                self.total_tiles(),
                self.rack_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_distribution() {
        let rules = RuleSet::classic();
        assert_eq!(rules.total_tiles(), 100);
        assert_eq!(rules.count(BLANK), 2);
        assert_eq!(rules.points('Q'), 10);
        assert_eq!(rules.points('c'), 3);
        assert_eq!(rules.points(BLANK), 0);
        assert_eq!(rules.multiplier(rules.star), SquareEffect::DoubleWord);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_word_playable() {
        let rules = RuleSet::classic();
        assert!(rules.is_word_playable("cat"));
        // one Z plus two blanks
        assert!(rules.is_word_playable("ZZZ"));
        assert!(!rules.is_word_playable("ZZZZ"));
        // blanks are shared between letters
        assert!(rules.is_word_playable("QQJJ"));
        assert!(!rules.is_word_playable("QQQJJ"));
        // longer than the board
        assert!(!rules.is_word_playable("AEIOUAEIOUAEIOUA"));
    }

    #[test]
    fn test_square_effect_codes() {
        for effect in [
            SquareEffect::None,
            SquareEffect::DoubleLetter,
            SquareEffect::TripleLetter,
            SquareEffect::QuadLetter,
            SquareEffect::DoubleWord,
            SquareEffect::TripleWord,
            SquareEffect::QuadWord,
        ] {
            assert_eq!(SquareEffect::from_code(effect.code()), Some(effect));
        }
        assert_eq!(SquareEffect::from_code('x'), None);
        assert_eq!(SquareEffect::QuadWord.word_multiplier(), 4);
        assert_eq!(SquareEffect::QuadWord.letter_multiplier(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_star() {
        let mut rules = RuleSet::classic();
        rules.star = Position::new(15, 0);
        assert!(matches!(rules.validate(), Err(RuleSetError::Invalid(_))));
    }
}
