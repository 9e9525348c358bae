use super::{RuleSet, SquareEffect, TileSpec, BLANK};
use crate::engine::util::Position;

// Top-left quadrant of each board, center row/column included. The rest of
// the board is the quadrant mirrored both ways.
const CLASSIC_QUADRANT: [&str; 8] = [
    "T..d...T",
    ".D...t..",
    "..D...d.",
    "d..D...d",
    "....D...",
    ".t...t..",
    "..d...d.",
    "T..d...D",
];

const SUPER_QUADRANT: [&str; 11] = [
    "Q..d...T..d",
    ".D..t...q..",
    "..D..q...D.",
    "d..T...d...",
    ".t..D...t..",
    "..q..D...d.",
    "......D....",
    "T..d...D...",
    ".q..t...t.d",
    "..D..d.....",
    "d.......d.D",
];

// (letter, count, points)
const CLASSIC_TILES: [(char, usize, i32); 27] = [
    ('A', 9, 1), ('B', 2, 3), ('C', 2, 3), ('D', 4, 2), ('E', 12, 1), ('F', 2, 4),
    ('G', 3, 2), ('H', 2, 4), ('I', 9, 1), ('J', 1, 8), ('K', 1, 5), ('L', 4, 1),
    ('M', 2, 3), ('N', 6, 1), ('O', 8, 1), ('P', 2, 3), ('Q', 1, 10), ('R', 6, 1),
    ('S', 4, 1), ('T', 6, 1), ('U', 4, 1), ('V', 2, 4), ('W', 2, 4), ('X', 1, 8),
    ('Y', 2, 4), ('Z', 1, 10), (BLANK, 2, 0),
];

const SUPER_TILES: [(char, usize, i32); 27] = [
    ('A', 16, 1), ('B', 4, 3), ('C', 6, 3), ('D', 8, 2), ('E', 24, 1), ('F', 4, 4),
    ('G', 5, 2), ('H', 5, 4), ('I', 13, 1), ('J', 2, 8), ('K', 2, 5), ('L', 7, 1),
    ('M', 6, 3), ('N', 13, 1), ('O', 15, 1), ('P', 4, 3), ('Q', 2, 10), ('R', 13, 1),
    ('S', 10, 1), ('T', 15, 1), ('U', 7, 1), ('V', 3, 4), ('W', 4, 4), ('X', 2, 8),
    ('Y', 4, 4), ('Z', 2, 10), (BLANK, 4, 0),
];

impl RuleSet {
    /// Standard 15x15 board with the 100 tile English distribution
    pub fn classic() -> Self {
        Self::from_preset("Classic", &CLASSIC_QUADRANT, &CLASSIC_TILES, 7, 50)
    }

    /// 21x21 board with quad multipliers and a 200 tile distribution
    pub fn super_board() -> Self {
        Self::from_preset("Super", &SUPER_QUADRANT, &SUPER_TILES, 7, 50)
    }

    fn from_preset(
        description: &str,
        quadrant: &[&str],
        tiles: &[(char, usize, i32)],
        rack_size: usize,
        bingo_bonus: i32,
    ) -> Self {
        let half = quadrant.len() - 1;
        let size = half * 2 + 1;
        let mut rules = RuleSet::new(description, size, rack_size);
        rules.bingo_bonus = bingo_bonus;
        rules.star = Position::new(half, half);

        for row in 0..size {
            for col in 0..size {
                let qr = if row > half { size - 1 - row } else { row };
                let qc = if col > half { size - 1 - col } else { col };
                let code = quadrant[qr].as_bytes()[qc] as char;
                let effect = SquareEffect::from_code(code).unwrap_or_default();
                rules.set_multiplier(Position::new(row, col), effect);
            }
        }

        for &(letter, count, points) in tiles {
            rules.set_tile(
                letter,
                TileSpec {
                    count,
                    points,
                    display: letter,
                },
            );
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_layout() {
        let rules = RuleSet::classic();
        assert_eq!(rules.board_size, 15);
        assert_eq!(rules.star, Position::new(7, 7));
        assert_eq!(rules.multiplier(Position::new(0, 0)), SquareEffect::TripleWord);
        assert_eq!(rules.multiplier(Position::new(14, 14)), SquareEffect::TripleWord);
        assert_eq!(rules.multiplier(Position::new(0, 3)), SquareEffect::DoubleLetter);
        assert_eq!(rules.multiplier(Position::new(0, 11)), SquareEffect::DoubleLetter);
        assert_eq!(rules.multiplier(Position::new(5, 9)), SquareEffect::TripleLetter);
        assert_eq!(rules.multiplier(Position::new(13, 13)), SquareEffect::DoubleWord);
        assert_eq!(rules.multiplier(Position::new(7, 8)), SquareEffect::None);
    }

    #[test]
    fn test_super_preset() {
        let rules = RuleSet::super_board();
        assert_eq!(rules.board_size, 21);
        assert_eq!(rules.total_tiles(), 200);
        assert_eq!(rules.star, Position::new(10, 10));
        assert_eq!(rules.multiplier(Position::new(20, 0)), SquareEffect::QuadWord);
        assert_eq!(rules.multiplier(rules.star), SquareEffect::DoubleWord);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_layouts_are_symmetric() {
        for rules in [RuleSet::classic(), RuleSet::super_board()] {
            let n = rules.board_size;
            for row in 0..n {
                for col in 0..n {
                    let effect = rules.multiplier(Position::new(row, col));
                    assert_eq!(effect, rules.multiplier(Position::new(col, row)), "{} {}", row, col);
                    assert_eq!(effect, rules.multiplier(Position::new(n - 1 - row, col)));
                }
            }
        }
    }
}
