use std::collections::HashSet;

use crate::lexicon::Lexicon;
use crate::rules::RuleSet;

use super::board::Board;
use super::tile::TileArena;
use super::util::{Direction, Position};

pub const NO_TILES: &str = "No tiles played";
pub const MUST_TOUCH_STAR: &str = "First play must touch star";
pub const DISCONNECTED: &str = "disconnected tiles";

/// Appended to the notation of a play that uses a full rack
pub const BINGO_MARKER: &str = " *";

/// Score and legality of the tiles currently staged on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCheck {
    pub score: i32,
    pub valid: bool,
    pub reason: Option<String>,
    /// Every word formed by the placement with its score
    pub words: Vec<(String, i32)>,
    /// Extent of the main word, set when the placement is valid
    pub start: Option<Position>,
    pub end: Option<Position>,
    pub direction: Direction,
    pub notation: String,
    pub tiles_placed: usize,
}

impl Default for PlayCheck {
    fn default() -> Self {
        Self {
            score: 0,
            valid: false,
            reason: Some(NO_TILES.to_string()),
            words: Vec::new(),
            start: None,
            end: None,
            direction: Direction::Across,
            notation: String::new(),
            tiles_placed: 0,
        }
    }
}

impl PlayCheck {
    fn invalid(mut self, reason: impl Into<String>) -> Self {
        self.valid = false;
        self.reason = Some(reason.into());
        self
    }
}

/// Scores and validates a placement against the committed board.
pub struct PlayChecker<'a> {
    pub rules: &'a RuleSet,
    pub lexicon: &'a Lexicon,
    pub board: &'a Board,
    pub tiles: &'a TileArena,
}

impl<'a> PlayChecker<'a> {
    fn is_committed(&self, pos: Position) -> bool {
        self.board
            .get(pos)
            .map(|id| self.tiles[id].is_committed())
            .unwrap_or(false)
    }

    fn is_staged(&self, pos: Position) -> bool {
        self.board
            .get(pos)
            .map(|id| !self.tiles[id].is_committed())
            .unwrap_or(false)
    }

    fn word(&self, run: &[Position]) -> String {
        run.iter()
            .filter_map(|&p| self.board.get(p))
            .map(|id| self.tiles[id].face())
            .collect()
    }

    /// Staged tiles in row-major order
    pub fn staged(&self) -> Vec<Position> {
        self.board
            .occupied()
            .filter(|(_, id)| !self.tiles[*id].is_committed())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Every multi-tile run through a staged tile, each listed once
    pub fn runs(&self, staged: &[Position]) -> Vec<(Direction, Vec<Position>)> {
        let mut seen = HashSet::new();
        let mut runs = Vec::new();
        for &pos in staged {
            for &dir in Direction::iter() {
                let run = self.board.run_through(pos, dir);
                if run.len() < 2 || !seen.insert((run[0], dir)) {
                    continue;
                }
                runs.push((dir, run));
            }
        }
        runs
    }

    /// Letter multipliers apply to staged tiles only, word multipliers come from
    /// the cells covered by staged tiles and compound with each other.
    pub fn score_run(&self, run: &[Position]) -> i32 {
        let mut letter_sum = 0;
        let mut word_mult = 1;
        for &pos in run {
            let Some(id) = self.board.get(pos) else {
                continue;
            };
            let tile = &self.tiles[id];
            if tile.is_committed() {
                letter_sum += tile.points;
            } else {
                let effect = self.rules.multiplier(pos);
                letter_sum += tile.points * effect.letter_multiplier();
                word_mult *= effect.word_multiplier();
            }
        }
        letter_sum * word_mult + self.lexicon.adjustment(&self.word(run))
    }

    pub fn check(&self) -> PlayCheck {
        let staged = self.staged();
        let runs = self.runs(&staged);

        let mut result = PlayCheck {
            tiles_placed: staged.len(),
            ..PlayCheck::default()
        };
        for (_, run) in runs.iter() {
            let score = self.score_run(run);
            result.words.push((self.word(run), score));
            result.score += score;
        }
        let bingo = !staged.is_empty() && staged.len() == self.rules.rack_size;
        if bingo {
            result.score += self.rules.bingo_bonus;
        }

        if self.rules.validate_words {
            if let Some((word, _)) = result.words.iter().find(|(w, _)| !self.lexicon.contains(w)) {
                let reason = format!("{} is not a word", word);
                return result.invalid(reason);
            }
        }

        if staged.is_empty() {
            return result.invalid(NO_TILES);
        }

        let first_play = self.tiles.committed_count() == 0;
        if first_play {
            if !staged.contains(&self.rules.star) {
                return result.invalid(MUST_TOUCH_STAR);
            }
        } else {
            let size = self.board.size();
            let connected = staged
                .iter()
                .any(|p| p.adjacent(size).into_iter().any(|n| self.is_committed(n)));
            if !connected {
                return result.invalid(DISCONNECTED);
            }
        }

        let first = staged[0];
        let direction = if staged.iter().all(|p| p.row == first.row) {
            if staged.len() == 1 && self.board.run_through(first, Direction::Across).len() < 2 {
                // a lone tile reads in whichever direction forms a word
                if self.board.run_through(first, Direction::Down).len() >= 2 {
                    Direction::Down
                } else {
                    Direction::Across
                }
            } else {
                Direction::Across
            }
        } else if staged.iter().all(|p| p.col == first.col) {
            Direction::Down
        } else {
            return result.invalid(DISCONNECTED);
        };

        let min = staged.iter().map(|p| p[direction]).min().unwrap_or(0);
        let max = staged.iter().map(|p| p[direction]).max().unwrap_or(0);
        for i in min..=max {
            let mut pos = first;
            pos[direction] = i;
            if !self.board.is_letter(pos) {
                return result.invalid(DISCONNECTED);
            }
        }

        let main = self.board.run_through(first, direction);
        result.valid = true;
        result.reason = None;
        result.direction = direction;
        result.start = main.first().copied();
        result.end = main.last().copied();
        result.notation = self.notation(&main, direction, bingo);
        result
    }

    /// Coordinate prefix, committed letters in parentheses, blanks in lower case
    fn notation(&self, run: &[Position], dir: Direction, bingo: bool) -> String {
        let mut out = match run.first() {
            Some(start) => start.notation(dir),
            None => return String::new(),
        };
        out.push(' ');

        let mut in_group = false;
        for &pos in run {
            let Some(id) = self.board.get(pos) else {
                continue;
            };
            let tile = &self.tiles[id];
            let committed = !self.is_staged(pos);
            if committed && !in_group {
                out.push('(');
                in_group = true;
            } else if !committed && in_group {
                out.push(')');
                in_group = false;
            }
            if tile.is_blank() {
                out.push(tile.face().to_ascii_lowercase());
            } else {
                out.push(tile.display);
            }
        }
        if in_group {
            out.push(')');
        }
        if bingo {
            out.push_str(BINGO_MARKER);
        }
        out
    }
}
