use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::lexicon::Lexicon;
use crate::rules::{RuleSet, BLANK};

use super::bag::Bag;
use super::board::Board;
use super::check::{PlayCheck, PlayChecker};
use super::play::{Play, PlayKind};
use super::rack::Rack;
use super::tile::{Location, TileArena, TileId};
use super::util::Position;

pub const PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Complete,
}

/// Front-end contract violations. Illegal placements are reported through
/// `PlayCheck`, not through this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game is not in progress")]
    NotInProgress,
    #[error("{0} is off the board")]
    OffBoard(Position),
    #[error("{0} is already occupied")]
    Occupied(Position),
    #[error("no uncommitted tile at {0}")]
    NothingToRemove(Position),
    #[error("tile {0:?} is not in the current rack")]
    NotInRack(TileId),
    #[error("no {0:?} left in the current rack")]
    LetterNotInRack(char),
    #[error("tile {0:?} is already on the board")]
    AlreadyPlaced(TileId),
    #[error("only blank tiles can be designated")]
    NotBlank,
    #[error("blank at {0} already stands for {1}")]
    AlreadyDesignated(Position, char),
    #[error("{0:?} is not a letter")]
    BadDesignation(char),
    #[error("invalid play: {0}")]
    InvalidPlay(String),
    #[error("cannot exchange {requested} tiles with {available} left in the bag")]
    BagTooSmall { requested: usize, available: usize },
}

/// State of one match between two players.
///
/// A single owner drives the game: every call completes its mutation before
/// returning and nothing is synchronized internally.
pub struct Game {
    rules: Arc<RuleSet>,
    lexicon: Arc<Lexicon>,
    tiles: TileArena,
    board: Board,
    racks: [Rack; PLAYERS],
    bag: Bag,
    scores: [i32; PLAYERS],
    plays: Vec<Play>,
    current: usize,
    status: GameStatus,
    pending: PlayCheck,
    scoreless_turns: usize,
    rng: StdRng,
}

impl Game {
    pub fn new(rules: Arc<RuleSet>, lexicon: Arc<Lexicon>) -> Self {
        Self::with_rng(rules, lexicon, StdRng::from_entropy())
    }

    /// Game with reproducible draws
    pub fn with_seed(rules: Arc<RuleSet>, lexicon: Arc<Lexicon>, seed: u64) -> Self {
        Self::with_rng(rules, lexicon, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rules: Arc<RuleSet>, lexicon: Arc<Lexicon>, rng: StdRng) -> Self {
        let tiles = TileArena::from_rules(&rules);
        let bag = Bag::new(tiles.ids().collect());
        Self {
            board: Board::empty(rules.board_size),
            tiles,
            bag,
            racks: [Rack::empty(), Rack::empty()],
            scores: [0; PLAYERS],
            plays: Vec::new(),
            current: 0,
            status: GameStatus::NotStarted,
            pending: PlayCheck::default(),
            scoreless_turns: 0,
            rules,
            lexicon,
            rng,
        }
    }

    /// Fills the bag, clears the board, scores and history, picks the first
    /// player at random and deals their rack.
    pub fn start(&mut self) {
        self.tiles = TileArena::from_rules(&self.rules);
        self.bag = Bag::new(self.tiles.ids().collect());
        self.board = Board::empty(self.rules.board_size);
        self.racks = [Rack::empty(), Rack::empty()];
        self.scores = [0; PLAYERS];
        self.plays.clear();
        self.scoreless_turns = 0;
        self.status = GameStatus::InProgress;

        let first = self.rng.gen_range(0..PLAYERS);
        // advancing the turn hands it to `first`
        self.current = other(first);
        self.advance_turn();
        tracing::debug!("Game started, player {} moves first", first);
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tiles(&self) -> &TileArena {
        &self.tiles
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    pub fn rack(&self, player: usize) -> &Rack {
        &self.racks[player]
    }

    pub fn current_rack(&self) -> &Rack {
        &self.racks[self.current]
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn score(&self, player: usize) -> i32 {
        self.scores[player]
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == GameStatus::Complete
    }

    /// Result of the last check of the staged placement
    pub fn pending(&self) -> &PlayCheck {
        &self.pending
    }

    /// Player with the higher score once the game is complete, `None` on a tie
    pub fn winner(&self) -> Option<usize> {
        if !self.is_complete() || self.scores[0] == self.scores[1] {
            return None;
        }
        if self.scores[0] > self.scores[1] {
            Some(0)
        } else {
            Some(1)
        }
    }

    /// Letters on a player's rack, blanks as `BLANK`
    pub fn rack_letters(&self, player: usize) -> String {
        self.racks[player]
            .tiles()
            .iter()
            .map(|&id| self.tiles[id].letter)
            .collect()
    }

    /// Bag, both racks and the committed board always account for every tile
    pub fn tile_count_conserved(&self) -> bool {
        let held: usize = self.racks.iter().map(Rack::len).sum();
        self.bag.len() + held + self.tiles.committed_count() == self.tiles.len()
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.status == GameStatus::InProgress {
            Ok(())
        } else {
            Err(GameError::NotInProgress)
        }
    }

    /// Stages a tile from the current rack on an empty cell. Blanks may be
    /// given the letter they stand for.
    pub fn place(&mut self, pos: Position, tile: TileId, designation: Option<char>) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        if !self.board.contains(pos) {
            return Err(GameError::OffBoard(pos));
        }
        if self.board.is_letter(pos) {
            return Err(GameError::Occupied(pos));
        }
        if !self.racks[self.current].contains(tile) {
            return Err(GameError::NotInRack(tile));
        }
        if self.tiles[tile].position().is_some() {
            return Err(GameError::AlreadyPlaced(tile));
        }
        let designation = match designation {
            Some(letter) => {
                if !self.tiles[tile].is_blank() {
                    return Err(GameError::NotBlank);
                }
                Some(normalize_designation(letter)?)
            }
            None => None,
        };

        self.tiles.set_location(
            tile,
            Location::Rack {
                player: self.current,
                staged: Some(pos),
            },
        );
        self.tiles[tile].designation = designation;
        self.tiles[tile].owner = Some(self.current);
        self.board.set(pos, tile);
        self.check_play();
        Ok(())
    }

    /// Stages the first unplaced rack tile showing `letter`. A lower-case
    /// letter stages a blank designated as that letter.
    pub fn place_letter(&mut self, pos: Position, letter: char) -> Result<TileId, GameError> {
        self.ensure_in_progress()?;
        let (wanted, designation) = if letter.is_lowercase() {
            (BLANK, Some(letter))
        } else {
            (letter.to_ascii_uppercase(), None)
        };
        let tile = self.racks[self.current]
            .tiles()
            .iter()
            .copied()
            .find(|&id| self.tiles[id].letter == wanted && self.tiles[id].position().is_none())
            .ok_or(GameError::LetterNotInRack(letter))?;
        self.place(pos, tile, designation)?;
        Ok(tile)
    }

    /// Takes a staged tile back into the rack, clearing its designation and points
    pub fn remove(&mut self, pos: Position) -> Result<TileId, GameError> {
        self.ensure_in_progress()?;
        let tile = match self.board.get(pos) {
            Some(id) if !self.tiles[id].is_committed() => id,
            _ => return Err(GameError::NothingToRemove(pos)),
        };
        self.board.take(pos);
        self.tiles.reset(tile);
        self.tiles.set_location(
            tile,
            Location::Rack {
                player: self.current,
                staged: None,
            },
        );
        self.check_play();
        Ok(tile)
    }

    /// Assigns the letter a staged blank stands for. Changing an existing
    /// assignment needs the rule set's flip toggle.
    pub fn designate(&mut self, pos: Position, letter: char) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let tile = match self.board.get(pos) {
            Some(id) if !self.tiles[id].is_committed() => id,
            _ => return Err(GameError::NothingToRemove(pos)),
        };
        if !self.tiles[tile].is_blank() {
            return Err(GameError::NotBlank);
        }
        let letter = normalize_designation(letter)?;
        if let Some(existing) = self.tiles[tile].designation {
            if existing != letter && !self.rules.flip {
                return Err(GameError::AlreadyDesignated(pos, existing));
            }
        }
        self.tiles[tile].designation = Some(letter);
        self.tiles[tile].points = self.rules.points(BLANK);
        self.check_play();
        Ok(())
    }

    /// Takes every staged tile back into the rack
    pub fn recall(&mut self) {
        let staged: Vec<Position> = self
            .board
            .occupied()
            .filter(|(_, id)| !self.tiles[*id].is_committed())
            .map(|(pos, _)| pos)
            .collect();
        for pos in staged {
            if let Some(tile) = self.board.take(pos) {
                self.tiles.reset(tile);
                self.tiles.set_location(
                    tile,
                    Location::Rack {
                        player: self.current,
                        staged: None,
                    },
                );
            }
        }
        self.check_play();
    }

    /// Recomputes the pending score and validity of the staged tiles
    pub fn check_play(&mut self) -> &PlayCheck {
        self.pending = PlayChecker {
            rules: &self.rules,
            lexicon: &self.lexicon,
            board: &self.board,
            tiles: &self.tiles,
        }
        .check();
        tracing::debug!(
            "Pending play: {} points, valid {}, {:?}",
            self.pending.score,
            self.pending.valid,
            self.pending.reason
        );
        &self.pending
    }

    /// Commits the staged placement, credits its score and hands the turn over
    pub fn next_turn(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let check = self.check_play().clone();
        if check.tiles_placed > 0 && !check.valid {
            return Err(GameError::InvalidPlay(check.reason.unwrap_or_default()));
        }

        if check.tiles_placed > 0 {
            for id in self.tiles.ids().collect::<Vec<_>>() {
                self.tiles[id].fresh = false;
            }
            let staged: Vec<(Position, TileId)> = self
                .board
                .occupied()
                .filter(|(_, id)| !self.tiles[*id].is_committed())
                .collect();
            for (pos, id) in staged {
                self.tiles.set_location(id, Location::Board(pos));
                self.tiles[id].fresh = true;
                self.racks[self.current].remove_inplace(id);
            }
            self.scores[self.current] += check.score;
            self.plays.push(Play::new(
                self.current,
                PlayKind::Move,
                check.notation.clone(),
                check.score,
            ));
            tracing::debug!(
                "Player {} played {} for {}",
                self.current,
                check.notation,
                check.score
            );
        }

        self.record_scoreless(check.tiles_placed == 0 || check.score == 0);
        self.advance_turn();
        Ok(())
    }

    /// Records a zero-score pass and hands the turn over
    pub fn pass(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        self.recall();
        self.plays.push(Play::new(self.current, PlayKind::Pass, "", 0));
        tracing::debug!("Player {} passed", self.current);
        self.record_scoreless(true);
        self.advance_turn();
        Ok(())
    }

    /// Returns the chosen rack tiles to the bag, draws replacements and hands the turn over.
    /// Staged tiles may be exchanged, they are recalled first.
    pub fn exchange(&mut self, tiles: &[TileId]) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let mut seen = HashSet::new();
        for &tile in tiles {
            if !self.racks[self.current].contains(tile) || !seen.insert(tile) {
                return Err(GameError::NotInRack(tile));
            }
            if self.tiles[tile].is_committed() {
                return Err(GameError::AlreadyPlaced(tile));
            }
        }
        if tiles.len() > self.bag.len() {
            return Err(GameError::BagTooSmall {
                requested: tiles.len(),
                available: self.bag.len(),
            });
        }

        self.recall();
        let mut letters: Vec<char> = tiles.iter().map(|&t| self.tiles[t].letter).collect();
        letters.sort_unstable();
        for &tile in tiles {
            self.racks[self.current].remove_inplace(tile);
            self.tiles.reset(tile);
            self.tiles.set_location(tile, Location::Bag);
            self.bag.put_back(tile);
        }
        self.refill(self.current);

        let notation: String = std::iter::once('-').chain(letters).collect();
        tracing::debug!("Player {} exchanged {}", self.current, notation);
        self.plays
            .push(Play::new(self.current, PlayKind::Exchange, notation, 0));
        self.record_scoreless(true);
        self.advance_turn();
        Ok(())
    }

    fn record_scoreless(&mut self, scoreless: bool) {
        if scoreless {
            self.scoreless_turns += 1;
        } else {
            self.scoreless_turns = 0;
        }
    }

    fn refill(&mut self, player: usize) {
        let wanted = self.rules.rack_size.saturating_sub(self.racks[player].len());
        for id in self.bag.draw_tiles(wanted, &mut self.rng) {
            self.tiles.set_location(id, Location::Rack { player, staged: None });
            self.racks[player].add_inplace(id);
        }
    }

    fn advance_turn(&mut self) {
        let previous = self.current;
        self.current = other(previous);
        self.refill(self.current);

        if self.racks[previous].is_empty() && self.bag.is_empty() {
            self.end_game(Some(previous));
        } else if self.rules.scoreless_turn_limit > 0
            && self.scoreless_turns >= self.rules.scoreless_turn_limit
        {
            self.end_game(None);
        }
        self.check_play();
    }

    fn rack_points(&self, player: usize) -> i32 {
        self.racks[player]
            .tiles()
            .iter()
            .map(|&id| self.tiles[id].points)
            .sum()
    }

    /// Settles the tiles left on the racks. The player who went out collects
    /// the opponent's rack value, otherwise everyone loses their own.
    fn end_game(&mut self, finisher: Option<usize>) {
        match finisher {
            Some(finisher) => {
                let loser = other(finisher);
                let points = self.rack_points(loser);
                let letters = format!("({})", self.rack_letters(loser));
                self.scores[finisher] += points;
                self.scores[loser] -= points;
                self.plays.push(Play::new(finisher, PlayKind::OutOfTiles, letters.clone(), points));
                self.plays.push(Play::new(loser, PlayKind::OutOfTiles, letters, -points));
            }
            None => {
                for player in 0..PLAYERS {
                    let points = self.rack_points(player);
                    let letters = format!("({})", self.rack_letters(player));
                    self.scores[player] -= points;
                    self.plays.push(Play::new(player, PlayKind::OutOfTiles, letters, -points));
                }
            }
        }
        self.status = GameStatus::Complete;
        tracing::info!(
            "Game complete: {} to {}",
            self.scores[0],
            self.scores[1]
        );
    }
}

fn other(player: usize) -> usize {
    (player + 1) % PLAYERS
}

fn normalize_designation(letter: char) -> Result<char, GameError> {
    if letter.is_alphabetic() {
        Ok(letter.to_ascii_uppercase())
    } else {
        Err(GameError::BadDesignation(letter))
    }
}
