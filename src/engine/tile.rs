use crate::rules::{RuleSet, BLANK};

use super::util::Position;

/// Stable handle of a tile in the game's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

/// Which container currently owns a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Bag,
    /// Held by a player. `staged` is set while the tile sits on the board
    /// as part of the current, uncommitted placement.
    Rack {
        player: usize,
        staged: Option<Position>,
    },
    /// Committed to the board
    Board(Position),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Base letter, `BLANK` for blank tiles
    pub letter: char,
    pub display: char,
    /// Letter a blank stands for
    pub designation: Option<char>,
    /// Current point value
    pub points: i32,
    /// Player who placed the tile on the board
    pub owner: Option<usize>,
    /// Committed during the most recent turn
    pub fresh: bool,
    location: Location,
}

impl Tile {
    pub fn is_blank(&self) -> bool {
        self.letter == BLANK
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.location, Location::Board(_))
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Board cell the tile occupies, committed or staged
    pub fn position(&self) -> Option<Position> {
        match self.location {
            Location::Board(pos) => Some(pos),
            Location::Rack { staged, .. } => staged,
            Location::Bag => None,
        }
    }

    /// Letter the tile reads as in a word. Unassigned blanks read as `BLANK`.
    pub fn face(&self) -> char {
        self.designation.unwrap_or(self.letter)
    }
}

/// Owns every tile of a game. Racks, the board and the bag refer to tiles by `TileId`.
#[derive(Debug, Clone)]
pub struct TileArena {
    tiles: Vec<Tile>,
    base_points: Vec<i32>,
}

impl TileArena {
    /// One tile per unit of the rule set's distribution, all in the bag
    pub fn from_rules(rules: &RuleSet) -> Self {
        let mut tiles = Vec::with_capacity(rules.total_tiles());
        for (letter, spec) in rules.tiles() {
            for _ in 0..spec.count {
                tiles.push(Tile {
                    letter,
                    display: spec.display,
                    designation: None,
                    points: spec.points,
                    owner: None,
                    fresh: false,
                    location: Location::Bag,
                });
            }
        }
        let base_points = tiles.iter().map(|t| t.points).collect();
        Self { tiles, base_points }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> {
        (0..self.tiles.len()).map(TileId)
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    pub(crate) fn set_location(&mut self, id: TileId, location: Location) {
        self.tiles[id.0].location = location;
    }

    /// Clears designation, provenance and point overrides
    pub(crate) fn reset(&mut self, id: TileId) {
        let base = self.base_points[id.0];
        let tile = &mut self.tiles[id.0];
        tile.designation = None;
        tile.points = base;
        tile.owner = None;
        tile.fresh = false;
    }

    /// Number of tiles committed to the board
    pub fn committed_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_committed()).count()
    }
}

impl std::ops::Index<TileId> for TileArena {
    type Output = Tile;

    fn index(&self, index: TileId) -> &Self::Output {
        &self.tiles[index.0]
    }
}

impl std::ops::IndexMut<TileId> for TileArena {
    fn index_mut(&mut self, index: TileId) -> &mut Self::Output {
        &mut self.tiles[index.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_matches_distribution() {
        let rules = RuleSet::classic();
        let arena = TileArena::from_rules(&rules);
        assert_eq!(arena.len(), 100);
        assert_eq!(arena.committed_count(), 0);
        let blanks = arena.ids().filter(|&id| arena[id].is_blank()).count();
        assert_eq!(blanks, 2);
        assert!(arena.ids().all(|id| arena[id].location() == Location::Bag));
    }

    #[test]
    fn test_reset_restores_baseline() {
        let rules = RuleSet::classic();
        let mut arena = TileArena::from_rules(&rules);
        let id = arena.ids().find(|&id| arena[id].is_blank()).unwrap();
        arena[id].designation = Some('E');
        arena[id].owner = Some(1);
        assert_eq!(arena[id].face(), 'E');
        arena.reset(id);
        assert_eq!(arena[id].face(), BLANK);
        assert_eq!(arena[id].points, 0);
        assert_eq!(arena[id].owner, None);
    }
}
