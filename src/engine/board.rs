use super::tile::TileId;
use super::util::{Direction, Position};

/// Square grid where each cell holds at most one tile
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    state: Vec<Option<TileId>>,
}

impl Board {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            state: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn get(&self, pos: Position) -> Option<TileId> {
        if !self.contains(pos) {
            return None;
        }
        self.state[pos.as_index(self.size)]
    }

    /// Checks if the cell at the given position holds a tile
    pub fn is_letter(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    pub(crate) fn set(&mut self, pos: Position, tile: TileId) {
        let idx = pos.as_index(self.size);
        self.state[idx] = Some(tile);
    }

    pub(crate) fn take(&mut self, pos: Position) -> Option<TileId> {
        if !self.contains(pos) {
            return None;
        }
        let idx = pos.as_index(self.size);
        self.state[idx].take()
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Position, TileId)> + '_ {
        self.state
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|id| (Position::from_index(i, self.size), id)))
    }

    /// Maximal contiguous run of occupied cells through `pos` along `dir`, from first to last cell
    pub fn run_through(&self, pos: Position, dir: Direction) -> Vec<Position> {
        let mut start = pos;
        while let Some(prev) = start.prev(dir) {
            if !self.is_letter(prev) {
                break;
            }
            start = prev;
        }

        let mut run = vec![start];
        let mut curr = start;
        while let Some(next) = curr.next(dir, self.size) {
            if !self.is_letter(next) {
                break;
            }
            run.push(next);
            curr = next;
        }
        run
    }
}

impl std::ops::Index<Position> for Board {
    type Output = Option<TileId>;

    fn index(&self, index: Position) -> &Self::Output {
        &self.state[index.as_index(self.size)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_through() {
        let mut board = Board::empty(5);
        for col in 1..4 {
            board.set(Position::new(2, col), TileId(col));
        }
        let run = board.run_through(Position::new(2, 2), Direction::Across);
        assert_eq!(run.first(), Some(&Position::new(2, 1)));
        assert_eq!(run.len(), 3);

        let down = board.run_through(Position::new(2, 2), Direction::Down);
        assert_eq!(down, vec![Position::new(2, 2)]);
    }

    #[test]
    fn test_take_and_occupied() {
        let mut board = Board::empty(3);
        board.set(Position::new(0, 2), TileId(7));
        board.set(Position::new(2, 0), TileId(8));
        let cells: Vec<_> = board.occupied().collect();
        assert_eq!(cells, vec![(Position::new(0, 2), TileId(7)), (Position::new(2, 0), TileId(8))]);
        assert_eq!(board.take(Position::new(0, 2)), Some(TileId(7)));
        assert!(!board.is_letter(Position::new(0, 2)));
        assert_eq!(board[Position::new(2, 0)], Some(TileId(8)));
        assert_eq!(board.get(Position::new(5, 5)), None);
    }
}
