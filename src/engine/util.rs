use std::fmt;
use std::slice::Iter;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn iter() -> Iter<'static, Direction> {
        static DIRS: [Direction; 2] = [Direction::Across, Direction::Down];
        DIRS.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the next position in the given direction on a board of `size` cells per side
    pub fn next(&self, dir: Direction, size: usize) -> Option<Position> {
        let mut p = *self;
        p[dir] += 1;
        if p[dir] < size {
            Some(p)
        } else {
            None
        }
    }

    /// Returns the previous position in the given direction
    pub fn prev(&self, dir: Direction) -> Option<Position> {
        let mut p = *self;
        if p[dir] == 0 {
            return None;
        }
        p[dir] -= 1;
        Some(p)
    }

    /// Returns all the valid 4-adjacent positions to this position
    pub fn adjacent(&self, size: usize) -> Vec<Position> {
        let mut result = Vec::with_capacity(4);
        for &d in Direction::iter() {
            if let Some(pos) = self.next(d, size) {
                result.push(pos);
            }
            if let Some(pos) = self.prev(d) {
                result.push(pos);
            }
        }
        result
    }

    /// Converts the row/col to a 1d index
    pub fn as_index(&self, size: usize) -> usize {
        self.row * size + self.col
    }

    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Column letters used in play notation: `A` to `Z`, then `AA`, `AB`, ...
    pub fn column_label(&self) -> String {
        let mut label = Vec::new();
        let mut n = self.col;
        loop {
            label.push((b'A' + (n % 26) as u8) as char);
            if n < 26 {
                break;
            }
            n = n / 26 - 1;
        }
        label.into_iter().rev().collect()
    }

    /// Standard play notation: row number first for across plays, column letter first for down plays
    pub fn notation(&self, dir: Direction) -> String {
        match dir {
            Direction::Across => format!("{}{}", self.row + 1, self.column_label()),
            Direction::Down => format!("{}{}", self.column_label(), self.row + 1),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.column_label(), self.row + 1)
    }
}

impl std::ops::Index<Direction> for Position {
    type Output = usize;

    fn index(&self, index: Direction) -> &Self::Output {
        match index {
            Direction::Across => &self.col,
            Direction::Down => &self.row,
        }
    }
}

impl std::ops::IndexMut<Direction> for Position {
    fn index_mut(&mut self, index: Direction) -> &mut Self::Output {
        match index {
            Direction::Across => &mut self.col,
            Direction::Down => &mut self.row,
        }
    }
}
