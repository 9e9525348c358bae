use super::tile::TileId;

/// Ordered tiles held by one player. Tiles staged on the board during the
/// current turn stay in the rack until the turn is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rack {
    tiles: Vec<TileId>,
}

impl Rack {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    /// Adds an additional tile at the end of the rack
    pub fn add_inplace(&mut self, tile: TileId) {
        self.tiles.push(tile);
    }

    /// Removes a tile, keeping the order of the others. Returns false if the tile was not held.
    pub fn remove_inplace(&mut self, tile: TileId) -> bool {
        match self.tiles.iter().position(|&t| t == tile) {
            Some(idx) => {
                self.tiles.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl std::iter::FromIterator<TileId> for Rack {
    fn from_iter<T: IntoIterator<Item = TileId>>(iter: T) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_keeps_order() {
        let mut rack: Rack = [TileId(3), TileId(1), TileId(4)].into_iter().collect();
        assert!(rack.remove_inplace(TileId(1)));
        assert!(!rack.remove_inplace(TileId(9)));
        assert_eq!(rack.tiles(), &[TileId(3), TileId(4)]);
        rack.add_inplace(TileId(5));
        assert_eq!(rack.len(), 3);
        assert!(rack.contains(TileId(5)));
    }
}
