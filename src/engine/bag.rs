use rand::Rng;

use super::tile::TileId;

/// Undrawn tiles
#[derive(Debug, Clone, Default)]
pub struct Bag {
    tiles: Vec<TileId>,
}

impl Bag {
    pub fn new(tiles: Vec<TileId>) -> Self {
        Self { tiles }
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn put_back(&mut self, tile: TileId) {
        self.tiles.push(tile);
    }

    /// Draws up to `n` tiles uniformly at random without replacement
    pub fn draw_tiles<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Vec<TileId> {
        let n = n.min(self.tiles.len());
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            let idx = rng.gen_range(0..self.tiles.len());
            drawn.push(self.tiles.swap_remove(idx));
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_draw_without_replacement() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bag = Bag::new((0..10).map(TileId).collect());
        let drawn = bag.draw_tiles(4, &mut rng);
        assert_eq!(drawn.len(), 4);
        assert_eq!(bag.len(), 6);

        let mut seen: HashSet<_> = drawn.into_iter().collect();
        seen.extend(bag.tiles().iter().copied());
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_draw_more_than_available() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bag = Bag::new(vec![TileId(0), TileId(1)]);
        assert_eq!(bag.draw_tiles(7, &mut rng).len(), 2);
        assert!(bag.is_empty());
        assert!(bag.draw_tiles(1, &mut rng).is_empty());
    }
}
