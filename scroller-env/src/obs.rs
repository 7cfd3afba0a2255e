//! Observation for [`Platformer`](crate::Platformer).
use scroller_core::{Obs, StateKey};

/// Tile codes of [`TileObs`].
pub mod tile {
    /// Nothing.
    pub const EMPTY: u8 = 0;
    /// Ground or obstacle.
    pub const SOLID: u8 = 1;
    /// A walking enemy.
    pub const ENEMY: u8 = 2;
    /// The player.
    pub const PLAYER: u8 = 3;
}

/// A window of tiles around the player, row-major with row `0` at the top.
///
/// The window is centred horizontally on the player's column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileObs {
    tiles: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl TileObs {
    /// Creates an empty window.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            tiles: vec![tile::EMPTY; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates a window from row-major tiles.
    pub fn from_tiles(tiles: Vec<u8>, rows: usize, cols: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(
            tiles.len() == rows * cols,
            "{} tiles do not fill {}x{}",
            tiles.len(),
            rows,
            cols
        );
        Ok(Self { tiles, rows, cols })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the tile at a position, [`tile::EMPTY`] outside the window.
    pub fn get(&self, row: i64, col: i64) -> u8 {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            tile::EMPTY
        } else {
            self.tiles[row as usize * self.cols + col as usize]
        }
    }

    /// Writes a tile. Positions outside the window are ignored.
    pub fn set(&mut self, row: i64, col: i64, value: u8) {
        if row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols {
            self.tiles[row as usize * self.cols + col as usize] = value;
        }
    }

    /// Returns the position of the player tile, if the player is in view.
    pub fn player(&self) -> Option<(i64, i64)> {
        self.tiles
            .iter()
            .position(|&t| t == tile::PLAYER)
            .map(|i| ((i / self.cols) as i64, (i % self.cols) as i64))
    }

    /// Returns the positions of all enemy tiles.
    pub fn enemies(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, &t)| t == tile::ENEMY)
            .map(move |(i, _)| ((i / self.cols) as i64, (i % self.cols) as i64))
    }
}

impl Obs for TileObs {
    fn state_key(&self) -> StateKey {
        StateKey::from_ints(self.tiles.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_lookup() {
        let mut obs = TileObs::empty(3, 4);
        assert_eq!(obs.player(), None);
        obs.set(1, 2, tile::PLAYER);
        obs.set(2, 3, tile::ENEMY);
        obs.set(5, 5, tile::SOLID);
        assert_eq!(obs.player(), Some((1, 2)));
        assert_eq!(obs.enemies().collect::<Vec<_>>(), vec![(2, 3)]);
        assert_eq!(obs.get(-1, 0), tile::EMPTY);
    }

    #[test]
    fn test_state_key_follows_tiles() {
        let a = TileObs::from_tiles(vec![0, 1, 3, 1], 2, 2).unwrap();
        let b = TileObs::from_tiles(vec![0, 1, 3, 1], 2, 2).unwrap();
        let c = TileObs::from_tiles(vec![3, 1, 0, 1], 2, 2).unwrap();
        assert_eq!(a.state_key(), b.state_key());
        assert_ne!(a.state_key(), c.state_key());
        assert!(TileObs::from_tiles(vec![0; 3], 2, 2).is_err());
    }
}
