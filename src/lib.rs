//! Terminal snake: a snake wanders a wrapping character grid, eats food to
//! grow and loses when it runs into itself.
//!
//! The simulation (`snake`, `world`) is free of terminal I/O. `game` drives it
//! at a fixed tick, `term` paints it with crossterm and `input` turns key
//! presses into commands.

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod snake;
pub mod term;
pub mod world;

use error::GameError;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Size of the playing field. Every coordinate lies in `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: TermInt,
    pub height: TermInt,
}

impl Grid {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        Grid { width, height }
    }

    /// Rejects grids too small for a snake and a piece of food.
    pub fn playable(self) -> Result<Self, GameError> {
        if self.width < 2 || self.height < 2 {
            return Err(GameError::GridTooSmall { width: self.width, height: self.height });
        }
        Ok(self)
    }

    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 < self.width && pos.1 < self.height
    }

    pub fn center(&self) -> Coords {
        (self.width / 2, self.height / 2)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn cells(&self) -> impl Iterator<Item = Coords> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiny_grids_rejected() {
        assert!(matches!(
            Grid::new(1, 20).playable(),
            Err(GameError::GridTooSmall { width: 1, height: 20 })
        ));
        assert!(matches!(Grid::new(20, 0).playable(), Err(GameError::GridTooSmall { .. })));
        assert_eq!(Grid::new(2, 2).playable().unwrap(), Grid::new(2, 2));
    }

    #[test]
    fn test_cells_cover_grid() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.cells().count(), grid.cell_count());
        assert!(grid.cells().all(|pos| grid.contains(pos)));
    }
}
