use std::collections::{HashSet, VecDeque};

use crate::{Coords, Grid};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Up | Down)
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// Where the head would go next, and whether that cell is already snake.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Advance {
    pub new_head: Coords,
    pub collided: bool,
}

/// Body runs tail (front) to head (back). `occupied` mirrors `body` exactly;
/// both are only touched through `push_head` and `pop_tail`.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Coords>,
    occupied: HashSet<Coords>,
    direction: Direction,
    grow_pending: u32,
}

impl Snake {
    pub fn new(pos: Coords, direction: Direction) -> Self {
        let mut snake = Snake {
            body: VecDeque::new(),
            occupied: HashSet::new(),
            direction,
            grow_pending: 0,
        };
        snake.push_head(pos);
        snake
    }

    /// Builds a snake from segments listed tail first. Repeated cells are
    /// dropped, since a live snake never covers a cell twice.
    ///
    /// Returns `None` when `segments` is empty.
    pub fn from_body<I>(segments: I, direction: Direction) -> Option<Self>
    where
        I: IntoIterator<Item = Coords>,
    {
        let mut snake = Snake {
            body: VecDeque::new(),
            occupied: HashSet::new(),
            direction,
            grow_pending: 0,
        };

        for pos in segments {
            if !snake.occupies(pos) {
                snake.push_head(pos);
            }
        }

        if snake.body.is_empty() { None } else { Some(snake) }
    }

    /// Next head cell one step in `direction`, wrapping at the grid edges.
    /// The tail still counts as occupied here: it has not moved yet.
    pub fn advance(&self, direction: Direction, grid: Grid) -> Advance {
        let (x, y) = self.head();
        let (dx, dy) = direction.delta();

        let new_head = (
            (x as i32 + dx).rem_euclid(grid.width as i32) as u16,
            (y as i32 + dy).rem_euclid(grid.height as i32) as u16,
        );

        Advance { new_head, collided: self.occupies(new_head) }
    }

    /// Moves the head to `new_head`. Returns the vacated tail cell, or `None`
    /// while growth is still pending.
    pub fn commit(&mut self, new_head: Coords) -> Option<Coords> {
        debug_assert!(!self.occupies(new_head), "committed head {:?} onto the body", new_head);
        self.push_head(new_head);

        if self.grow_pending > 0 {
            self.grow_pending -= 1;
            None
        } else {
            self.pop_tail()
        }
    }

    pub fn grow(&mut self, amount: u32) {
        self.grow_pending = self.grow_pending.saturating_add(amount);
    }

    /// Returns `false` when the turn was refused because it would reverse the
    /// snake onto itself.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.occupied.contains(&pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn head(&self) -> Coords {
        // A snake always has at least one segment: `commit` pushes before it pops.
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Coords {
        self.body[0]
    }

    pub fn body(&self) -> impl Iterator<Item = Coords> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn grow_pending(&self) -> u32 {
        self.grow_pending
    }

    ///////////////////////////////////////////////////////////////////////////

    fn push_head(&mut self, pos: Coords) {
        self.body.push_back(pos);
        self.occupied.insert(pos);
    }

    fn pop_tail(&mut self) -> Option<Coords> {
        let tail = self.body.pop_front()?;
        self.occupied.remove(&tail);
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: Grid = Grid { width: 10, height: 8 };

    #[test]
    fn test_advance_wraps_every_edge() {
        let right = Snake::new((9, 3), Right);
        assert_eq!(right.advance(Right, GRID).new_head, (0, 3));

        let left = Snake::new((0, 3), Left);
        assert_eq!(left.advance(Left, GRID).new_head, (9, 3));

        let up = Snake::new((4, 0), Up);
        assert_eq!(up.advance(Up, GRID).new_head, (4, 7));

        let down = Snake::new((4, 7), Down);
        assert_eq!(down.advance(Down, GRID).new_head, (4, 0));
    }

    #[test]
    fn test_advance_inside_grid() {
        let snake = Snake::new((5, 5), Right);
        assert_eq!(snake.advance(Up, GRID).new_head, (5, 4));
        assert_eq!(snake.advance(Down, GRID).new_head, (5, 6));
        assert_eq!(snake.advance(Left, GRID).new_head, (4, 5));
        assert_eq!(snake.advance(Right, GRID).new_head, (6, 5));
    }

    #[test]
    fn test_advance_has_no_side_effects() {
        let snake = Snake::from_body(vec![(1, 1), (2, 1), (3, 1)], Right).unwrap();
        snake.advance(Right, GRID);
        snake.advance(Right, GRID);

        assert_eq!(snake.head(), (3, 1));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_opposite_direction_rejected() {
        for dir in [Up, Down, Left, Right] {
            let mut snake = Snake::new((5, 5), dir);
            assert!(!snake.set_direction(dir.opposite()));
            assert_eq!(snake.direction(), dir);
        }
    }

    #[test]
    fn test_other_directions_accepted() {
        let mut snake = Snake::new((5, 5), Right);
        assert!(snake.set_direction(Right));
        assert_eq!(snake.direction(), Right);
        assert!(snake.set_direction(Up));
        assert_eq!(snake.direction(), Up);
        assert!(snake.set_direction(Left));
        assert_eq!(snake.direction(), Left);
    }

    #[test]
    fn test_commit_without_growth_moves_tail() {
        let mut snake = Snake::from_body(vec![(1, 1), (2, 1)], Right).unwrap();
        let step = snake.advance(Right, GRID);

        assert_eq!(snake.commit(step.new_head), Some((1, 1)));
        assert_eq!(snake.len(), 2);
        assert!(!snake.occupies((1, 1)));
        assert!(snake.occupies((3, 1)));
    }

    #[test]
    fn test_growth_keeps_tail_for_n_commits() {
        let mut snake = Snake::new((0, 0), Right);
        snake.grow(3);

        for expected_len in 2..=4 {
            let step = snake.advance(Right, GRID);
            assert_eq!(snake.commit(step.new_head), None);
            assert_eq!(snake.len(), expected_len);
        }

        assert_eq!(snake.grow_pending(), 0);
        let step = snake.advance(Right, GRID);
        assert_eq!(snake.commit(step.new_head), Some((0, 0)));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_moving_onto_tail_is_collision() {
        // Square loop: head at (1,0), tail at (0,0) directly to its left.
        let snake = Snake::from_body(vec![(0, 0), (0, 1), (1, 1), (1, 0)], Left).unwrap();
        let step = snake.advance(Left, GRID);

        assert_eq!(step.new_head, (0, 0));
        assert!(step.collided);
    }

    #[test]
    fn test_occupancy_matches_body() {
        let mut snake = Snake::new((2, 2), Down);
        snake.grow(2);

        for dir in [Down, Down, Right, Right, Up] {
            snake.set_direction(dir);
            let step = snake.advance(snake.direction(), GRID);
            snake.commit(step.new_head);

            let body: HashSet<Coords> = snake.body().collect();
            assert_eq!(body, snake.occupied);
            assert_eq!(body.len(), snake.len());
        }
    }

    #[test]
    fn test_from_body_requires_segments() {
        assert!(Snake::from_body(Vec::new(), Up).is_none());

        let snake = Snake::from_body(vec![(5, 7), (5, 6), (5, 5)], Up).unwrap();
        assert_eq!(snake.tail(), (5, 7));
        assert_eq!(snake.head(), (5, 5));
    }
}
