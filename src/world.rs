use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, Scoring};
use crate::input::Command;
use crate::snake::{Direction, Snake};
use crate::{Coords, Grid};

// Random picks tried before falling back to scanning for free cells.
const SPAWN_ATTEMPTS: usize = 64;

/// Cells that changed during one tick, for the renderer to paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub new_head: Coords,
    pub vacated_tail: Option<Coords>,
    pub eaten: Vec<Coords>,
    pub spawned: Vec<Coords>,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Moved(Frame),
    /// Vertical compensation swallowed this tick; nothing changed.
    Held,
    /// The snake ran into itself. The world is now over.
    Collided,
    /// The game was already over before this tick.
    Idle,
}

pub struct World {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    foods: HashSet<Coords>,
    eaten_count: u64,
    quit: bool,
    updated: Option<Instant>,
    vertical_ticks: u64,
    rng: StdRng,
}

impl World {
    pub fn new(config: GameConfig, grid: Grid) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        World::with_rng(config, grid, rng)
    }

    pub fn with_rng(config: GameConfig, grid: Grid, rng: StdRng) -> Self {
        let mut snake = Snake::new(grid.center(), Direction::Right);
        snake.grow(config.initial_growth);

        let mut world = World {
            config,
            grid,
            snake,
            foods: HashSet::new(),
            eaten_count: 0,
            quit: false,
            updated: None,
            vertical_ticks: 0,
            rng,
        };
        world.replenish_food();

        info!(
            "New world {}x{}, snake at {:?}, {} food",
            grid.width, grid.height, world.snake.head(), world.foods.len()
        );
        world
    }

    /// Advances the simulation by one step.
    ///
    /// On collision the world is frozen: nothing but the quit flag changes,
    /// and every later call returns `Idle`.
    pub fn tick(&mut self) -> TickOutcome {
        if self.quit {
            return TickOutcome::Idle;
        }

        let direction = self.snake.direction();
        if !direction.is_vertical() {
            self.vertical_ticks = 0;
        } else if self.config.vertical_skip {
            self.vertical_ticks += 1;
            if self.vertical_ticks % 2 == 0 {
                return TickOutcome::Held;
            }
        }

        let step = self.snake.advance(direction, self.grid);
        if step.collided {
            info!("Snake ran into itself at {:?}, score {}", step.new_head, self.score());
            self.quit = true;
            return TickOutcome::Collided;
        }

        // A swallowed food cell becomes a segment right away.
        if self.foods.contains(&step.new_head) {
            self.snake.grow(1);
        }
        let vacated_tail = self.snake.commit(step.new_head);

        let eaten: Vec<Coords> = self
            .foods
            .iter()
            .copied()
            .filter(|food| self.snake.occupies(*food))
            .collect();

        for food in &eaten {
            self.foods.remove(food);
            self.eaten_count += 1;
            self.snake.grow(self.config.grow_amount);
        }

        let spawned = self.replenish_food();

        if !eaten.is_empty() {
            info!("Ate {} food, score now {}", eaten.len(), self.score());
        }
        debug!("Head {:?}, tail freed {:?}", step.new_head, vacated_tail);

        TickOutcome::Moved(Frame {
            new_head: step.new_head,
            vacated_tail,
            eaten,
            spawned,
            score: self.score(),
        })
    }

    pub fn handle_input(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => {
                if !self.snake.set_direction(direction) {
                    debug!("Ignored reversing turn to {:?}", direction);
                }
            }
            Command::Quit => {
                info!("Quit requested");
                self.quit = true;
            }
            Command::Ignore => {}
        }
    }

    pub fn score(&self) -> u64 {
        match self.config.scoring {
            Scoring::BodyLength => self.snake.len() as u64 - 1,
            Scoring::PerFood(step) => self.eaten_count * step,
        }
    }

    pub fn is_over(&self) -> bool {
        self.quit
    }

    /// Time since the last tick, or `None` before the first one.
    pub fn since_update(&self, now: Instant) -> Option<Duration> {
        self.updated.map(|at| now.saturating_duration_since(at))
    }

    pub fn mark_updated(&mut self, now: Instant) {
        self.updated = Some(now);
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> impl Iterator<Item = Coords> + '_ {
        self.foods.iter().copied()
    }

    pub fn food_count(&self) -> usize {
        self.foods.len()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    /// Swaps in a new food set. Cells outside the grid are dropped.
    pub fn replace_foods<I>(&mut self, foods: I)
    where
        I: IntoIterator<Item = Coords>,
    {
        let grid = self.grid;
        self.foods = foods.into_iter().filter(|pos| grid.contains(*pos)).collect();
    }

    ///////////////////////////////////////////////////////////////////////////

    fn replenish_food(&mut self) -> Vec<Coords> {
        let mut spawned = vec![];

        while self.foods.len() < self.config.food_count {
            match self.pick_free_cell() {
                Some(pos) => {
                    self.foods.insert(pos);
                    spawned.push(pos);
                }
                None => {
                    warn!("No free cell left for food ({} on the board)", self.foods.len());
                    break;
                }
            }
        }

        spawned
    }

    fn is_free(&self, pos: Coords) -> bool {
        !self.foods.contains(&pos) && !self.snake.occupies(pos)
    }

    fn pick_free_cell(&mut self) -> Option<Coords> {
        if self.snake.len() + self.foods.len() >= self.grid.cell_count() {
            return None;
        }

        for _ in 0..SPAWN_ATTEMPTS {
            let pos = (
                self.rng.gen_range(0..self.grid.width),
                self.rng.gen_range(0..self.grid.height),
            );
            if self.is_free(pos) {
                return Some(pos);
            }
        }

        // Crowded board: pick among whatever is left.
        let choices: Vec<Coords> = self.grid.cells().filter(|pos| self.is_free(*pos)).collect();
        choices.choose(&mut self.rng).copied()
    }
}
