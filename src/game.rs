use std::sync::mpsc::{Receiver, TryRecvError};
use std::{cmp::min, thread::sleep, time::{Duration, Instant}};

use crossterm::event::KeyEvent;
use log::{debug, info};

use crate::error::GameError;
use crate::input::command_for;
use crate::term::Screen;
use crate::world::{TickOutcome, World};

// Longest stretch the loop sleeps before looking at the keyboard again.
const POLL_SLICE: Duration = Duration::from_millis(5);

/// Runs the tick loop: keys are handled the moment they arrive, the world
/// steps once per `interval`, and the screen is redrawn right after each step.
pub struct SnakeGame<S: Screen> {
    screen: S,
    keys: Receiver<KeyEvent>,
    interval: Duration,
    ticks: u64,
}

impl<S: Screen> SnakeGame<S> {
    pub fn new(screen: S, keys: Receiver<KeyEvent>, interval: Duration) -> Self {
        SnakeGame { screen, keys, interval, ticks: 0 }
    }

    /// Plays until the world is over and returns the final score.
    pub fn play(&mut self, world: &mut World) -> Result<u64, GameError> {
        self.screen.draw_world(world)?;

        while !world.is_over() {
            match self.keys.try_recv() {
                Ok(key) => {
                    world.handle_input(command_for(&key));
                    continue;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => return Err(GameError::InputClosed),
            }

            let now = Instant::now();
            let elapsed = world.since_update(now).unwrap_or(self.interval);

            if elapsed >= self.interval {
                self.step(world)?;
                world.mark_updated(now);
            } else {
                sleep(min(self.interval - elapsed, POLL_SLICE));
            }
        }

        info!("Game over after {} ticks, score {}", self.ticks, world.score());
        Ok(world.score())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn into_screen(self) -> S {
        self.screen
    }

    fn step(&mut self, world: &mut World) -> Result<(), GameError> {
        self.ticks += 1;

        match world.tick() {
            TickOutcome::Moved(frame) => self.screen.draw_frame(&frame)?,
            TickOutcome::Held => debug!("Tick {} held", self.ticks),
            TickOutcome::Collided | TickOutcome::Idle => {}
        }

        Ok(())
    }
}
