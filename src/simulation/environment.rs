//! The snake game the agents live in.
//!
//! One [`SnakeGame`] covers exactly one life: it starts alive, advances one
//! cell per [`SnakeGame::step`], and once dead it never changes again. A new
//! life gets a new game.

use std::collections::VecDeque;

use log::trace;
use rand::Rng;

use super::error::SimulationError;
use super::grid::{Cell, Direction};
use super::params::Params;

/// What happened during one step of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the snake survived the move.
    pub alive: bool,
    /// Whether the head landed on food.
    pub ate_food: bool,
    /// Manhattan distance to food after the move minus before it.
    ///
    /// Measured against the candidate head, so a fatal move still reports
    /// whether it headed toward the food.
    pub distance_delta: i32,
}

impl StepOutcome {
    const FROZEN: StepOutcome = StepOutcome {
        alive: false,
        ate_food: false,
        distance_delta: 0,
    };

    /// Score gained by this step.
    pub fn score_delta(&self) -> u32 {
        u32::from(self.ate_food)
    }
}

/// Grid-world state for one snake life.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    grid_size: i32,
    /// Head first; cells are unique.
    body: VecDeque<Cell>,
    direction: Direction,
    food: Cell,
    alive: bool,
    score: u32,
    food_retry_limit: Option<u32>,
}

impl SnakeGame {
    /// Starts a new life: a horizontal snake in the middle of the board,
    /// heading right, with food placed on a free cell.
    pub fn new<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Self, SimulationError> {
        let grid_size = params.grid_size as i32;
        let center = grid_size / 2;
        let body: VecDeque<Cell> = (0..params.initial_length as i32)
            .map(|i| Cell::new(center - i, center))
            .collect();
        let food = place_food(&body, grid_size, params.food_retry_limit, rng)?;

        Ok(Self {
            grid_size,
            body,
            direction: Direction::Right,
            food,
            alive: true,
            score: 0,
            food_retry_limit: params.food_retry_limit,
        })
    }

    /// Builds a game from an explicit layout.
    ///
    /// `body` is head first. It must be non-empty and must not cover `food`.
    pub fn from_parts(
        grid_size: u32,
        body: Vec<Cell>,
        direction: Direction,
        food: Cell,
    ) -> Result<Self, SimulationError> {
        if body.is_empty() {
            return Err(SimulationError::InvalidLayout {
                reason: "snake body must contain a head",
            });
        }
        if body.contains(&food) {
            return Err(SimulationError::InvalidLayout {
                reason: "food placed on the snake",
            });
        }
        Ok(Self {
            grid_size: grid_size as i32,
            body: body.into(),
            direction,
            food,
            alive: true,
            score: 0,
            food_retry_limit: None,
        })
    }

    /// Applies an action and advances one cell.
    ///
    /// A dead game is left untouched and reports a frozen outcome. If eating
    /// leaves no cell for new food, the game ends with the body and food as
    /// they were before the move and the placement error is returned.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        action: Direction,
        rng: &mut R,
    ) -> Result<StepOutcome, SimulationError> {
        if !self.alive {
            return Ok(StepOutcome::FROZEN);
        }

        self.steer(action);

        let head = self.head();
        let candidate = head + self.direction;
        let distance_delta =
            candidate.manhattan(self.food) as i32 - head.manhattan(self.food) as i32;

        if self.is_lethal(candidate) {
            self.alive = false;
            return Ok(StepOutcome {
                alive: false,
                ate_food: false,
                distance_delta,
            });
        }

        self.body.push_front(candidate);

        let ate_food = candidate == self.food;
        if ate_food {
            match place_food(&self.body, self.grid_size, self.food_retry_limit, rng) {
                Ok(food) => {
                    self.food = food;
                    self.score += 1;
                }
                Err(err) => {
                    // Nowhere to respawn food: the life ends before the move lands.
                    self.body.pop_front();
                    self.alive = false;
                    return Err(err);
                }
            }
        } else {
            self.body.pop_back();
        }

        Ok(StepOutcome {
            alive: true,
            ate_food,
            distance_delta,
        })
    }

    /// Turns toward `action` unless it reverses the current heading.
    ///
    /// Returns `true` when the heading changed.
    pub fn steer(&mut self, action: Direction) -> bool {
        if action == self.direction || action == self.direction.opposite() {
            return false;
        }
        self.direction = action;
        true
    }

    /// Whether entering `cell` ends the game (wall or body).
    pub fn is_lethal(&self, cell: Cell) -> bool {
        !cell.in_bounds(self.grid_size) || self.body.contains(&cell)
    }

    /// Whether the cell next to the head in `direction` is lethal.
    pub fn danger(&self, direction: Direction) -> bool {
        self.is_lethal(self.head() + direction)
    }

    /// Ends the life without a move.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Head cell.
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Body cells, head first.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Current heading.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current food cell.
    pub fn food(&self) -> Cell {
        self.food
    }

    /// Whether the snake is still alive.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Food eaten during this life.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Side length of the board.
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }
}

/// Samples free cells until one is found or `retry_limit` misses accumulate.
fn place_food<R: Rng + ?Sized>(
    body: &VecDeque<Cell>,
    grid_size: i32,
    retry_limit: Option<u32>,
    rng: &mut R,
) -> Result<Cell, SimulationError> {
    let cells = (grid_size * grid_size) as usize;
    if body.len() >= cells {
        return Err(SimulationError::BoardSaturated { cells: body.len() });
    }

    let mut attempts = 0;
    loop {
        let cell = Cell::new(
            rng.random_range(0..grid_size),
            rng.random_range(0..grid_size),
        );
        if !body.contains(&cell) {
            trace!("food placed at ({}, {}) after {} misses", cell.x, cell.y, attempts);
            return Ok(cell);
        }
        attempts += 1;
        if retry_limit.is_some_and(|limit| attempts >= limit) {
            return Err(SimulationError::FoodPlacementExhausted { attempts });
        }
    }
}
