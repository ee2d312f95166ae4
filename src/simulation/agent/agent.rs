//! A snake controlled by a neural network.
//!
//! The agent owns its brain and its game exclusively. Each tick it senses the
//! board, picks the heading with the strongest brain output, moves, and books
//! the shaping rewards for that move into `fitness`.

use std::cmp::Ordering;

use rand::Rng;

use super::super::brain::{Brain, argmax};
use super::super::environment::{SnakeGame, StepOutcome};
use super::super::error::SimulationError;
use super::super::grid::Direction;
use super::super::params::Params;
use super::perception::Perception;

/// One population slot: a brain playing one life of the game.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Neural network that picks the heading.
    pub brain: Brain,
    /// The life being played.
    pub game: SnakeGame,
    /// Running shaping reward during the life. Overwritten by the genetic
    /// fitness at generation turnover.
    pub fitness: f64,
    /// Ticks survived.
    pub lifetime: u32,
    /// Food eaten during this life.
    pub food_eaten: u32,
    /// Ticks since the last meal (or since birth).
    pub ticks_since_last_food: u32,
    /// Consecutive ticks spent in `last_direction`.
    pub ticks_since_last_turn: u32,
    /// Heading held on the previous tick.
    pub last_direction: Direction,
}

impl Agent {
    /// Creates an agent with a fresh game.
    pub fn new<R: Rng + ?Sized>(
        brain: Brain,
        params: &Params,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        let game = SnakeGame::new(params, rng)?;
        Ok(Self::with_game(brain, game))
    }

    /// Creates an agent playing an existing game.
    pub fn with_game(brain: Brain, game: SnakeGame) -> Self {
        let last_direction = game.direction();
        Self {
            brain,
            game,
            fitness: 0.0,
            lifetime: 0,
            food_eaten: 0,
            ticks_since_last_food: 0,
            ticks_since_last_turn: 0,
            last_direction,
        }
    }

    /// Whether the current life is still going.
    pub fn is_alive(&self) -> bool {
        self.game.is_alive()
    }

    /// Picks the heading with the highest brain output.
    ///
    /// Reversals are filtered later by the game, so the returned heading may
    /// be ignored.
    pub fn decide(&self, perception: &Perception) -> Result<Direction, SimulationError> {
        let inputs = perception.perceive(&self.game);
        let outputs = self.brain.feed_forward(&inputs)?;
        argmax(&outputs)
            .filter(|_| outputs.len() == Direction::ALL.len())
            .and_then(Direction::from_index)
            .ok_or(SimulationError::DimensionError {
                expected: Direction::ALL.len(),
                actual: outputs.len(),
            })
    }

    /// Plays one tick and applies the shaping rewards.
    ///
    /// Does nothing once the agent is dead.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        perception: &Perception,
        params: &Params,
        rng: &mut R,
    ) -> Result<StepOutcome, SimulationError> {
        if !self.is_alive() {
            return self.game.step(self.game.direction(), rng);
        }

        let action = self.decide(perception)?;
        let outcome = self.game.step(action, rng)?;
        let rewards = &params.rewards;

        match outcome.distance_delta.cmp(&0) {
            Ordering::Less => self.fitness += rewards.approach_reward,
            Ordering::Greater => self.fitness -= rewards.approach_reward,
            Ordering::Equal => {}
        }

        if !outcome.alive {
            self.fitness -= rewards.death_penalty;
            return Ok(outcome);
        }

        if outcome.ate_food {
            self.food_eaten += 1;
            self.fitness += rewards.food_reward;
            self.ticks_since_last_food = 0;
        } else {
            self.ticks_since_last_food += 1;
        }

        self.lifetime += 1;

        if self.ticks_since_last_food > rewards.stagnation_threshold {
            self.fitness -= rewards.stagnation_penalty;
        }

        let heading = self.game.direction();
        if heading == self.last_direction {
            self.ticks_since_last_turn += 1;
            if self.ticks_since_last_turn > rewards.loop_threshold {
                self.fitness -= rewards.loop_penalty;
            }
        } else {
            self.ticks_since_last_turn = 0;
            self.last_direction = heading;
        }

        if params
            .starvation_limit
            .is_some_and(|limit| self.ticks_since_last_food >= limit)
        {
            self.game.kill();
            self.fitness -= rewards.death_penalty;
            return Ok(StepOutcome {
                alive: false,
                ..outcome
            });
        }

        Ok(outcome)
    }

    /// Ticks until the life ends.
    ///
    /// Only terminates if the brain eventually crashes the snake or
    /// `params.starvation_limit` is set.
    pub fn live_out<R: Rng + ?Sized>(
        &mut self,
        perception: &Perception,
        params: &Params,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        while self.is_alive() {
            self.tick(perception, params, rng)?;
        }
        Ok(())
    }

    /// Genetic fitness: `food_eaten² × fitness_food_weight + lifetime`.
    ///
    /// Independent of the shaping rewards accumulated in `fitness`.
    pub fn raw_fitness(&self, params: &Params) -> f64 {
        f64::from(self.food_eaten).powi(2) * params.fitness_food_weight + f64::from(self.lifetime)
    }
}
