use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ParamsError;

/// Per-tick shaping rewards applied to an agent's running fitness.
///
/// Only the signs and relative sizes matter; the genetic fitness ignores
/// these entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardParams {
    /// Added when a move gets closer to food, subtracted when it moves away.
    pub approach_reward: f64,
    /// Added on eating food.
    pub food_reward: f64,
    /// Subtracted on death.
    pub death_penalty: f64,
    /// Ticks without food after which the stagnation penalty kicks in.
    pub stagnation_threshold: u32,
    /// Subtracted every tick past `stagnation_threshold`.
    pub stagnation_penalty: f64,
    /// Consecutive ticks in one heading after which the loop penalty kicks in.
    pub loop_threshold: u32,
    /// Subtracted every tick past `loop_threshold`.
    pub loop_penalty: f64,
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            approach_reward: 5.0,
            food_reward: 10.0,
            death_penalty: 100.0,
            stagnation_threshold: 100,
            stagnation_penalty: 5.0,
            loop_threshold: 10,
            loop_penalty: 5.0,
        }
    }
}

/// Simulation parameters that control the game and the genetic algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Side length of the square board.
    pub grid_size: u32,
    /// Body length of a freshly spawned snake.
    pub initial_length: usize,
    /// Agents per generation.
    pub population_size: usize,
    /// Per-parameter mutation probability for offspring.
    pub mutation_rate: f64,
    /// Hidden layer width of every brain.
    pub hidden_nodes: usize,
    /// Best brains copied unchanged into the next generation.
    pub elite_count: usize,
    /// Multiplier on `food_eaten²` in the genetic fitness.
    pub fitness_food_weight: f64,
    /// Shaping rewards.
    pub rewards: RewardParams,
    /// Kill an agent once it goes this many ticks without food.
    /// `None` means snakes only die by collision.
    pub starvation_limit: Option<u32>,
    /// Give up placing food after this many occupied samples.
    /// `None` resamples until a free cell is found.
    pub food_retry_limit: Option<u32>,
    /// Seed for the shared random source. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Ticks per simulated second, used by elapsed-time driving.
    pub ticks_per_second: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_length: 3,
            population_size: 50,
            mutation_rate: 0.1,
            hidden_nodes: 16,
            elite_count: 2,
            fitness_food_weight: 1000.0,
            rewards: RewardParams::default(),
            starvation_limit: None,
            food_retry_limit: None,
            seed: None,
            ticks_per_second: 60.0,
        }
    }
}

impl Params {
    /// Checks that the parameters describe a playable setup.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.grid_size == 0 {
            return Err(ParamsError::EmptyGrid);
        }
        if self.population_size == 0 {
            return Err(ParamsError::EmptyPopulation);
        }
        if self.elite_count > self.population_size {
            return Err(ParamsError::TooManyElites {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        // The snake spawns leftward from the center cell.
        let max_length = (self.grid_size / 2 + 1) as usize;
        if self.initial_length == 0 || self.initial_length > max_length {
            return Err(ParamsError::InvalidInitialLength {
                length: self.initial_length,
                grid_size: self.grid_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ParamsError::InvalidMutationRate(self.mutation_rate));
        }
        if self.hidden_nodes == 0 {
            return Err(ParamsError::EmptyHiddenLayer);
        }
        if self.ticks_per_second.is_nan() || self.ticks_per_second <= 0.0 {
            return Err(ParamsError::InvalidTickRate(self.ticks_per_second));
        }
        Ok(())
    }

    /// Loads parameters from a JSON file and validates them.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        let params: Params = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        (self.grid_size as usize).pow(2)
    }
}
