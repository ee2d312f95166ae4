//! # Snake Evo - Neuroevolution for the Snake Game
//!
//! Evolves a population of small feed-forward neural networks to play Snake
//! using a genetic algorithm instead of gradient descent.
//!
//! ## Features
//!
//! - Dense matrix engine and a three-layer sigmoid network
//! - Deterministic grid game with wall and self collision
//! - Shaping rewards per tick, quadratic food/lifetime fitness per life
//! - Elitism, roulette selection, uniform crossover and per-weight mutation
//! - Tick-by-tick driving for renderers, or whole generations on rayon
//! - Seedable random source for reproducible runs
//!
//! ## Core Modules
//!
//! - [`simulation::matrix`] - Dense matrix operations
//! - [`simulation::brain`] - Neural network implementation
//! - [`simulation::environment`] - The snake game
//! - [`simulation::agent`] - Agent behavior and perception
//! - [`simulation::evolution`] - Selection and breeding
//! - [`simulation::population`] - Main simulation controller
//!
//! ## Example
//!
//! ```rust,no_run
//! use snake_evo::simulation::params::Params;
//! use snake_evo::simulation::population::Population;
//!
//! let params = Params {
//!     seed: Some(7),
//!     starvation_limit: Some(400),
//!     ..Params::default()
//! };
//! let mut population = Population::new(params).expect("valid params");
//! let summary = population.run_generation().expect("generation runs");
//! println!("best food in generation 1: {}", summary.best_food);
//! ```

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agents, their senses and the perception system.
    pub mod agent;
    /// Feed-forward network used as the agent's brain.
    pub mod brain;
    /// The snake game itself.
    pub mod environment;
    /// Error types.
    pub mod error;
    /// Fitness, selection and breeding.
    pub mod evolution;
    /// Grid cells and headings.
    pub mod grid;
    /// Dense matrix used by the brain.
    pub mod matrix;
    /// Simulation parameters.
    pub mod params;
    /// Population controller driving agents and generations.
    pub mod population;
    /// Read-only snapshot for renderers.
    pub mod snapshot;
    /// Per-generation statistics.
    pub mod stats;
}
