//! Error types for the numeric engine, the game and configuration loading.

/// Errors raised while running the simulation.
///
/// Shape and dimension errors point at a wiring bug upstream (a network built
/// for a different sensor layout, mismatched parents) and are never coerced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// A matrix operation was invoked on non-conformant operands.
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Name of the failing operation.
        op: &'static str,
        /// Shape `(rows, cols)` of the left operand.
        left: (usize, usize),
        /// Shape `(rows, cols)` of the right operand.
        right: (usize, usize),
    },
    /// A matrix was requested with a zero dimension.
    #[error("matrix dimensions must be non-zero, got {rows}x{cols}")]
    EmptyMatrix {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// The sensor vector length does not match the network input layer.
    #[error("network expects {expected} inputs, got {actual}")]
    DimensionError {
        /// Input nodes of the network.
        expected: usize,
        /// Length of the vector that was fed in.
        actual: usize,
    },
    /// Every cell of the board is covered by the snake.
    #[error("no free cell left for food ({cells} cells occupied)")]
    BoardSaturated {
        /// Number of occupied cells.
        cells: usize,
    },
    /// A game was assembled from an unplayable layout.
    #[error("invalid snake layout: {reason}")]
    InvalidLayout {
        /// What is wrong with the layout.
        reason: &'static str,
    },
    /// Food placement hit its configured retry cap.
    #[error("food placement gave up after {attempts} attempts")]
    FoodPlacementExhausted {
        /// Number of rejected samples.
        attempts: u32,
    },
}

/// Errors raised while loading or validating [`Params`](super::params::Params).
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    /// `grid_size` is zero.
    #[error("grid size must be non-zero")]
    EmptyGrid,
    /// `population_size` is zero.
    #[error("population size must be at least 1")]
    EmptyPopulation,
    /// More elites than agents.
    #[error("elite count {elite_count} exceeds population size {population_size}")]
    #[allow(missing_docs)]
    TooManyElites {
        elite_count: usize,
        population_size: usize,
    },
    /// The spawned snake would not fit between the center and the left wall.
    #[error("initial snake length {length} does not fit on a grid of size {grid_size}")]
    #[allow(missing_docs)]
    InvalidInitialLength { length: usize, grid_size: u32 },
    /// `mutation_rate` is not a probability.
    #[error("mutation rate {0} outside [0, 1]")]
    InvalidMutationRate(f64),
    /// `hidden_nodes` is zero.
    #[error("hidden layer must have at least one node")]
    EmptyHiddenLayer,
    /// `ticks_per_second` is zero, negative or NaN.
    #[error("ticks per second must be positive, got {0}")]
    InvalidTickRate(f64),
    /// The params file could not be read.
    #[error("failed to read params: {0}")]
    Io(#[from] std::io::Error),
    /// The params file is not valid JSON for [`Params`](super::params::Params).
    #[error("failed to parse params: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while setting up a [`Population`](super::population::Population).
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Invalid parameters.
    #[error(transparent)]
    Params(#[from] ParamsError),
    /// The first generation could not be set up.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
