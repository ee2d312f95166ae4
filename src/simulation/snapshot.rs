//! Read-only view of the simulation for renderers and drivers.

use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Best single-life score seen so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    /// Food eaten.
    pub score: u32,
    /// Generation it happened in.
    pub generation: u32,
}

/// Everything a display needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Agents per generation.
    pub population_size: usize,
    /// Index of the agent being played.
    pub current_index: usize,
    /// Current generation, starting at 1.
    pub generation: u32,
    /// Body of the active snake, head first.
    pub body: Vec<Cell>,
    /// Food cell of the active game.
    pub food: Cell,
    /// Food eaten by the active agent.
    pub generation_score: u32,
    /// High-water mark across all generations.
    pub best_ever: BestScore,
}
