//! Proprioception sense - where the head is and which way it points.

use ndarray::Array1;

use super::super::environment::SnakeGame;
use super::sense::Sense;

/// Body awareness.
///
/// Outputs:
/// - Head distance to the left, top, right and bottom edges, divided by the grid size
/// - Current heading as a unit vector `(dx, dy)`
pub struct Proprioception;

impl Proprioception {
    /// Creates a new proprioception sense.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Proprioception {
    fn default() -> Self {
        Self::new()
    }
}

impl Sense for Proprioception {
    fn sense(&self, game: &SnakeGame) -> Array1<f64> {
        let head = game.head();
        let size = f64::from(game.grid_size());
        let last = game.grid_size() - 1;
        let (dx, dy) = game.direction().vector();

        Array1::from_vec(vec![
            f64::from(head.x) / size,
            f64::from(head.y) / size,
            f64::from(last - head.x) / size,
            f64::from(last - head.y) / size,
            f64::from(dx),
            f64::from(dy),
        ])
    }

    fn input_size(&self) -> usize {
        6
    }

    fn name(&self) -> &'static str {
        "Proprioception"
    }
}
