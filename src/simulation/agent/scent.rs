//! Scent sense - which way the food lies.

use ndarray::Array1;

use super::super::environment::SnakeGame;
use super::sense::Sense;

/// Signed direction from the head to the food on each axis: `-1`, `0` or `1`.
pub struct Scent;

impl Scent {
    /// Creates a new scent sense.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Scent {
    fn default() -> Self {
        Self::new()
    }
}

impl Sense for Scent {
    fn sense(&self, game: &SnakeGame) -> Array1<f64> {
        let head = game.head();
        let food = game.food();
        Array1::from_vec(vec![
            f64::from((food.x - head.x).signum()),
            f64::from((food.y - head.y).signum()),
        ])
    }

    fn input_size(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "Scent"
    }
}
