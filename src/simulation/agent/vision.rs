//! Vision sense - immediate danger around the head.
//!
//! Looks one cell ahead, to the right and to the left of the current heading
//! and reports `1.0` when stepping there would be fatal. Uses the same wall
//! and body test as the game itself, so a flag is set exactly when the move
//! would kill the snake.
//!
//! Right and left are taken as seen on screen, with `y` growing downward:
//! right is a clockwise quarter turn, so a snake heading up has its right
//! flag on the cell with the larger `x`.

use ndarray::Array1;

use super::super::environment::SnakeGame;
use super::sense::Sense;

/// Danger flags relative to the current heading: ahead, right, left.
pub struct Vision;

impl Vision {
    /// Creates a new vision sense.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Vision {
    fn default() -> Self {
        Self::new()
    }
}

impl Sense for Vision {
    fn sense(&self, game: &SnakeGame) -> Array1<f64> {
        let heading = game.direction();
        [heading, heading.turn_right(), heading.turn_left()]
            .into_iter()
            .map(|dir| if game.danger(dir) { 1.0 } else { 0.0 })
            .collect()
    }

    fn input_size(&self) -> usize {
        3
    }

    fn name(&self) -> &'static str {
        "Vision"
    }
}
