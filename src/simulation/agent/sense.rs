//! Abstract sense trait for agent perception.
//!
//! Senses read the game state and convert it into neural network inputs for
//! the agent's brain.

use ndarray::Array1;

use super::super::environment::SnakeGame;

/// A sensory modality feeding part of the brain's input vector.
///
/// Each sense reads the game state and returns a vector of activations that
/// becomes one slice of the agent's brain inputs.
pub trait Sense: Send + Sync {
    /// Reads the game and returns this sense's activations.
    ///
    /// # Arguments
    ///
    /// * `game` - The life being played, seen from the snake's head
    ///
    /// # Returns
    ///
    /// A 1D array with exactly [`Sense::input_size`] activations.
    fn sense(&self, game: &SnakeGame) -> Array1<f64>;

    /// Returns the number of neural network inputs this sense produces.
    ///
    /// # Returns
    ///
    /// The size of the output array from `sense()`.
    fn input_size(&self) -> usize;

    /// Returns a human-readable name for this sense.
    fn name(&self) -> &str;
}
