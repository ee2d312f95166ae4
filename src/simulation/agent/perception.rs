//! Perception system that combines multiple senses into brain inputs.

use super::super::environment::SnakeGame;
use super::proprioception::Proprioception;
use super::scent::Scent;
use super::sense::Sense;
use super::vision::Vision;

/// Ordered set of senses whose outputs are concatenated into one input vector.
///
/// The perception system:
/// 1. Queries each sense for its outputs
/// 2. Concatenates the outputs in sense order
/// 3. Hands the result to the brain as its input vector
pub struct Perception {
    /// Senses in query order
    senses: Vec<Box<dyn Sense>>,
}

impl Perception {
    /// Creates a perception system that queries `senses` in the given order.
    ///
    /// # Arguments
    ///
    /// * `senses` - Boxed sense implementations, in input order
    pub fn new(senses: Vec<Box<dyn Sense>>) -> Self {
        Self { senses }
    }

    /// Runs every sense and concatenates the outputs.
    ///
    /// # Arguments
    ///
    /// * `game` - The game the current agent is playing
    ///
    /// # Returns
    ///
    /// A vector of [`Perception::total_input_size`] activations, one slice
    /// per sense.
    pub fn perceive(&self, game: &SnakeGame) -> Vec<f64> {
        let mut inputs = Vec::with_capacity(self.total_input_size());
        for sense in &self.senses {
            let outputs = sense.sense(game);
            debug_assert_eq!(outputs.len(), sense.input_size(), "{}", sense.name());
            inputs.extend(outputs.iter().copied());
        }
        inputs
    }

    /// Returns the total number of brain inputs produced by all senses.
    ///
    /// # Returns
    ///
    /// The sum of the senses' input sizes, which is the brain's input layer width.
    pub fn total_input_size(&self) -> usize {
        self.senses.iter().map(|s| s.input_size()).sum()
    }

    /// The senses, in query order.
    pub fn senses(&self) -> &[Box<dyn Sense>] {
        &self.senses
    }
}

impl Default for Perception {
    fn default() -> Self {
        Self::new(vec![
            Box::new(Proprioception::new()),
            Box::new(Scent::new()),
            Box::new(Vision::new()),
        ])
    }
}
