//! Agent module containing the snake controller and its perception system.

mod agent;
mod perception;
mod proprioception;
mod scent;
mod sense;
mod vision;

pub use agent::*;

pub use perception::Perception;
pub use proprioception::Proprioception;
pub use scent::Scent;
pub use sense::Sense;
pub use vision::Vision;
