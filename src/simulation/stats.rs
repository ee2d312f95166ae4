use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Outcome of one finished generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Generation number that just finished.
    pub generation: u32,
    /// Most food eaten by a single agent.
    pub best_food: u32,
    /// Mean food eaten per agent.
    pub mean_food: f64,
    /// Highest raw genetic fitness.
    pub max_raw_fitness: f64,
    /// Mean raw genetic fitness.
    pub mean_raw_fitness: f64,
    /// Whether parents had to be picked uniformly.
    pub degenerate: bool,
}

/// Rolling record of the most recent generations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationHistory {
    /// Oldest first.
    pub summaries: VecDeque<GenerationSummary>,
    /// Maximum number of generations to keep
    pub max_history: usize,
}

impl Default for GenerationHistory {
    fn default() -> Self {
        Self {
            summaries: VecDeque::new(),
            max_history: 100, // Track the last 100 generations
        }
    }
}

impl GenerationHistory {
    /// Appends a summary, dropping the oldest one past `max_history`.
    pub fn record(&mut self, summary: GenerationSummary) {
        self.summaries.push_back(summary);
        if self.summaries.len() > self.max_history {
            self.summaries.pop_front();
        }
    }

    /// Most recent summary.
    pub fn latest(&self) -> Option<&GenerationSummary> {
        self.summaries.back()
    }

    /// Average of `best_food` over the tracked generations.
    pub fn avg_best_food(&self) -> f64 {
        if self.summaries.is_empty() {
            0.0
        } else {
            self.summaries.iter().map(|s| f64::from(s.best_food)).sum::<f64>()
                / self.summaries.len() as f64
        }
    }

    /// Number of tracked generations.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Whether no generation has finished yet.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}
