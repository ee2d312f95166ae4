//! Generation turnover: fitness, elitism, roulette selection and breeding.
//!
//! Turnover runs once every agent of a generation has died. Fitness is
//! recomputed from scratch (`food² × weight + lifetime`), normalized by the
//! best agent, and used to pick parents. The shaping rewards that agents
//! collected while playing are discarded here.

use log::warn;
use rand::Rng;

use super::agent::Agent;
use super::brain::Brain;
use super::error::SimulationError;
use super::params::Params;

/// Raw fitness figures of a finished generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessSummary {
    /// Highest raw fitness.
    pub max_raw: f64,
    /// Mean raw fitness.
    pub mean_raw: f64,
    /// Whether every agent scored zero, forcing uniform parent selection.
    pub degenerate: bool,
}

/// Roulette-wheel selection over normalized fitness.
///
/// `r` is a uniform draw from `[0, 1)`; it is scaled by the fitness total and
/// the wheel is walked until the running sum exceeds it. Rounding overshoot
/// lands on the last slot. `fitnesses` must be non-empty.
pub fn select_parent(fitnesses: &[f64], r: f64) -> usize {
    let total: f64 = fitnesses.iter().sum();
    let target = r * total;

    let mut cumulative = 0.0;
    for (i, fitness) in fitnesses.iter().enumerate() {
        cumulative += fitness;
        if cumulative > target {
            return i;
        }
    }
    fitnesses.len().saturating_sub(1)
}

/// Produces the next generation's brains from a finished generation.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    population_size: usize,
    elite_count: usize,
    mutation_rate: f64,
}

impl EvolutionEngine {
    /// Creates an engine from the simulation parameters.
    pub fn new(params: &Params) -> Self {
        Self {
            population_size: params.population_size,
            elite_count: params.elite_count.min(params.population_size),
            mutation_rate: params.mutation_rate,
        }
    }

    /// Overwrites each agent's `fitness` with its normalized genetic fitness.
    ///
    /// Everything is divided by the best raw fitness. If that is zero all
    /// fitnesses stay zero and the generation is reported as degenerate.
    pub fn assign_fitness(agents: &mut [Agent], params: &Params) -> FitnessSummary {
        let raw: Vec<f64> = agents.iter().map(|a| a.raw_fitness(params)).collect();
        let max_raw = raw.iter().copied().fold(0.0, f64::max);
        let mean_raw = if raw.is_empty() {
            0.0
        } else {
            raw.iter().sum::<f64>() / raw.len() as f64
        };
        let degenerate = max_raw <= 0.0;

        for (agent, value) in agents.iter_mut().zip(&raw) {
            agent.fitness = if degenerate { 0.0 } else { value / max_raw };
        }

        FitnessSummary {
            max_raw,
            mean_raw,
            degenerate,
        }
    }

    /// Breeds the next generation.
    ///
    /// Sorts `agents` by fitness (descending), copies the elites' brains
    /// unchanged, then fills the rest with mutated crossovers of roulette-picked
    /// parents. Expects [`EvolutionEngine::assign_fitness`] to have run.
    pub fn breed<R: Rng + ?Sized>(
        &self,
        agents: &mut [Agent],
        rng: &mut R,
    ) -> Result<Vec<Brain>, SimulationError> {
        agents.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let fitnesses: Vec<f64> = agents.iter().map(|a| a.fitness).collect();
        let total: f64 = fitnesses.iter().sum();
        if total <= 0.0 {
            warn!("all agents scored zero, selecting parents uniformly");
        }

        let mut next = Vec::with_capacity(self.population_size);
        next.extend(
            agents
                .iter()
                .take(self.elite_count)
                .map(|agent| agent.brain.clone()),
        );

        while next.len() < self.population_size {
            let parent_a = &agents[pick_parent(&fitnesses, total, rng)].brain;
            let parent_b = &agents[pick_parent(&fitnesses, total, rng)].brain;
            let mut child = Brain::crossover(parent_a, parent_b, rng)?;
            child.mutate(self.mutation_rate, rng);
            next.push(child);
        }

        Ok(next)
    }
}

fn pick_parent<R: Rng + ?Sized>(fitnesses: &[f64], total: f64, rng: &mut R) -> usize {
    if total > 0.0 {
        select_parent(fitnesses, rng.random::<f64>())
    } else {
        rng.random_range(0..fitnesses.len())
    }
}
