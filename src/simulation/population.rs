//! The evolution controller.
//!
//! A [`Population`] owns every agent of the current generation and plays
//! them one at a time. An external driver calls [`Population::advance`]
//! once per tick:
//! - the current agent senses, decides and moves
//! - when it dies, the next agent takes over
//! - when the last agent dies, the generation is turned over
//!
//! [`Population::evaluate_generation_parallel`] plays all remaining lives of
//! a generation at once on the rayon pool and turns over after every worker
//! has finished.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::agent::{Agent, Perception};
use super::brain::Brain;
use super::error::{InitError, SimulationError};
use super::evolution::EvolutionEngine;
use super::grid::Direction;
use super::params::Params;
use super::snapshot::{BestScore, Snapshot};
use super::stats::{GenerationHistory, GenerationSummary};

/// Result of one controller tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// The current agent moved and is still alive.
    Stepped {
        /// Whether it ate food this tick.
        ate_food: bool,
    },
    /// The current agent died and the next one is now active.
    AgentDied {
        /// Index of the agent that died.
        agent: usize,
        /// Food it ate during its life.
        food_eaten: u32,
        /// Ticks it survived.
        lifetime: u32,
    },
    /// The last agent died and a new generation was bred.
    GenerationComplete(GenerationSummary),
}

/// Fixed-size population of agents and the genetic algorithm driving it.
pub struct Population {
    params: Params,
    agents: Vec<Agent>,
    current: usize,
    generation: u32,
    generation_score: u32,
    best_ever: BestScore,
    perception: Perception,
    engine: EvolutionEngine,
    history: GenerationHistory,
    rng: StdRng,
    /// Fractional ticks carried over between elapsed-time advances.
    pending_ticks: f64,
}

impl Population {
    /// Creates generation 1 with random brains and the default senses.
    pub fn new(params: Params) -> Result<Self, InitError> {
        Self::with_perception(params, Perception::default())
    }

    /// Creates generation 1 with random brains sized for `perception`.
    pub fn with_perception(params: Params, perception: Perception) -> Result<Self, InitError> {
        params.validate()?;

        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let input_nodes = perception.total_input_size();
        let mut agents = Vec::with_capacity(params.population_size);
        for _ in 0..params.population_size {
            let brain = Brain::new(
                input_nodes,
                params.hidden_nodes,
                Direction::ALL.len(),
                &mut rng,
            )?;
            agents.push(Agent::new(brain, &params, &mut rng)?);
        }

        info!(
            "population of {} on a {}x{} grid, {} sensor inputs",
            params.population_size, params.grid_size, params.grid_size, input_nodes
        );

        Ok(Self {
            engine: EvolutionEngine::new(&params),
            params,
            agents,
            current: 0,
            generation: 1,
            generation_score: 0,
            best_ever: BestScore::default(),
            perception,
            history: GenerationHistory::default(),
            rng,
            pending_ticks: 0.0,
        })
    }

    /// Advances the simulation by one tick.
    pub fn advance(&mut self) -> Result<Tick, SimulationError> {
        let agent = &mut self.agents[self.current];
        if agent.is_alive() {
            let outcome = agent.tick(&self.perception, &self.params, &mut self.rng)?;
            self.generation_score = agent.food_eaten;
            if outcome.alive {
                return Ok(Tick::Stepped {
                    ate_food: outcome.ate_food,
                });
            }
        }
        self.finish_current_agent()
    }

    /// Advances by however many ticks fit into `elapsed` seconds at
    /// `params.ticks_per_second`. Leftover fractions carry over to the next call.
    ///
    /// Negative and non-finite durations advance nothing.
    pub fn advance_elapsed(&mut self, elapsed: f64) -> Result<Vec<Tick>, SimulationError> {
        if !elapsed.is_finite() {
            warn!("ignoring non-finite elapsed time {}", elapsed);
            return Ok(Vec::new());
        }
        self.pending_ticks += elapsed.max(0.0) * self.params.ticks_per_second;
        let whole = self.pending_ticks.floor();
        self.pending_ticks -= whole;
        (0..whole as usize).map(|_| self.advance()).collect()
    }

    /// Ticks until the current generation turns over.
    pub fn run_generation(&mut self) -> Result<GenerationSummary, SimulationError> {
        loop {
            if let Tick::GenerationComplete(summary) = self.advance()? {
                return Ok(summary);
            }
        }
    }

    /// Plays every remaining life of the generation in parallel, then turns over.
    ///
    /// Each agent gets its own random source seeded from the shared one, so a
    /// seeded population stays reproducible regardless of thread scheduling.
    pub fn evaluate_generation_parallel(&mut self) -> Result<GenerationSummary, SimulationError> {
        let remaining = self.agents.len() - self.current;
        let seeds: Vec<u64> = (0..remaining).map(|_| self.rng.random()).collect();

        let perception = &self.perception;
        let params = &self.params;
        self.agents[self.current..]
            .par_iter_mut()
            .zip(seeds)
            .try_for_each(|(agent, seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                agent.live_out(perception, params, &mut rng)
            })?;

        for (index, agent) in self.agents.iter().enumerate().skip(self.current) {
            debug!(
                "agent {} died: food {}, lifetime {}",
                index, agent.food_eaten, agent.lifetime
            );
        }
        self.current = self.agents.len() - 1;
        self.generation_score = 0;
        self.turnover()
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> Snapshot {
        let agent = self.current_agent();
        Snapshot {
            population_size: self.agents.len(),
            current_index: self.current,
            generation: self.generation,
            body: agent.game.body().iter().copied().collect(),
            food: agent.game.food(),
            generation_score: self.generation_score,
            best_ever: self.best_ever,
        }
    }

    /// The agent being played.
    pub fn current_agent(&self) -> &Agent {
        &self.agents[self.current]
    }

    /// All agents of the current generation, in slot order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Index of the agent being played.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Current generation, starting at 1.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Best single-life score so far.
    pub fn best_ever(&self) -> BestScore {
        self.best_ever
    }

    /// Summaries of recent generations.
    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    /// The parameters this population runs with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The senses feeding every brain.
    pub fn perception(&self) -> &Perception {
        &self.perception
    }

    fn finish_current_agent(&mut self) -> Result<Tick, SimulationError> {
        let index = self.current;
        let agent = &self.agents[index];
        let (food_eaten, lifetime) = (agent.food_eaten, agent.lifetime);
        debug!(
            "agent {} died: food {}, lifetime {}",
            index, food_eaten, lifetime
        );

        self.generation_score = 0;

        // The last agent stays current until turnover succeeds, so a failed
        // turnover is retried on the next tick.
        if index + 1 >= self.agents.len() {
            return self.turnover().map(Tick::GenerationComplete);
        }
        self.current += 1;

        Ok(Tick::AgentDied {
            agent: index,
            food_eaten,
            lifetime,
        })
    }

    /// Replaces the whole population with the next generation.
    fn turnover(&mut self) -> Result<GenerationSummary, SimulationError> {
        let fitness = EvolutionEngine::assign_fitness(&mut self.agents, &self.params);

        let best_food = self.agents.iter().map(|a| a.food_eaten).max().unwrap_or(0);
        let mean_food = self
            .agents
            .iter()
            .map(|a| f64::from(a.food_eaten))
            .sum::<f64>()
            / self.agents.len() as f64;

        let summary = GenerationSummary {
            generation: self.generation,
            best_food,
            mean_food,
            max_raw_fitness: fitness.max_raw,
            mean_raw_fitness: fitness.mean_raw,
            degenerate: fitness.degenerate,
        };

        let brains = self.engine.breed(&mut self.agents, &mut self.rng)?;
        let next = brains
            .into_iter()
            .map(|brain| Agent::new(brain, &self.params, &mut self.rng))
            .collect::<Result<Vec<_>, _>>()?;

        self.agents = next;
        self.current = 0;
        if best_food > self.best_ever.score {
            self.best_ever = BestScore {
                score: best_food,
                generation: self.generation,
            };
        }
        self.generation += 1;
        self.generation_score = 0;

        info!(
            "generation {} done: best food {}, mean food {:.2}, max fitness {:.0}",
            summary.generation, summary.best_food, summary.mean_food, summary.max_raw_fitness
        );
        self.history.record(summary.clone());

        Ok(summary)
    }
}
