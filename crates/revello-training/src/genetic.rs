//! Generational evolution driven by knockout matches.
//!
//! [`Trainer`] owns the population and walks it through the per-generation
//! pipeline. Each stage consumes and returns owned values, so the stages
//! compose and test independently:
//!
//! ```text
//! parents ──crossover──▶ population ──mutate──▶ ──normalize──▶ ──select──▶ parents'
//! ```
//!
//! Selection is a pairwise single-elimination bracket over the population
//! in insertion order: dequeue two, play one full game between their
//! matrices, requeue the winner, until the configured number of parents
//! remains. A drawn game survives the second contender; that tie-break is
//! deliberate and pinned by tests, because it decides who reproduces.
//! [`knockout`] takes the duel as a closure so the bracket logic can be
//! tested without playing Reversi.
//!
//! The trainer persists `{population, selected}` under the generation
//! index before advancing; a failed save therefore leaves the generation
//! counter untouched. Restarting with a non-empty store resumes after the
//! highest persisted generation instead of reseeding.

use std::collections::VecDeque;

use rand::Rng;
use revello_engine::Outcome;
use revello_evaluator::{Genome, WeightMatrix, play_match};

use crate::{
    genome,
    store::{GenerationRecord, GenerationStore, StoreError},
};

/// Configuration surface of the evolutionary loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionParams {
    /// Last generation to run; 0 stops after seeding.
    pub max_generation: u32,
    /// Number of genomes seeded into generation 0.
    pub num_population: usize,
    /// Number of genomes surviving each selection.
    pub num_parents: usize,
    /// Interval expansion factor of the BLX crossover.
    pub blx_alpha: f64,
    /// Total probability of one mutation event per individual.
    pub mutation_prob: f64,
    /// Minimax depth used for every match, in plies.
    pub search_depth: u32,
}

impl EvolutionParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.num_parents < 2 {
            return Err(ParamError::TooFewParents {
                num_parents: self.num_parents,
            });
        }
        if self.num_population <= self.num_parents {
            return Err(ParamError::PopulationTooSmall {
                num_population: self.num_population,
                num_parents: self.num_parents,
            });
        }
        if !self.blx_alpha.is_finite() || self.blx_alpha < 0.0 {
            return Err(ParamError::InvalidAlpha {
                alpha: self.blx_alpha,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_prob) {
            return Err(ParamError::InvalidMutationProb {
                prob: self.mutation_prob,
            });
        }
        if self.search_depth == 0 {
            return Err(ParamError::ZeroSearchDepth);
        }
        Ok(())
    }
}

/// A rejected configuration value.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParamError {
    #[display("at least 2 parents must survive selection, got {num_parents}")]
    TooFewParents { num_parents: usize },
    #[display("population must exceed the parent count, got {num_population} <= {num_parents}")]
    PopulationTooSmall {
        num_population: usize,
        num_parents: usize,
    },
    #[display("BLX alpha must be finite and non-negative, got {alpha}")]
    InvalidAlpha { alpha: f64 },
    #[display("mutation probability must lie in 0..=1, got {prob}")]
    InvalidMutationProb { prob: f64 },
    #[display("search depth must be at least 1")]
    ZeroSearchDepth,
}

/// Failure of the evolutionary loop.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainError {
    #[display("{_0}")]
    InvalidParams(ParamError),
    #[display("{_0}")]
    Store(StoreError),
}

/// What one generation step produced, for progress reporting.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSummary {
    pub generation: u32,
    /// Result of the top parent's diagnostic match against the fixed
    /// random benchmark strategy, from the parent's side.
    pub benchmark: Outcome,
    pub population_size: usize,
}

/// Elitist crossover: all parents survive verbatim, then every unordered
/// pair of distinct parents contributes two BLX offspring.
///
/// The output length is `p + p*(p-1)` for `p` parents, and its order is
/// what the selection bracket will pair up.
#[must_use]
pub fn crossover<R>(parents: &[Genome], alpha: f64, rng: &mut R) -> Vec<Genome>
where
    R: Rng + ?Sized,
{
    let mut population: Vec<Genome> = parents.to_vec();
    for (index, first) in parents.iter().enumerate() {
        for second in &parents[index + 1..] {
            population.extend(genome::blx_pair(first, second, alpha, rng));
        }
    }
    population
}

/// Pairwise single-elimination selection down to `num_parents` survivors.
///
/// The population is processed as a FIFO queue in its own order; each duel
/// sees the earlier-queued genome as the first (dark) contender. A draw
/// survives the second contender.
pub fn knockout<F>(population: Vec<Genome>, num_parents: usize, mut duel: F) -> Vec<Genome>
where
    F: FnMut(&Genome, &Genome) -> Outcome,
{
    let mut queue: VecDeque<Genome> = population.into();
    while queue.len() > num_parents {
        let (Some(first), Some(second)) = (queue.pop_front(), queue.pop_front()) else {
            break;
        };
        let survivor = match duel(&first, &second) {
            Outcome::DarkWin => first,
            Outcome::LightWin | Outcome::Draw => second,
        };
        queue.push_back(survivor);
    }
    queue.into()
}

/// Owns the evolutionary state and drives it one generation at a time.
///
/// The caller seeds or resumes with [`Trainer::start`], then repeats
/// [`Trainer::step`] until [`Trainer::is_finished`]. Progress output is
/// the caller's business; the trainer itself never prints.
#[derive(Debug)]
pub struct Trainer<S, R> {
    params: EvolutionParams,
    store: S,
    rng: R,
    generation: u32,
    population: Vec<Genome>,
    parents: Vec<Genome>,
    benchmark_weights: WeightMatrix,
}

impl<S, R> Trainer<S, R>
where
    S: GenerationStore,
    R: Rng,
{
    /// Validates `params` and builds an idle trainer.
    ///
    /// The benchmark opponent is drawn from `rng` once and stays fixed for
    /// the whole run.
    pub fn new(params: EvolutionParams, store: S, mut rng: R) -> Result<Self, TrainError> {
        params.validate()?;
        let benchmark_weights = WeightMatrix::from_genome(&genome::random(&mut rng));
        Ok(Self {
            params,
            store,
            rng,
            generation: 0,
            population: Vec::new(),
            parents: Vec::new(),
            benchmark_weights,
        })
    }

    /// Resumes from the store, or seeds generation 0 if it is empty.
    ///
    /// Returns `true` when an existing run was resumed. Seeding draws the
    /// initial population, normalizes it, runs one selection, and persists
    /// generation 0 before advancing.
    pub fn start(&mut self) -> Result<bool, TrainError> {
        let archive = self.store.load()?;
        if let Some((&latest, record)) = archive.last_key_value() {
            self.population = record.population.clone();
            self.parents = record.selected.clone();
            self.generation = latest + 1;
            return Ok(true);
        }

        let mut population: Vec<Genome> = (0..self.params.num_population)
            .map(|_| genome::random(&mut self.rng))
            .collect();
        for individual in &mut population {
            genome::normalize(individual);
        }
        let parents = self.select(population.clone());
        self.store.save(
            0,
            &GenerationRecord {
                population: population.clone(),
                selected: parents.clone(),
            },
        )?;
        self.population = population;
        self.parents = parents;
        self.generation = 1;
        Ok(false)
    }

    /// Runs one full generation and persists it.
    ///
    /// # Panics
    ///
    /// Panics when called before [`Trainer::start`] or after the trainer
    /// finished.
    pub fn step(&mut self) -> Result<GenerationSummary, TrainError> {
        assert!(!self.is_finished(), "trainer already ran its last generation");
        assert!(!self.parents.is_empty(), "start() must run before step()");

        let benchmark = self.benchmark_match();

        let mut population = crossover(&self.parents, self.params.blx_alpha, &mut self.rng);
        for individual in &mut population {
            genome::mutate(individual, self.params.mutation_prob, &mut self.rng);
        }
        for individual in &mut population {
            genome::normalize(individual);
        }
        let parents = self.select(population.clone());

        self.store.save(
            self.generation,
            &GenerationRecord {
                population: population.clone(),
                selected: parents.clone(),
            },
        )?;

        let summary = GenerationSummary {
            generation: self.generation,
            benchmark,
            population_size: population.len(),
        };
        self.population = population;
        self.parents = parents;
        self.generation += 1;
        Ok(summary)
    }

    fn select(&self, population: Vec<Genome>) -> Vec<Genome> {
        let depth = self.params.search_depth;
        knockout(population, self.params.num_parents, |first, second| {
            let dark = WeightMatrix::from_genome(first);
            let light = WeightMatrix::from_genome(second);
            play_match(&dark, &light, depth, &mut ())
        })
    }

    /// Plays the top parent against the fixed random benchmark strategy.
    /// Diagnostic only: the population is not touched.
    fn benchmark_match(&self) -> Outcome {
        let champion = WeightMatrix::from_genome(&self.parents[0]);
        play_match(
            &champion,
            &self.benchmark_weights,
            self.params.search_depth,
            &mut (),
        )
    }

    /// True once every generation up to `max_generation` is persisted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.generation > self.params.max_generation
    }

    /// Index of the generation the next [`Trainer::step`] will produce.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    #[must_use]
    pub fn parents(&self) -> &[Genome] {
        &self.parents
    }

    /// The top surviving parent, if any generation completed.
    #[must_use]
    pub fn best(&self) -> Option<&Genome> {
        self.parents.first()
    }

    #[must_use]
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
