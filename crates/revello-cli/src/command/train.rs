use std::{path::PathBuf, time::Instant};

use chrono::Utc;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use revello_engine::Outcome;
use revello_evaluator::DEFAULT_SEARCH_DEPTH;
use revello_training::genetic::{EvolutionParams, Trainer};

use crate::{model::TrainedModel, store::JsonGenerationStore};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Archive file holding one record per generation
    #[arg(long, default_value = "generations.json")]
    data: PathBuf,
    /// Last generation to run
    #[arg(long, default_value_t = 10)]
    max_generation: u32,
    /// Number of genomes seeded into generation 0
    #[arg(long, default_value_t = 8)]
    population: usize,
    /// Number of genomes surviving each selection
    #[arg(long, default_value_t = 2)]
    parents: usize,
    /// Interval expansion factor of the BLX crossover
    #[arg(long, default_value_t = 0.5)]
    blx_alpha: f64,
    /// Probability of one mutation event per individual
    #[arg(long, default_value_t = 0.1)]
    mutation_prob: f64,
    /// Minimax search depth in plies
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u32,
    /// Seed for the run's random stream; OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Export the best surviving genome as a model file
    #[arg(long)]
    model_out: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let params = EvolutionParams {
        max_generation: arg.max_generation,
        num_population: arg.population,
        num_parents: arg.parents,
        blx_alpha: arg.blx_alpha,
        mutation_prob: arg.mutation_prob,
        search_depth: arg.depth,
    };
    let rng = match arg.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_os_rng(),
    };
    let store = JsonGenerationStore::new(arg.data.clone());
    let mut trainer = Trainer::new(params, store, rng)?;

    let started = Instant::now();
    if trainer.start()? {
        eprintln!(
            "Resuming from {} at generation {}",
            arg.data.display(),
            trainer.generation()
        );
    } else {
        eprintln!("----- Generation   0 -----");
        eprintln!(
            "  Seeded {} genomes, {} selected",
            arg.population,
            trainer.parents().len()
        );
    }

    while !trainer.is_finished() {
        eprintln!("----- Generation {:3} -----", trainer.generation());
        let generation_start = Instant::now();
        let summary = trainer.step()?;
        let verdict = match summary.benchmark {
            Outcome::DarkWin => "WIN",
            Outcome::LightWin => "LOSE",
            Outcome::Draw => "DRAW",
        };
        eprintln!("  Benchmark vs random: {verdict}");
        eprintln!(
            "  Population: {} genomes, {} selected",
            summary.population_size,
            trainer.parents().len()
        );
        eprintln!(
            "  Elapsed: {:.1} seconds",
            generation_start.elapsed().as_secs_f64()
        );
    }

    eprintln!(
        "Training completed after generation {} ({:.1} seconds total)",
        arg.max_generation,
        started.elapsed().as_secs_f64()
    );

    if let Some(path) = &arg.model_out {
        let best = trainer
            .best()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no surviving genome to export"))?;
        let model = TrainedModel {
            name: format!("generation-{}", arg.max_generation),
            trained_at: Utc::now(),
            generations: arg.max_generation,
            genome: best,
        };
        model.save(path)?;
        eprintln!("Model saved to {}", path.display());
    }

    Ok(())
}
