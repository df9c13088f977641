use std::path::PathBuf;

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use revello_engine::{Board, Outcome, Player, Position};
use revello_evaluator::{DEFAULT_SEARCH_DEPTH, Genome, MatchObserver, WeightMatrix, play_match};
use revello_training::genome;

use crate::model::TrainedModel;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct WatchArg {
    /// Trained model playing dark; a random strategy when omitted
    #[arg(long)]
    dark: Option<PathBuf>,
    /// Trained model playing light; a random strategy when omitted
    #[arg(long)]
    light: Option<PathBuf>,
    /// Minimax search depth in plies
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u32,
    /// Seed for randomized strategies; OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
}

/// Prints every ply and the running position to stdout.
struct ConsoleObserver;

impl MatchObserver for ConsoleObserver {
    fn on_move(&mut self, board: &Board, mover: Player, position: Position, score: f64) {
        println!("{mover} plays {position}, score {score:.1}");
        println!("{board}");
    }

    fn on_pass(&mut self, _board: &Board, player: Player) {
        println!("{player} has no move and passes");
        println!();
    }

    fn on_finish(&mut self, board: &Board, outcome: Outcome) {
        println!(
            "Final count: dark {} / light {}",
            board.count(Player::Dark),
            board.count(Player::Light)
        );
        println!("Result: {outcome}");
    }
}

fn load_side<R>(model_path: Option<&PathBuf>, label: &str, rng: &mut R) -> anyhow::Result<(String, Genome)>
where
    R: Rng,
{
    match model_path {
        Some(path) => {
            let model = TrainedModel::open(path)?;
            Ok((model.name, model.genome))
        }
        None => {
            let mut random = genome::random(rng);
            genome::normalize(&mut random);
            Ok((format!("random-{label}"), random))
        }
    }
}

pub(crate) fn run(arg: &WatchArg) -> anyhow::Result<()> {
    let mut rng = match arg.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_os_rng(),
    };
    let (dark_name, dark_genome) = load_side(arg.dark.as_ref(), "dark", &mut rng)?;
    let (light_name, light_genome) = load_side(arg.light.as_ref(), "light", &mut rng)?;

    println!("{dark_name} (dark, ●) vs {light_name} (light, ○)");
    println!("{}", Board::INITIAL);

    let dark = WeightMatrix::from_genome(&dark_genome);
    let light = WeightMatrix::from_genome(&light_genome);
    let _outcome = play_match(&dark, &light, arg.depth, &mut ConsoleObserver);
    Ok(())
}
