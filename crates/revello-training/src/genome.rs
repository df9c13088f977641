//! Genome operators for the genetic algorithm.
//!
//! Free functions over [`Genome`] implementing initialization, BLX-alpha
//! crossover, mutation, and normalization. All randomness comes from a
//! caller-supplied generator, so runs seeded identically are reproducible
//! and tests can pin exact behavior.
//!
//! # BLX-alpha, asymmetric form
//!
//! [`blx_pair`] deliberately does not use the per-dimension parent
//! interval: the upper end is the scalar maximum over the **first**
//! parent's genes and the lower end the scalar minimum over the
//! **second**'s, expanded by `alpha` times their distance. Both offspring
//! sample every gene uniformly from that one shared interval. Normalized
//! parents always have genes on both sides of zero, so the interval is
//! never empty.
//!
//! # Mutation
//!
//! One uniform draw decides the event for the whole genome: with
//! probability `prob/3` each, either a Gaussian perturbation of one gene,
//! a sign flip of one gene, or a swap of two genes; otherwise the genome
//! is left untouched. At most one event happens per call.

use rand::Rng;
use rand_distr::Normal;
use revello_evaluator::{GENOME_LEN, Genome};

/// Standard deviation of freshly seeded genes.
pub const INITIAL_SIGMA: f64 = 10.0;
/// Standard deviation of the additive mutation perturbation.
pub const MUTATION_SIGMA: f64 = 20.0;
/// Largest absolute gene value after normalization.
pub const NORMALIZED_MAX: f64 = 100.0;

/// Draws a genome with independent `Normal(0, 10)` genes.
pub fn random<R>(rng: &mut R) -> Genome
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, INITIAL_SIGMA).unwrap();
    Genome::from_fn(|_| rng.sample(normal))
}

/// BLX-alpha crossover producing two offspring from one parent pair.
pub fn blx_pair<R>(first: &Genome, second: &Genome, alpha: f64, rng: &mut R) -> [Genome; 2]
where
    R: Rng + ?Sized,
{
    let max_p = first
        .genes()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let min_p = second.genes().iter().copied().fold(f64::INFINITY, f64::min);
    let diff = max_p - min_p;
    let upper = max_p + alpha * diff;
    let lower = min_p - alpha * diff;
    // The asymmetric definition can yield `lower > upper`; the reference
    // samples the interval regardless of endpoint order, whereas
    // `random_range` requires a non-empty ascending range. Order the
    // endpoints so sampling matches the reference instead of panicking.
    let (lo, hi) = (lower.min(upper), lower.max(upper));
    [(); 2].map(|()| Genome::from_fn(|_| rng.random_range(lo..=hi)))
}

/// Applies at most one mutation event to `genome` with total probability
/// `prob`.
pub fn mutate<R>(genome: &mut Genome, prob: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let roll: f64 = rng.random();
    let genes = genome.genes_mut();
    if roll < prob / 3.0 {
        let normal = Normal::new(0.0, MUTATION_SIGMA).unwrap();
        let target = rng.random_range(0..GENOME_LEN);
        genes[target] += rng.sample(normal);
    } else if roll < prob * 2.0 / 3.0 {
        let target = rng.random_range(0..GENOME_LEN);
        genes[target] = -genes[target];
    } else if roll < prob {
        let first = rng.random_range(0..GENOME_LEN);
        let second = rng.random_range(0..GENOME_LEN);
        genes.swap(first, second);
    }
}

/// Zero-centers the genes and scales the largest magnitude to exactly 100.
///
/// A genome with zero spread (all genes equal) is only centered; scaling
/// would divide by zero.
#[expect(clippy::cast_precision_loss)]
pub fn normalize(genome: &mut Genome) {
    let genes = genome.genes_mut();
    let mean = genes.iter().sum::<f64>() / GENOME_LEN as f64;
    for gene in genes.iter_mut() {
        *gene -= mean;
    }
    let max_abs = genes.iter().fold(0.0_f64, |acc, gene| acc.max(gene.abs()));
    if max_abs > 0.0 {
        for gene in genes.iter_mut() {
            *gene *= NORMALIZED_MAX / max_abs;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_genomes_differ() {
        let mut rng = Pcg32::seed_from_u64(11);
        let first = random(&mut rng);
        let second = random(&mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn test_blx_offspring_stay_in_expanded_interval() {
        let mut rng = Pcg32::seed_from_u64(23);
        let first = Genome::new([60.0, -40.0, 10.0, 0.0, -5.0, 5.0, 20.0, -100.0, 100.0, -50.0]);
        let second = Genome::new([-80.0, 30.0, 100.0, -20.0, 40.0, -60.0, 15.0, 0.0, -35.0, 10.0]);
        let alpha = 0.5;

        // max over first parent, min over second parent, shared per gene.
        let upper = 100.0 + alpha * 180.0;
        let lower = -80.0 - alpha * 180.0;
        for _ in 0..50 {
            for child in blx_pair(&first, &second, alpha, &mut rng) {
                for &gene in child.genes() {
                    assert!((lower..=upper).contains(&gene));
                }
            }
        }
    }

    #[test]
    fn test_blx_zero_alpha_uses_parent_extremes() {
        let mut rng = Pcg32::seed_from_u64(31);
        let first = Genome::new([50.0, -10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let second = Genome::new([-25.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        for child in blx_pair(&first, &second, 0.0, &mut rng) {
            for &gene in child.genes() {
                assert!((-25.0..=50.0).contains(&gene));
            }
        }
    }

    #[test]
    fn test_mutation_never_fires_at_zero_probability() {
        let mut rng = Pcg32::seed_from_u64(47);
        let original = Genome::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        for _ in 0..100 {
            let mut genome = original;
            mutate(&mut genome, 0.0, &mut rng);
            assert_eq!(genome, original);
        }
    }

    #[test]
    fn test_mutation_touches_at_most_two_genes() {
        let mut rng = Pcg32::seed_from_u64(59);
        let original = Genome::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        for _ in 0..200 {
            let mut genome = original;
            mutate(&mut genome, 1.0, &mut rng);
            let changed = genome
                .genes()
                .iter()
                .zip(original.genes())
                .filter(|(a, b)| a != b)
                .count();
            assert!(changed <= 2, "one event may change at most two genes");
        }
    }

    #[test]
    fn test_normalize_centers_and_scales() {
        let mut genome = Genome::new([5.0, -3.0, 12.0, 0.0, 7.5, -8.0, 2.0, 1.0, -1.0, 4.0]);
        normalize(&mut genome);

        let mean: f64 = genome.genes().iter().sum::<f64>() / 10.0;
        let max_abs = genome.genes().iter().fold(0.0_f64, |a, g| a.max(g.abs()));
        assert!(mean.abs() < 1e-9);
        assert!((max_abs - NORMALIZED_MAX).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut genome = Genome::new([5.0, -3.0, 12.0, 0.0, 7.5, -8.0, 2.0, 1.0, -1.0, 4.0]);
        normalize(&mut genome);
        let once = genome;
        normalize(&mut genome);
        for (a, b) in genome.genes().iter().zip(once.genes()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_normalize_handles_zero_spread() {
        let mut genome = Genome::new([5.0; 10]);
        normalize(&mut genome);
        assert_eq!(genome, Genome::new([0.0; 10]));
    }
}
