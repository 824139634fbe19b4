//! Genetic operators over catalog-index genomes.

use hn_core::Real;
use rand::Rng;

use crate::config::CrossoverKind;

/// One catalog index per pipe, in pipe arena order.
pub type Genome = Vec<usize>;

pub fn random_genome<R: Rng + ?Sized>(rng: &mut R, genes: usize, alleles: usize) -> Genome {
    (0..genes).map(|_| rng.gen_range(0..alleles)).collect()
}

/// Index of the fittest (lowest) of `size` individuals drawn with replacement.
pub fn tournament<R: Rng + ?Sized>(rng: &mut R, fitness: &[Real], size: usize) -> usize {
    let mut best = rng.gen_range(0..fitness.len());
    for _ in 1..size {
        let challenger = rng.gen_range(0..fitness.len());
        if fitness[challenger] < fitness[best] {
            best = challenger;
        }
    }
    best
}

pub fn crossover<R: Rng + ?Sized>(
    rng: &mut R,
    a: &[usize],
    b: &[usize],
    kind: CrossoverKind,
) -> (Genome, Genome) {
    let mut x = a.to_vec();
    let mut y = b.to_vec();
    match kind {
        CrossoverKind::SinglePoint => {
            if a.len() >= 2 {
                let point = rng.gen_range(1..a.len());
                x[point..].copy_from_slice(&b[point..]);
                y[point..].copy_from_slice(&a[point..]);
            }
        }
        CrossoverKind::Uniform => {
            for i in 0..a.len() {
                if rng.gen_bool(0.5) {
                    std::mem::swap(&mut x[i], &mut y[i]);
                }
            }
        }
    }
    (x, y)
}

/// Reassign each gene to a random allele with probability `rate`.
pub fn mutate<R: Rng + ?Sized>(rng: &mut R, genome: &mut [usize], rate: Real, alleles: usize) {
    for gene in genome.iter_mut() {
        if rng.gen_bool(rate) {
            *gene = rng.gen_range(0..alleles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn tournament_of_whole_population_tends_to_the_best() {
        let mut rng = StdRng::seed_from_u64(7);
        let fitness = [5.0, 1.0, 3.0];
        let wins = (0..200)
            .filter(|_| tournament(&mut rng, &fitness, 8) == 1)
            .count();
        assert!(wins > 150);
    }

    #[test]
    fn same_seed_same_genomes() {
        let a = random_genome(&mut StdRng::seed_from_u64(3), 20, 11);
        let b = random_genome(&mut StdRng::seed_from_u64(3), 20, 11);
        assert_eq!(a, b);
        assert!(a.iter().all(|&g| g < 11));
    }

    #[test]
    fn mutation_rate_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut g = vec![0; 50];
        mutate(&mut rng, &mut g, 0.0, 5);
        assert!(g.iter().all(|&x| x == 0));
        mutate(&mut rng, &mut g, 1.0, 5);
        assert!(g.iter().all(|&x| x < 5));
    }
}
