//! Seeded training/held-out partitioning

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of the two partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub train: Vec<usize>,
    pub holdout: Vec<usize>,
}

/// Shuffle `0..rows` with `seed` and cut off `ceil(rows * fraction)` rows
/// for the held-out partition.
pub fn train_test_split(rows: usize, holdout_fraction: f64, seed: u64) -> Partition {
    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let holdout_len = ((rows as f64) * holdout_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let train = indices.split_off(holdout_len.min(rows));
    Partition {
        train,
        holdout: indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_partition_sizes() {
        let p = train_test_split(100, 0.33, 42);
        assert_eq!(p.holdout.len(), 33);
        assert_eq!(p.train.len(), 67);

        let p = train_test_split(10, 0.33, 42);
        assert_eq!(p.holdout.len(), 4);
        assert_eq!(p.train.len(), 6);
    }

    #[test]
    fn test_partitions_cover_every_row_once() {
        let p = train_test_split(57, 0.33, 42);
        let all: HashSet<usize> = p.train.iter().chain(&p.holdout).copied().collect();
        assert_eq!(all.len(), 57);
        assert_eq!(p.train.len() + p.holdout.len(), 57);
    }

    #[test]
    fn test_split_is_deterministic_for_seed() {
        assert_eq!(train_test_split(200, 0.33, 42), train_test_split(200, 0.33, 42));
        assert_ne!(train_test_split(200, 0.33, 42), train_test_split(200, 0.33, 7));
    }

    #[test]
    fn test_degenerate_inputs() {
        let p = train_test_split(0, 0.33, 42);
        assert!(p.train.is_empty() && p.holdout.is_empty());

        let p = train_test_split(1, 0.33, 42);
        assert_eq!(p.holdout.len(), 1);
        assert!(p.train.is_empty());
    }
}
