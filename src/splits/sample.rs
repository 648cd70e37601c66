use rand::{rngs::StdRng, seq::index, SeedableRng};

use crate::error::Result;

use super::Partition;

/// Share of the corpus sampled for training
pub const TRAIN_FRACTION: f64 = 0.70;

/// Share of the post-train remainder sampled for testing
pub const TEST_FRACTION: f64 = 0.66;

/// Sample `round(0.70 * N)` items for train, then `round(0.66 * rest)` of the remainder for test
///
/// Sampled subsets keep the order they were drawn in; dev keeps input order.
pub fn split<T>(items: Vec<T>, train_seed: u64, test_seed: u64) -> Result<Partition<T>> {
    let total = items.len();

    let n_train = (TRAIN_FRACTION * total as f64).round() as usize;
    let (train, rest) = draw(items, n_train, train_seed);

    let n_test = (TEST_FRACTION * rest.len() as f64).round() as usize;
    let (test, dev) = draw(rest, n_test, test_seed);

    Partition::checked(train, dev, test, total)
}

/// Draw `amount` items without replacement. Returns the drawn items and the rest in input order.
fn draw<T>(items: Vec<T>, amount: usize, seed: u64) -> (Vec<T>, Vec<T>) {
    let amount = amount.min(items.len());
    let mut rng = StdRng::seed_from_u64(seed);

    let mut positions = vec![None; items.len()];
    for (position, i) in index::sample(&mut rng, items.len(), amount)
        .into_iter()
        .enumerate()
    {
        positions[i] = Some(position);
    }

    let mut drawn: Vec<Option<T>> = (0..amount).map(|_| None).collect();
    let mut rest = Vec::with_capacity(items.len() - amount);

    for (item, position) in items.into_iter().zip(positions) {
        match position {
            Some(position) => drawn[position] = Some(item),
            None => rest.push(item),
        }
    }

    (drawn.into_iter().flatten().collect(), rest)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sizes_follow_the_fractions() {
        let split = split((0..1000).collect::<Vec<_>>(), 42, 1337).unwrap();

        assert_eq!(split.train.len(), 700);
        assert_eq!(split.test.len(), 198);
        assert_eq!(split.dev.len(), 102);
    }

    #[test]
    fn small_corpora_round() {
        let split = split((0..7).collect::<Vec<_>>(), 1, 2).unwrap();

        // 4.9 -> 5 train, 1.32 -> 1 test
        assert_eq!(
            (split.train.len(), split.dev.len(), split.test.len()),
            (5, 1, 1)
        );
    }

    #[test]
    fn is_reproducible() {
        let a = split((0..300).collect::<Vec<_>>(), 7, 8).unwrap();
        let b = split((0..300).collect::<Vec<_>>(), 7, 8).unwrap();
        let c = split((0..300).collect::<Vec<_>>(), 9, 8).unwrap();

        assert_eq!(a, b);
        assert_ne!(a.train, c.train);
    }

    #[test]
    fn dev_keeps_input_order() {
        let split = split((0..500).collect::<Vec<_>>(), 3, 4).unwrap();

        assert!(split.dev.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn draws_disjoint_subsets() {
        let (drawn, rest) = draw((0..20).collect::<Vec<_>>(), 6, 11);

        assert_eq!(drawn.len(), 6);
        assert_eq!(rest.len(), 14);
        assert!(drawn.iter().all(|d| !rest.contains(d)));
    }

    #[test]
    fn handles_empty_input() {
        let split = split(Vec::<u8>::new(), 42, 1337).unwrap();

        assert!(split.is_empty());
    }
}
