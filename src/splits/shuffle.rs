use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::Result;

use super::Partition;

/// Train share per whole hundred items
pub const TRAIN_PERCENT: usize = 70;

/// Dev share per whole hundred items
pub const DEV_PERCENT: usize = 10;

/// Cut points `(train_cut, dev_cut)` for `total` items
///
/// Only whole hundreds count towards train and dev, so test takes whatever the truncation leaves.
pub fn cuts(total: usize) -> (usize, usize) {
    let hundreds = total / 100;
    let train_cut = hundreds * TRAIN_PERCENT;

    (train_cut, train_cut + hundreds * DEV_PERCENT)
}

/// Shuffle all items with `seed` and slice into `[0, train_cut)`, `[train_cut, dev_cut)` and
/// `[dev_cut, N)`
pub fn split<T>(mut items: Vec<T>, seed: u64) -> Result<Partition<T>> {
    let total = items.len();
    let mut rng = StdRng::seed_from_u64(seed);

    items.shuffle(&mut rng);

    let (train_cut, dev_cut) = cuts(total);
    let test = items.split_off(dev_cut);
    let dev = items.split_off(train_cut);

    Partition::checked(items, dev, test, total)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn slices_one_hundred_items() {
        let split = split((0..100).collect::<Vec<_>>(), 42).unwrap();

        assert_eq!(
            (split.train.len(), split.dev.len(), split.test.len()),
            (70, 10, 20)
        );
    }

    #[test]
    fn slices_reassemble_the_shuffled_list() {
        let mut shuffled: Vec<_> = (0..100).collect();
        shuffled.shuffle(&mut StdRng::seed_from_u64(42));

        let split = split((0..100).collect::<Vec<_>>(), 42).unwrap();
        let reassembled: Vec<_> = [split.train, split.dev, split.test].concat();

        assert_eq!(reassembled, shuffled);
    }

    #[test]
    fn test_absorbs_the_remainder() {
        assert_eq!(cuts(99), (0, 0));
        assert_eq!(cuts(250), (140, 160));

        let split = split((0..250).collect::<Vec<_>>(), 5).unwrap();
        assert_eq!(split.test.len(), 90);
        assert_eq!(split.len(), 250);
    }

    #[test]
    fn is_reproducible() {
        let a = split((0..400).collect::<Vec<_>>(), 13).unwrap();
        let b = split((0..400).collect::<Vec<_>>(), 13).unwrap();

        assert_eq!(a, b);
    }
}
