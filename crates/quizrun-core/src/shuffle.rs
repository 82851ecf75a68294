//! Unbiased Fisher–Yates shuffling.

use rand::seq::SliceRandom;
use rand::Rng;

/// Return a uniformly random permutation of `items`.
pub fn shuffled<T, R: Rng + ?Sized>(items: Vec<T>, rng: &mut R) -> Vec<T> {
    let mut items = items;
    items.shuffle(rng);
    items
}
