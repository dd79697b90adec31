//! Enumeration of every configuration that uses all colors.

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::wires::{Color, Configuration, WireVec};

/// Every configuration of `num_wires` wires using each color at least once.
///
/// The order is the lexicographic order of `Color::ALL` positions and is the
/// same on every call.
pub fn configurations(num_wires: usize) -> impl Iterator<Item = Configuration> {
    std::iter::repeat(Color::ALL)
        .take(num_wires)
        .multi_cartesian_product()
        .filter(|colors| Color::ALL.iter().all(|c| colors.contains(c)))
        .map(|colors| Configuration::from_valid(colors.into_iter().collect::<WireVec<Color>>()))
}

/// All configurations, shuffled with a seeded RNG when `seed` is given
pub fn generate(num_wires: usize, seed: Option<u64>) -> Vec<Configuration> {
    let mut games: Vec<Configuration> = configurations(num_wires).collect();
    if let Some(seed) = seed {
        games.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    }
    games
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::wires::NUM_WIRES;

    #[test]
    fn test_counts() {
        // Surjections from n positions onto 4 colors
        assert_eq!(configurations(4).count(), 24);
        assert_eq!(configurations(5).count(), 240);
        assert_eq!(configurations(NUM_WIRES).count(), 40824);
        assert_eq!(configurations(3).count(), 0);
    }

    #[test]
    fn test_each_configuration_once() {
        let games = generate(5, None);
        let unique: HashSet<_> = games.iter().cloned().collect();
        assert_eq!(unique.len(), games.len());
        assert!(games.iter().all(|g| g.len() == 5));
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let a = generate(5, Some(7));
        let b = generate(5, Some(7));
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_by(|x, y| x.colors().cmp(y.colors()));
        let mut unshuffled = generate(5, None);
        unshuffled.sort_by(|x, y| x.colors().cmp(y.colors()));
        assert_eq!(sorted, unshuffled);
    }
}
