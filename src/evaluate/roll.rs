use rand::{thread_rng, Rng};
use tracing::debug;

use crate::parse::Dice;

/// Die faces in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollSet {
    pub(crate) values: Vec<u32>,
}

impl RollSet {
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sum(&self) -> i64 {
        self.values.iter().map(|&v| i64::from(v)).sum()
    }
}

/// Sorts the values so they can be used in place of a real roll.
impl From<Vec<u32>> for RollSet {
    fn from(mut values: Vec<u32>) -> Self {
        values.sort_unstable();
        Self { values }
    }
}

impl FromIterator<u32> for RollSet {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Dice {
    /// Rolls every die.
    /// Uses rand::thread_rng(), if you want to choose the rng yourself use `roll_with()`
    pub fn roll(&self) -> RollSet {
        self.roll_with(&mut thread_rng())
    }

    /// Rolls every die with the rng specified.
    pub fn roll_with(&self, rng: &mut impl Rng) -> RollSet {
        let rolls: RollSet = (0..self.quantity)
            .map(|_| rng.gen_range(1..=self.sides))
            .collect();

        debug!(dice = %self, rolls = %rolls, "rolled dice");
        rolls
    }
}

fn to_notations(values: &[u32]) -> String {
    format!(
        "[{}]",
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

impl std::fmt::Display for RollSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", to_notations(&self.values))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn test_rolling() {
        let dice = Dice::new(5, 6);
        let rolls = dice.roll_with(&mut test_rng());

        assert_eq!(rolls.len(), 5);
        assert!(rolls.values().iter().all(|v| (1..=6).contains(v)));
        assert!(rolls.values().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_rolling_is_reproducible() {
        let dice = Dice::new(20, 100);
        assert_eq!(dice.roll_with(&mut test_rng()), dice.roll_with(&mut test_rng()));
    }

    #[test]
    fn test_rolling_one_sided_dice() {
        let dice = Dice::new(4, 1);
        assert_eq!(dice.roll_with(&mut test_rng()).values(), &[1, 1, 1, 1]);
    }

    #[test]
    fn test_rolling_with_thread_rng() {
        let rolls = Dice::new(1, 1).roll();
        assert_eq!(rolls.values(), &[1]);
    }

    #[test]
    fn test_rollset_from_unsorted_values() {
        let rolls = RollSet::from(vec![5, 1, 4, 2, 3]);
        assert_eq!(rolls.values(), &[1, 2, 3, 4, 5]);
        assert_eq!(rolls.sum(), 15);
    }

    #[test]
    fn test_rollset_to_string() {
        assert_eq!(RollSet::from(vec![3, 1, 2]).to_string(), "[1, 2, 3]");
        assert_eq!(RollSet::default().to_string(), "[]");
    }
}
