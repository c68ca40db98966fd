use tracing::trace;

use super::roll::RollSet;
use crate::parse::{Scalar, Sign};

impl Scalar {
    fn apply(self, total: i64) -> i64 {
        let value = i64::from(self.value);
        match self.sign {
            Sign::Plus => total + value,
            Sign::Minus => total - value,
        }
    }
}

/// Sums the rolls then adds or subtracts every scalar in order.
/// The result is negative when the subtractions outweigh the rolls.
pub fn apply_scalars(rolls: &RollSet, scalars: &[Scalar]) -> i64 {
    scalars.iter().fold(rolls.sum(), |total, scalar| {
        let next = scalar.apply(total);
        trace!(%scalar, total = next, "applied scalar");
        next
    })
}
