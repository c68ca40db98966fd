pub mod adjust;
pub mod roll;
pub mod select;

use rand::{thread_rng, Rng};
use tracing::debug;

use crate::parse::Formula;

use self::{adjust::apply_scalars, roll::RollSet, select::apply_selections};

/// Everything a formula produced, in the order it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    rolled: RollSet,
    selected: RollSet,
    total: i64,
}

impl Evaluation {
    /// Every die rolled, ascending.
    pub fn rolled(&self) -> &RollSet {
        &self.rolled
    }
    /// The dice left after every selection, ascending.
    pub fn selected(&self) -> &RollSet {
        &self.selected
    }
    /// Sum of the selected dice with every scalar applied.
    pub fn total(&self) -> i64 {
        self.total
    }
}

impl Formula {
    /// Uses rand::thread_rng(), if you want to choose the rng yourself use `evaluate_with()`
    pub fn evaluate(&self) -> Evaluation {
        self.evaluate_with(&mut thread_rng())
    }

    pub fn evaluate_with(&self, rng: &mut impl Rng) -> Evaluation {
        self.evaluate_rolls(self.dice.roll_with(rng))
    }

    /// Runs the selections and scalars on rolls that were already made.
    pub fn evaluate_rolls(&self, rolled: RollSet) -> Evaluation {
        let selected = apply_selections(&rolled, &self.selections);
        let total = apply_scalars(&selected, &self.scalars);
        debug!(formula = %self, selected = %selected, total, "evaluated formula");

        Evaluation {
            rolled,
            selected,
            total,
        }
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} = {}", self.rolled, self.selected, self.total)
    }
}
