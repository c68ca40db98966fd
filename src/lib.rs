//! Roll compact dice formulas such as `5d6>4<3+2-1`.
//!
//! A formula is `NdS` (roll N dice with S sides), then any number of
//! selections (`>n` keeps the highest n dice, `<n` keeps the lowest n), then
//! any number of scalars (`+v` or `-v`) applied to the sum of what was kept.
//! Each selection works on what the previous one kept, so it may not ask for
//! more dice than the one before it.
//!
//! ```rust
//! # use dice_formula::{roll, roll_with, Formula, FormulaError, RollSet};
//! # use rand::rngs::StdRng;
//! # use rand::SeedableRng;
//! #
//! # fn main() -> Result<(), FormulaError> {
//! // Roll 5 d6, keep the highest 4, of those keep the lowest 3, add 2, subtract 1.
//! let rolled = roll("5d6>4<3+2-1")?;
//! println!("{} = {}", rolled.selected(), rolled.total()); // [3, 4, 6] = 14
//!
//! // Use a custom Rng that implements the rand::Rng trait
//! let mut rng = StdRng::seed_from_u64(1);
//! let rolled = roll_with("1d1+2", &mut rng)?;
//! assert_eq!(rolled.total(), 3);
//!
//! // Evaluate rolls that were already made
//! let formula = Formula::parse("5d6>4<3+2-1")?;
//! let rolled = formula.evaluate_rolls(RollSet::from(vec![1, 2, 3, 4, 5]));
//! assert_eq!(rolled.total(), 10);
//! # Ok(())
//! # }
//! ```

mod error;
mod evaluate;
mod parse;

pub use error::{FormulaError, MalformedReason};
pub use evaluate::{
    adjust::apply_scalars, roll::RollSet, select::apply_selections, Evaluation,
};
pub use parse::{validate, Dice, Formula, KeepKind, Scalar, Segments, Selection, Sign};

/// The most dice a single formula may roll.
pub const MAX_QUANTITY: u32 = 10_000;

/// Validates the notation without rolling the dice.
pub fn parse(notation: &str) -> Result<Formula, FormulaError> {
    Formula::parse(notation)
}

/// Validates the notation and rolls it.
pub fn roll(notation: &str) -> Result<Evaluation, FormulaError> {
    let formula = Formula::parse(notation)?;
    Ok(formula.evaluate())
}

/// Same as `roll()` but allows you to choose the rng you prefer to use.
pub fn roll_with(notation: &str, rng: &mut impl rand::Rng) -> Result<Evaluation, FormulaError> {
    let formula = Formula::parse(notation)?;
    Ok(formula.evaluate_with(rng))
}
