use tracing::debug;

use super::{grammar::tokenize, Dice, Formula, KeepKind, Scalar, Segments, Selection, Sign};
use crate::{FormulaError, MalformedReason, MAX_QUANTITY};

/// Checks that the formula is `NdS`, followed by any number of `>n`/`<n`
/// selections, followed by any number of `+v`/`-v` scalars, and returns it
/// split into its typed parts.
///
/// Every selection must keep at most as many dice as the one before it.
pub fn validate(formula: &str) -> Result<Formula, FormulaError> {
    validate_segments(formula)
        .inspect_err(|err| debug!(formula, error = %err, "rejected formula"))
}

fn validate_segments(formula: &str) -> Result<Formula, FormulaError> {
    let (segments, tokens) = tokenize(formula)?;

    let dice = parse_dice(formula, tokens.dice)?;
    let selections = parse_selections(formula, &tokens.selections)?;
    check_selection_chain(&segments, &selections)?;
    let scalars = parse_scalars(formula, &tokens.scalars)?;

    Ok(Formula {
        dice,
        selections,
        scalars,
        source: formula.to_owned(),
        selects_at: segments.selects_offset(),
        scalars_at: segments.scalars_offset(),
    })
}

fn parse_dice(formula: &str, (quantity, sides): (&str, &str)) -> Result<Dice, FormulaError> {
    let quantity = amount(formula, quantity, "number of dice")?;
    if quantity > MAX_QUANTITY {
        return Err(FormulaError::malformed(
            formula,
            MalformedReason::TooManyDice(quantity),
        ));
    }
    let sides = amount(formula, sides, "number of sides")?;

    Ok(Dice { quantity, sides })
}

fn parse_selections(
    formula: &str,
    tokens: &[(KeepKind, &str)],
) -> Result<Vec<Selection>, FormulaError> {
    tokens
        .iter()
        .map(|&(kind, digits)| {
            let amount = amount(formula, digits, "number of dice to keep")?;
            Ok(Selection { kind, amount })
        })
        .collect()
}

fn parse_scalars(formula: &str, tokens: &[(Sign, &str)]) -> Result<Vec<Scalar>, FormulaError> {
    tokens
        .iter()
        .map(|&(sign, digits)| {
            let value = number(formula, digits)?;
            Ok(Scalar { sign, value })
        })
        .collect()
}

/// `<` and `>` are treated the same here, only the amounts matter.
fn check_selection_chain(segments: &Segments, selections: &[Selection]) -> Result<(), FormulaError> {
    for pair in selections.windows(2) {
        let (previous, requested) = (pair[0].amount, pair[1].amount);
        if requested > previous {
            return Err(FormulaError::OverSelection {
                selects: segments.selects.to_owned(),
                previous,
                requested,
            });
        }
    }
    Ok(())
}

fn number(formula: &str, digits: &str) -> Result<u32, FormulaError> {
    // The grammar only lets digits through so overflowing is the only way to fail
    digits.parse().map_err(|_| {
        FormulaError::malformed(formula, MalformedReason::NumberTooLarge(digits.to_owned()))
    })
}

fn amount(formula: &str, digits: &str, what: &'static str) -> Result<u32, FormulaError> {
    match number(formula, digits)? {
        0 => Err(FormulaError::malformed(
            formula,
            MalformedReason::ZeroAmount(what),
        )),
        n => Ok(n),
    }
}
