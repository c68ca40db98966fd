use winnow::{
    ascii::digit1,
    combinator::{dispatch, empty, fail, repeat, separated_pair},
    token::any,
    PResult, Parser,
};

use super::{KeepKind, Sign};
use crate::{FormulaError, MalformedReason};

/// The shortest formula that can possibly match, `1d1`.
const MIN_FORMULA_LEN: usize = 3;

/// The raw text of the three parts of a formula, in the order they must appear.
///
/// `5d6>4<3+2-1` splits into `5d6`, `>4<3` and `+2-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub dice: &'a str,
    pub selects: &'a str,
    pub scalars: &'a str,
}

/// The digits of every number in a formula, paired with the operator before them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tokens<'a> {
    pub(crate) dice: (&'a str, &'a str),
    pub(crate) selections: Vec<(KeepKind, &'a str)>,
    pub(crate) scalars: Vec<(Sign, &'a str)>,
}

impl<'a> Segments<'a> {
    /// Checks the shape of the formula and splits it, without looking at the
    /// values of the numbers.
    pub fn split(formula: &'a str) -> Result<Self, FormulaError> {
        tokenize(formula).map(|(segments, _)| segments)
    }

    /// Position of the first selection in the formula.
    pub(crate) fn selects_offset(&self) -> usize {
        self.dice.len()
    }
    /// Position of the first scalar in the formula.
    pub(crate) fn scalars_offset(&self) -> usize {
        self.dice.len() + self.selects.len()
    }
}

/// Splits the formula into its segments and the tokens inside them in one pass.
pub(crate) fn tokenize(formula: &str) -> Result<(Segments<'_>, Tokens<'_>), FormulaError> {
    if formula.chars().count() < MIN_FORMULA_LEN {
        return Err(FormulaError::malformed(formula, MalformedReason::TooShort));
    }
    if !formula.contains('d') {
        return Err(FormulaError::malformed(
            formula,
            MalformedReason::MissingDiceMarker,
        ));
    }

    segments.parse(formula).map_err(|e| {
        FormulaError::malformed(formula, MalformedReason::Mismatch { offset: e.offset() })
    })
}

fn segments<'i>(input: &mut &'i str) -> PResult<(Segments<'i>, Tokens<'i>)> {
    (
        dice.with_taken(),
        repeat::<_, _, Vec<_>, _, _>(0.., (keep_kind, digit1)).with_taken(),
        repeat::<_, _, Vec<_>, _, _>(0.., (sign, digit1)).with_taken(),
    )
        .map(
            |((dice, dice_text), (selections, selects), (scalars, scalars_text))| {
                let segments = Segments {
                    dice: dice_text,
                    selects,
                    scalars: scalars_text,
                };
                let tokens = Tokens {
                    dice,
                    selections,
                    scalars,
                };
                (segments, tokens)
            },
        )
        .parse_next(input)
}

fn dice<'i>(input: &mut &'i str) -> PResult<(&'i str, &'i str)> {
    separated_pair(digit1, 'd', digit1).parse_next(input)
}

fn keep_kind(input: &mut &str) -> PResult<KeepKind> {
    dispatch!(any;
        '>' => empty.value(KeepKind::Highest),
        '<' => empty.value(KeepKind::Lowest),
        _ => fail
    )
    .parse_next(input)
}

fn sign(input: &mut &str) -> PResult<Sign> {
    dispatch!(any;
        '+' => empty.value(Sign::Plus),
        '-' => empty.value(Sign::Minus),
        _ => fail
    )
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch_offset(formula: &str) -> usize {
        match Segments::split(formula).unwrap_err() {
            FormulaError::Malformed {
                reason: MalformedReason::Mismatch { offset },
                ..
            } => offset,
            other => panic!("expected a mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_split_full_formula() {
        let segments = Segments::split("5d6>4<3+2-1").unwrap();
        assert_eq!(segments.dice, "5d6");
        assert_eq!(segments.selects, ">4<3");
        assert_eq!(segments.scalars, "+2-1");
    }

    #[test]
    fn test_split_dice_only() {
        let segments = Segments::split("1d1").unwrap();
        assert_eq!(segments.dice, "1d1");
        assert_eq!(segments.selects, "");
        assert_eq!(segments.scalars, "");
    }

    #[test]
    fn test_split_scalars_without_selects() {
        let segments = Segments::split("3d6+2-1").unwrap();
        assert_eq!(segments.dice, "3d6");
        assert_eq!(segments.selects, "");
        assert_eq!(segments.scalars, "+2-1");
        assert_eq!(segments.scalars_offset(), 3);
    }

    #[test]
    fn test_split_multi_digit_numbers() {
        let segments = Segments::split("100d20>10<5+15").unwrap();
        assert_eq!(segments.dice, "100d20");
        assert_eq!(segments.selects, ">10<5");
        assert_eq!(segments.scalars, "+15");
        assert_eq!(segments.selects_offset(), 6);
    }

    #[test]
    fn test_split_too_short() {
        for formula in ["", "d", "1d", "d6"] {
            let err = Segments::split(formula).unwrap_err();
            assert_eq!(err.reason(), Some(&MalformedReason::TooShort), "{formula}");
        }
    }

    #[test]
    fn test_split_missing_dice_marker() {
        let err = Segments::split("56>4").unwrap_err();
        assert_eq!(err.reason(), Some(&MalformedReason::MissingDiceMarker));
    }

    #[test]
    fn test_split_scalar_before_selection() {
        assert_eq!(mismatch_offset("5d6+2>3"), 5);
    }

    #[test]
    fn test_split_malformed_dice() {
        assert!(Segments::split("5dx").is_err());
        assert!(Segments::split("d66").is_err());
        assert!(Segments::split("5d6d6").is_err());
        assert!(Segments::split("xd6").is_err());
    }

    #[test]
    fn test_split_operator_without_number() {
        assert_eq!(mismatch_offset("5d6>"), 3);
        assert_eq!(mismatch_offset("5d6+"), 3);
        assert_eq!(mismatch_offset("5d6+-1"), 3);
    }

    #[test]
    fn test_split_rejects_whitespace() {
        assert_eq!(mismatch_offset("5d6 +1"), 3);
    }

    #[test]
    fn test_keep_kind() {
        assert_eq!(keep_kind.parse(">").unwrap(), KeepKind::Highest);
        assert_eq!(keep_kind.parse("<").unwrap(), KeepKind::Lowest);
        assert!(keep_kind.parse("+").is_err());
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign.parse("+").unwrap(), Sign::Plus);
        assert_eq!(sign.parse("-").unwrap(), Sign::Minus);
        assert!(sign.parse(">").is_err());
    }

    #[test]
    fn test_tokenize() {
        let (segments, tokens) = tokenize("12d20>4<3+2-10").unwrap();

        assert_eq!(segments.dice, "12d20");
        assert_eq!(tokens.dice, ("12", "20"));
        assert_eq!(
            tokens.selections,
            vec![(KeepKind::Highest, "4"), (KeepKind::Lowest, "3")]
        );
        assert_eq!(tokens.scalars, vec![(Sign::Plus, "2"), (Sign::Minus, "10")]);
    }

    #[test]
    fn test_tokenize_dice_only() {
        let (_, tokens) = tokenize("1d1").unwrap();

        assert_eq!(tokens.dice, ("1", "1"));
        assert!(tokens.selections.is_empty());
        assert!(tokens.scalars.is_empty());
    }
}
