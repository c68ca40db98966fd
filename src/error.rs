/// Why a formula could not be read as `NdS[<n|>n]...[+v|-v]...`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("formula is too short, the shortest formula is `1d1`")]
    TooShort,

    #[error("`NdS` format not found, the formula has no `d`")]
    MissingDiceMarker,

    #[error("unexpected input at position {offset}")]
    Mismatch { offset: usize },

    #[error("{0} must be at least 1")]
    ZeroAmount(&'static str),

    #[error("number `{0}` is too large")]
    NumberTooLarge(String),

    #[error("cannot roll {0} dice, the limit is {limit}", limit = crate::MAX_QUANTITY)]
    TooManyDice(u32),
}

/// Every way a formula can be rejected.
///
/// All of these are found by [`validate`](crate::validate) before any dice
/// are rolled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("malformed formula `{formula}`: {reason}")]
    Malformed {
        formula: String,
        reason: MalformedReason,
    },

    #[error(
        "selections `{selects}` keep {requested} dice after a previous selection kept {previous}"
    )]
    OverSelection {
        selects: String,
        previous: u32,
        requested: u32,
    },
}

impl FormulaError {
    pub(crate) fn malformed(formula: &str, reason: MalformedReason) -> Self {
        FormulaError::Malformed {
            formula: formula.to_owned(),
            reason,
        }
    }

    /// The malformed reason, `None` for over-selections.
    pub fn reason(&self) -> Option<&MalformedReason> {
        match self {
            FormulaError::Malformed { reason, .. } => Some(reason),
            FormulaError::OverSelection { .. } => None,
        }
    }
}
