mod grammar;
mod validate;

pub use grammar::Segments;
pub use validate::validate;

use crate::{FormulaError, MAX_QUANTITY};

/// `{quantity}d{sides}`\
/// The mandatory dice segment at the start of every formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dice {
    pub(crate) quantity: u32,
    pub(crate) sides: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepKind {
    /// `>`
    Highest,
    /// `<`
    Lowest,
}

/// `>{amount}` or `<{amount}`\
/// Keeps the highest or lowest `amount` of the rolls left by the previous selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub(crate) kind: KeepKind,
    pub(crate) amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

/// `+{value}` or `-{value}`\
/// Adjusts the sum of the selected rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar {
    pub(crate) sign: Sign,
    pub(crate) value: u32,
}

/// A validated formula, split into its dice, selections and scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub(crate) dice: Dice,
    pub(crate) selections: Vec<Selection>,
    pub(crate) scalars: Vec<Scalar>,
    /// The text the formula was validated from.
    pub(crate) source: String,
    pub(crate) selects_at: usize,
    pub(crate) scalars_at: usize,
}

impl Dice {
    /// Creates new dice.
    /// The quantity will be clamped between 1 and `MAX_QUANTITY` and the sides
    /// will be at least 1.
    pub fn new(quantity: u32, sides: u32) -> Self {
        Self {
            quantity: quantity.clamp(1, MAX_QUANTITY),
            sides: sides.max(1),
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
    pub fn sides(&self) -> u32 {
        self.sides
    }
}

impl Selection {
    /// Amounts of 0 are bumped to 1.
    pub fn new(kind: KeepKind, amount: u32) -> Self {
        Self {
            kind,
            amount: amount.max(1),
        }
    }

    pub fn highest(amount: u32) -> Self {
        Self::new(KeepKind::Highest, amount)
    }
    pub fn lowest(amount: u32) -> Self {
        Self::new(KeepKind::Lowest, amount)
    }

    pub fn kind(&self) -> KeepKind {
        self.kind
    }
    pub fn amount(&self) -> u32 {
        self.amount
    }
}

impl Scalar {
    pub fn new(sign: Sign, value: u32) -> Self {
        Self { sign, value }
    }

    pub fn plus(value: u32) -> Self {
        Self::new(Sign::Plus, value)
    }
    pub fn minus(value: u32) -> Self {
        Self::new(Sign::Minus, value)
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Formula {
    /// Same as [`validate`].
    pub fn parse(notation: &str) -> Result<Formula, FormulaError> {
        validate(notation)
    }

    pub fn dice(&self) -> Dice {
        self.dice
    }
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }
    pub fn scalars(&self) -> &[Scalar] {
        &self.scalars
    }

    /// The raw text of the dice, selects and scalars, as written.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            dice: &self.source[..self.selects_at],
            selects: &self.source[self.selects_at..self.scalars_at],
            scalars: &self.source[self.scalars_at..],
        }
    }
}

impl std::str::FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.quantity, self.sides)
    }
}

impl std::fmt::Display for KeepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            KeepKind::Highest => ">",
            KeepKind::Lowest => "<",
        };
        write!(f, "{str}")
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind, self.amount)
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Sign::Plus => "+",
            Sign::Minus => "-",
        };
        write!(f, "{str}")
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.sign, self.value)
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dice)?;
        for selection in &self.selections {
            write!(f, "{selection}")?;
        }
        for scalar in &self.scalars {
            write!(f, "{scalar}")?;
        }
        Ok(())
    }
}
