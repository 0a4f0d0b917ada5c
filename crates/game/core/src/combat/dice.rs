//! Dice expressions used for weapon and unarmed damage.
//!
//! Grammar (whitespace is ignored):
//!
//! ```text
//! expr     := constant | dice
//! constant := sign? digits
//! dice     := digits? 'd' digits modifier?
//! modifier := ('+' | '-') digits
//! ```
//!
//! `"7"`, `"d6"`, `"2d6"`, `"2d6+3"` and `"1d8-1"` are all valid. A die with
//! zero sides is normalized to one side. Parsing is strict and reports a
//! [`DiceParseError`]; gameplay code uses [`DiceExpr::parse_or`] so that a bad
//! weapon definition degrades to a fallback roll instead of failing combat.

use std::fmt;
use std::str::FromStr;

use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};

/// Error when parsing a dice expression.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiceParseError {
    #[error("empty dice expression")]
    Empty,

    #[error("missing die size after 'd'")]
    MissingSides,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

impl GameError for DiceParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "DICE_EMPTY",
            Self::MissingSides => "DICE_MISSING_SIDES",
            Self::InvalidNumber(_) => "DICE_INVALID_NUMBER",
            Self::TrailingInput(_) => "DICE_TRAILING_INPUT",
        }
    }
}

/// A parsed `NdS+B` expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct DiceExpr {
    /// Number of dice rolled. Zero means the expression is a constant.
    pub count: u32,
    /// Sides per die, always at least 1.
    pub sides: u32,
    /// Constant added after summing the dice.
    pub modifier: i32,
}

impl DiceExpr {
    pub const fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides: if sides == 0 { 1 } else { sides },
            modifier,
        }
    }

    /// An expression that always yields `value`.
    pub const fn constant(value: i32) -> Self {
        Self::new(0, 1, value)
    }

    /// Parses `input`, falling back to `fallback` on any error.
    pub fn parse_or(input: &str, fallback: DiceExpr) -> DiceExpr {
        input.parse().unwrap_or(fallback)
    }

    /// Rolls every die and adds the modifier.
    pub fn roll(&self, rng: &(impl RngOracle + ?Sized)) -> i32 {
        (0..self.count).fold(self.modifier, |total, _| {
            total.saturating_add(rng.roll_die(self.sides))
        })
    }

    /// Smallest possible result.
    pub fn min(&self) -> i32 {
        self.modifier
            .saturating_add(i32::try_from(self.count).unwrap_or(i32::MAX))
    }

    /// Largest possible result.
    pub fn max(&self) -> i32 {
        let dice = (self.count as i64) * (self.sides as i64);
        (self.modifier as i64 + dice).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

impl FromStr for DiceExpr {
    type Err = DiceParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if compact.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let Some((count_part, rest)) = compact.split_once('d') else {
            return parse_signed(&compact).map(DiceExpr::constant);
        };

        let count = if count_part.is_empty() {
            1
        } else {
            parse_unsigned(count_part)?
        };

        let sides_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if sides_len == 0 {
            return Err(DiceParseError::MissingSides);
        }
        let (sides_part, modifier_part) = rest.split_at(sides_len);
        let sides = parse_unsigned(sides_part)?;

        let modifier = match modifier_part.as_bytes().first() {
            None => 0,
            Some(b'+') | Some(b'-') => parse_signed(modifier_part)?,
            Some(_) => return Err(DiceParseError::TrailingInput(modifier_part.to_string())),
        };

        Ok(Self::new(count, sides, modifier))
    }
}

fn parse_unsigned(digits: &str) -> Result<u32, DiceParseError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DiceParseError::InvalidNumber(digits.to_string()));
    }
    digits
        .parse()
        .map_err(|_| DiceParseError::InvalidNumber(digits.to_string()))
}

fn parse_signed(text: &str) -> Result<i32, DiceParseError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    };
    let magnitude = parse_unsigned(digits)?;
    let magnitude =
        i32::try_from(magnitude).map_err(|_| DiceParseError::InvalidNumber(text.to_string()))?;
    Ok(if negative { -magnitude } else { magnitude })
}

impl TryFrom<String> for DiceExpr {
    type Error = DiceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiceExpr> for String {
    fn from(value: DiceExpr) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            return write!(f, "{}", self.modifier);
        }
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}
