use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::ast::Expr;

/// A numeric value with the language's promotion rule applied.
///
/// Integer with integer stays integer; as soon as either side is a decimal
/// both sides are treated as decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Number {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A fixed-precision decimal.
    Decimal(Decimal),
}

impl Number {
    /// Extracts a number from an evaluated expression.
    ///
    /// Returns `None` for every non-numeric value.
    #[must_use]
    pub const fn from_expr(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Integer(n) => Some(Self::Integer(*n)),
            Expr::Decimal(d) => Some(Self::Decimal(*d)),
            _ => None,
        }
    }

    /// Converts the number back into an expression.
    #[must_use]
    pub const fn into_expr(self) -> Expr {
        match self {
            Self::Integer(n) => Expr::Integer(n),
            Self::Decimal(d) => Expr::Decimal(d),
        }
    }

    /// The value as a decimal.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        match self {
            Self::Integer(n) => Decimal::from(n),
            Self::Decimal(d) => d,
        }
    }

    /// Whether the number is a decimal.
    #[must_use]
    pub const fn is_decimal(self) -> bool {
        matches!(self, Self::Decimal(_))
    }

    /// Applies the promotion rule to a pair of operands.
    ///
    /// ```
    /// use morgana::interpreter::value::number::Number;
    /// use rust_decimal::Decimal;
    ///
    /// let (left, right) = Number::Integer(1).promote(Number::Decimal(Decimal::new(15, 1)));
    /// assert_eq!(left, Number::Decimal(Decimal::ONE));
    /// assert!(right.is_decimal());
    /// ```
    #[must_use]
    pub fn promote(self, other: Self) -> (Self, Self) {
        if self.is_decimal() || other.is_decimal() {
            (Self::Decimal(self.to_decimal()), Self::Decimal(other.to_decimal()))
        } else {
            (self, other)
        }
    }

    /// Whether the number equals zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Integer(n) => n == 0,
            Self::Decimal(d) => d.is_zero(),
        }
    }

    /// Whether the number is strictly below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        match self {
            Self::Integer(n) => n < 0,
            Self::Decimal(d) => d.is_sign_negative() && !d.is_zero(),
        }
    }

    /// Compares two numbers after promotion.
    #[must_use]
    pub fn compare(self, other: Self) -> Ordering {
        match self.promote(other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(&b),
            (a, b) => a.to_decimal().cmp(&b.to_decimal()),
        }
    }

    /// Adds two numbers, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        match self.promote(other) {
            (Self::Integer(a), Self::Integer(b)) => a.checked_add(b).map(Self::Integer),
            (a, b) => a.to_decimal().checked_add(b.to_decimal()).map(Self::Decimal),
        }
    }

    /// Subtracts `other`, returning `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        match self.promote(other) {
            (Self::Integer(a), Self::Integer(b)) => a.checked_sub(b).map(Self::Integer),
            (a, b) => a.to_decimal().checked_sub(b.to_decimal()).map(Self::Decimal),
        }
    }
}
