use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{list::List, number::Number},
    },
    util::{num::decimal_to_i64_checked, text::parse_bool},
};

impl Expr {
    /// Names the kind of value for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Bool(_) => "boolean",
            Self::Str(_) | Self::ParsedString(_) => "string",
            Self::Null => "null",
            Self::List(_) | Self::Range { .. } => "list",
            Self::Function(_) => "function",
            Self::Lambda(_) | Self::Closure { .. } => "lambda",
            Self::Partial { .. } => "partial application",
            Self::LeftSection { .. } | Self::RightSection { .. } => "operator section",
            Self::Call { .. }
            | Self::Argument(_)
            | Self::Unary { .. }
            | Self::Binary { .. }
            | Self::If { .. } => "expression",
        }
    }

    /// Renders the value for an error message, prefixed by its kind.
    ///
    /// ```
    /// use morgana::ast::Expr;
    ///
    /// assert_eq!(Expr::Integer(3).explain(), "integer 3");
    /// assert_eq!(Expr::string("a").explain(), "string \"a\"");
    /// assert_eq!(Expr::Null.explain(), "null");
    /// ```
    #[must_use]
    pub fn explain(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Function(function) => format!("function {}", function.name),
            _ => format!("{} {self}", self.type_name()),
        }
    }

    /// Casts the value to a boolean.
    ///
    /// Strings are accepted when [`parse_bool`] recognises them.
    ///
    /// # Errors
    /// `InvalidCast` for any other value.
    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Str(s) => parse_bool(s).ok_or_else(|| self.cast_error("boolean")),
            _ => Err(self.cast_error("boolean")),
        }
    }

    /// Casts the value to an integer.
    ///
    /// Decimals without a fractional part are accepted.
    ///
    /// # Errors
    /// `InvalidCast` for any other value.
    pub fn as_integer(&self) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Decimal(d) => decimal_to_i64_checked(*d, self.cast_error("integer")),
            _ => Err(self.cast_error("integer")),
        }
    }

    /// Casts the value to a number.
    ///
    /// # Errors
    /// `InvalidCast` when the value is neither an integer nor a decimal.
    pub fn as_number(&self) -> EvalResult<Number> {
        Number::from_expr(self).ok_or_else(|| self.cast_error("number"))
    }

    /// Casts the value to a string slice.
    ///
    /// # Errors
    /// `InvalidCast` when the value is not a string.
    pub fn as_str(&self) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(self.cast_error("string")),
        }
    }

    /// Casts the value to a list.
    ///
    /// # Errors
    /// `InvalidCast` when the value is not a list.
    pub fn as_list(&self) -> EvalResult<&List> {
        match self {
            Self::List(list) => Ok(list),
            _ => Err(self.cast_error("list")),
        }
    }

    fn cast_error(&self, target: &'static str) -> RuntimeError {
        RuntimeError::InvalidCast { value: self.explain(),
                                    target }
    }
}
