use thiserror::Error;

/// Represents all errors that can occur during evaluation.
///
/// Operand descriptions in the messages come from `Expr::explain`, so they
/// name both the kind and the rendered value, e.g. `integer 1`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A binary operator was applied to operands it does not support.
    #[error("Type error: cannot apply '{operator}' to {left} and {right}.")]
    TypeMismatch {
        /// The operator symbol.
        operator: &'static str,
        /// Explanation of the left operand.
        left:     String,
        /// Explanation of the right operand.
        right:    String,
    },
    /// A prefix operator was applied to an operand it does not support.
    #[error("Type error: cannot apply '{operator}' to {operand}.")]
    InvalidOperand {
        /// The operator symbol.
        operator: &'static str,
        /// Explanation of the operand.
        operand:  String,
    },
    /// A value that is not a function was applied to an argument.
    #[error("Type error: {value} is not a function.")]
    NotCallable {
        /// Explanation of the applied value.
        value: String,
    },
    /// A value could not be converted to the type its context demands.
    #[error("Cannot convert {value} to {target}.")]
    InvalidCast {
        /// Explanation of the value.
        value:  String,
        /// The demanded type.
        target: &'static str,
    },
    /// A native function received a different number of arguments than it
    /// takes.
    #[error("'{function}' takes {expected} argument(s) but received {found}.")]
    ArityMismatch {
        /// Name of the function.
        function: String,
        /// Number of arguments it takes.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
    },
    /// An eager function was given an infinite list.
    #[error("'{function}' cannot consume an infinite list.")]
    InfiniteList {
        /// Name of the function.
        function: &'static str,
    },
    /// A function that must produce a value had nothing to produce.
    #[error("'{function}' produced no value.")]
    EmptyResult {
        /// Name of the function.
        function: &'static str,
    },
    /// Integer or decimal division by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// Decimal arithmetic exceeded the representable range.
    #[error("Overflow while computing '{operator}'.")]
    Overflow {
        /// The operator symbol.
        operator: &'static str,
    },
    /// An argument slot was evaluated outside of the lambda that owns it.
    #[error("Internal error: argument '{name}' is not bound.")]
    UnboundArgument {
        /// Name of the parameter.
        name: String,
    },
    /// Evaluation nested deeper than the interpreter allows, typically
    /// because a function keeps applying itself.
    #[error("Evaluation nested more than {limit} levels deep.")]
    RecursionLimit {
        /// The maximum nesting depth.
        limit: usize,
    },
    /// The evaluation was cancelled through its cancellation token.
    #[error("Evaluation was cancelled.")]
    Cancelled,
}

impl RuntimeError {
    /// Whether the error is a cancellation rather than a failure of the
    /// expression itself.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
