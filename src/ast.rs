use std::{fmt, rc::Rc};

use rust_decimal::Decimal;

use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::{frame::Env, list::List},
};

/// Rendering of expressions back into source text.
///
/// Every expression renders as input that re-parses to an equivalent
/// expression. Operands are parenthesised only where precedence or
/// associativity requires it.
pub mod display;

/// Signature of a native function implementation.
///
/// A native receives the evaluation context and exactly as many evaluated
/// arguments as its declared arity.
pub type NativeFn = dyn Fn(&Context, &[Expr]) -> EvalResult<Expr>;

/// A named function implemented in Rust.
///
/// Built-ins such as `map` and `sum`, as well as functions registered by the
/// embedding application, are stored in a scope as `Expr::Function`.
pub struct Function {
    /// The name the function was registered under.
    pub name:           String,
    /// The number of arguments collected before the implementation runs.
    pub arity:          usize,
    /// The implementation invoked once `arity` arguments are available.
    pub implementation: Rc<NativeFn>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// A lambda abstraction such as `\x y -> x + y`.
#[derive(Debug)]
pub struct Lambda {
    /// Lexical nesting depth of the lambda; the outermost lambda has depth 1.
    pub depth:      usize,
    /// Parameter names in positional order.
    pub parameters: Vec<String>,
    /// The body, with parameters resolved to [`ArgumentSlot`]s.
    pub body:       Expr,
}

impl Lambda {
    /// Number of arguments the lambda collects before its body runs.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// A placeholder for a lambda parameter, resolved at parse time.
///
/// The slot names the lambda by its lexical depth and the parameter by its
/// position. At run time it reads the activation record of that depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSlot {
    /// Depth of the lambda that owns the parameter.
    pub depth: usize,
    /// Position of the parameter in the lambda's parameter list.
    pub index: usize,
    /// Source name of the parameter, kept for rendering.
    pub name:  String,
}

/// A piece of an interpolated string.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// Literal text copied verbatim.
    Text(String),
    /// An embedded expression whose display string is spliced in.
    Expr(Expr),
}

/// A binary built-in operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Short-circuit logical or (`||`)
    Or,
    /// Short-circuit logical and (`&&`)
    And,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// List concatenation (`++`)
    Concat,
    /// List prepend (`:`)
    Prepend,
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
}

impl BinaryOperator {
    /// Binding strength of the operator; higher binds tighter.
    ///
    /// ```
    /// use morgana::ast::BinaryOperator;
    ///
    /// assert!(BinaryOperator::Mul.precedence() > BinaryOperator::Add.precedence());
    /// assert!(BinaryOperator::And.precedence() > BinaryOperator::Or.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 2,
            Self::And => 3,
            Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::LessEqual
            | Self::Greater
            | Self::GreaterEqual => 4,
            Self::Concat | Self::Prepend => 5,
            Self::Add | Self::Sub => 6,
            Self::Mul | Self::Div | Self::Mod => 7,
        }
    }

    /// Whether `a op b op c` groups as `a op (b op c)`.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Concat | Self::Prepend)
    }

    /// Minimum precedence required of the left operand.
    #[must_use]
    pub const fn left_precedence(self) -> u8 {
        if self.is_right_associative() {
            self.precedence() + 1
        } else {
            self.precedence()
        }
    }

    /// Minimum precedence required of the right operand.
    #[must_use]
    pub const fn right_precedence(self) -> u8 {
        if self.is_right_associative() {
            self.precedence()
        } else {
            self.precedence() + 1
        }
    }

    /// The source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Concat => "++",
            Self::Prepend => ":",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`!x`).
    Not,
}

impl UnaryOperator {
    /// The source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An expression of the language.
///
/// `Expr` is both the syntax tree produced by the parser and the value
/// produced by evaluation: evaluating a literal, a list, a function or a
/// closure yields the node itself. Children are reference counted so values
/// can be shared between lists, partial applications and closures without
/// copying.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A fixed-precision decimal number.
    Decimal(Decimal),
    /// A boolean.
    Bool(bool),
    /// A string.
    Str(Rc<str>),
    /// The null value.
    Null,
    /// A finite or infinite, lazily traversed list.
    List(List),
    /// A range literal such as `[1, 3..9]` whose bounds are not yet evaluated.
    Range {
        /// The first element.
        start:  Rc<Self>,
        /// The optional second element, which fixes the step.
        second: Option<Rc<Self>>,
        /// The optional inclusive end.
        end:    Option<Rc<Self>>,
    },
    /// Application of a function to a single argument.
    Call {
        /// The expression producing the function.
        function: Rc<Self>,
        /// The argument expression.
        argument: Rc<Self>,
    },
    /// A native function.
    Function(Rc<Function>),
    /// A lambda abstraction as written in source.
    Lambda(Rc<Lambda>),
    /// A lambda paired with the activation records it was evaluated in.
    Closure {
        /// The lambda being closed over.
        lambda: Rc<Lambda>,
        /// The captured environment.
        env:    Env,
    },
    /// A reference to a lambda parameter.
    Argument(Rc<ArgumentSlot>),
    /// A function value that has received some, but not all, of its
    /// arguments.
    Partial {
        /// The function or closure awaiting more arguments.
        target:    Rc<Self>,
        /// The arguments received so far.
        arguments: Rc<[Self]>,
    },
    /// A prefix operation.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Rc<Self>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Rc<Self>,
        /// Right operand.
        right: Rc<Self>,
    },
    /// A binary operator bound to its left operand, as in `(3 +)`.
    LeftSection {
        /// The operator.
        op:   BinaryOperator,
        /// The bound left operand.
        left: Rc<Self>,
    },
    /// A binary operator bound to its right operand, as in `(+ 3)`.
    RightSection {
        /// The operator.
        op:    BinaryOperator,
        /// The bound right operand.
        right: Rc<Self>,
    },
    /// `if condition then a else b`.
    If {
        /// The condition, cast to boolean when evaluated.
        condition:   Rc<Self>,
        /// Evaluated when the condition holds.
        then_branch: Rc<Self>,
        /// Evaluated when the condition does not hold.
        else_branch: Rc<Self>,
    },
    /// An interpolated string such as `p"sum: ${a + b}"`.
    ParsedString(Rc<[Fragment]>),
}

impl Expr {
    /// Builds a string expression.
    #[must_use]
    pub fn string(text: &str) -> Self {
        Self::Str(Rc::from(text))
    }

    /// Builds the application `function argument`.
    #[must_use]
    pub fn call(function: Self, argument: Self) -> Self {
        Self::Call { function: Rc::new(function),
                     argument: Rc::new(argument), }
    }

    /// Builds a binary operation node.
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Self, right: Self) -> Self {
        Self::Binary { op,
                       left: Rc::new(left),
                       right: Rc::new(right) }
    }

    /// Builds a finite list of already evaluated values.
    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        Self::List(List::items(items))
    }

    /// Evaluates the expression and applies it to `arguments`, one at a time.
    ///
    /// Arguments are evaluated before being supplied. With no arguments the
    /// plain value is returned, so a lambda comes back as an unapplied
    /// closure rather than an error.
    ///
    /// # Errors
    /// Propagates any evaluation error, including cancellation.
    ///
    /// # Example
    /// ```
    /// use morgana::{ast::Expr, interpreter::evaluator::core::Context, parse};
    ///
    /// let increment = parse(r"\x -> x + 1").unwrap();
    /// let context = Context::new();
    ///
    /// let result = increment.evaluate(&context, &[Expr::Integer(4)]).unwrap();
    /// assert_eq!(result.to_string(), "5");
    /// ```
    pub fn evaluate(&self, context: &Context, arguments: &[Self]) -> EvalResult<Self> {
        let mut value = context.eval(self, None)?;
        for argument in arguments {
            let argument = context.eval(argument, None)?;
            value = context.apply(&value, argument)?;
        }
        Ok(value)
    }
}
