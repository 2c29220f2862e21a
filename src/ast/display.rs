use std::{cmp::Ordering, fmt, rc::Rc};

use crate::{
    ast::{ArgumentSlot, BinaryOperator, Expr, Fragment, Lambda},
    interpreter::value::{
        frame::{Env, Frame},
        list::{List, Range},
        number::Number,
    },
    util::text::{escape, format_decimal},
};

/// Context-free position: `$`, lambda bodies, list elements.
pub const LOWEST: u8 = 0;
/// Juxtaposition `f x`.
pub const APPLICATION: u8 = 12;
/// Prefix operators and negative literals.
pub const UNARY: u8 = 13;
/// Literals, names and bracketed forms.
pub const ATOM: u8 = 14;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer { env: None }.write(f, self, LOWEST)
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer { env: None }.write_list(f, self, LOWEST)
    }
}

/// Writes expressions as source text.
///
/// Argument slots bound in `env` are printed as the values they are bound
/// to, which is how a closure shows what it captured.
#[derive(Clone, Copy)]
struct Printer<'e> {
    env: Option<&'e Rc<Frame>>,
}

impl<'e> Printer<'e> {
    fn resolve(&self, slot: &ArgumentSlot) -> Option<&'e Expr> {
        self.env.and_then(|frame| frame.lookup(slot))
    }

    fn with_env<'a>(&self, env: &'a Env) -> Printer<'a>
        where 'e: 'a
    {
        match env {
            Some(frame) => Printer { env: Some(frame) },
            None => Printer { env: self.env },
        }
    }

    /// Writes `expr`, parenthesised if it binds looser than `min`.
    fn write(&self, f: &mut fmt::Formatter<'_>, expr: &Expr, min: u8) -> fmt::Result {
        if let Expr::Argument(slot) = expr
           && let Some(value) = self.resolve(slot)
        {
            return self.write(f, value, min);
        }

        if precedence(expr) < min {
            f.write_str("(")?;
            self.write_bare(f, expr)?;
            f.write_str(")")
        } else {
            self.write_bare(f, expr)
        }
    }

    fn write_bare(&self, f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
        match expr {
            // The magnitude of the minimum does not fit in a literal.
            Expr::Integer(i64::MIN) => write!(f, "(-{} - 1)", i64::MAX),
            Expr::Integer(n) => write!(f, "{n}"),
            Expr::Decimal(d) => f.write_str(&format_decimal(*d)),
            Expr::Bool(b) => write!(f, "{b}"),
            Expr::Str(s) => write!(f, "\"{}\"", escape(s)),
            Expr::Null => f.write_str("null"),
            Expr::List(list) => self.write_list_bare(f, list),
            Expr::Range { start, second, end } => {
                f.write_str("[")?;
                self.write(f, start, LOWEST)?;
                if let Some(second) = second {
                    f.write_str(", ")?;
                    self.write(f, second, LOWEST)?;
                }
                f.write_str("..")?;
                if let Some(end) = end {
                    self.write(f, end, LOWEST)?;
                }
                f.write_str("]")
            },
            Expr::Call { function, argument } => {
                self.write(f, function, APPLICATION)?;
                f.write_str(" ")?;
                self.write(f, argument, ATOM)
            },
            Expr::Function(function) => f.write_str(&function.name),
            Expr::Lambda(lambda) => self.write_lambda(f, lambda),
            Expr::Closure { lambda, env } => Printer { env: env.as_ref() }.write_lambda(f, lambda),
            Expr::Argument(slot) => f.write_str(&slot.name),
            Expr::Partial { target, arguments } => {
                self.write(f, target, APPLICATION)?;
                for argument in arguments.iter() {
                    f.write_str(" ")?;
                    self.write(f, argument, ATOM)?;
                }
                Ok(())
            },
            Expr::Unary { op, operand } => {
                write!(f, "{op}")?;
                self.write(f, operand, ATOM)
            },
            Expr::Binary { op, left, right } => {
                self.write(f, left, op.left_precedence())?;
                write!(f, " {op} ")?;
                self.write(f, right, op.right_precedence())
            },
            Expr::LeftSection { op, left } => {
                f.write_str("(")?;
                self.write(f, left, op.left_precedence())?;
                write!(f, " {op})")
            },
            Expr::RightSection { op, right } => {
                write!(f, "({op} ")?;
                self.write(f, right, op.right_precedence())?;
                f.write_str(")")
            },
            Expr::If { condition,
                       then_branch,
                       else_branch, } => {
                f.write_str("if ")?;
                self.write(f, condition, LOWEST)?;
                f.write_str(" then ")?;
                self.write(f, then_branch, LOWEST)?;
                f.write_str(" else ")?;
                self.write(f, else_branch, LOWEST)
            },
            Expr::ParsedString(fragments) => {
                f.write_str("p\"")?;
                for fragment in fragments.iter() {
                    match fragment {
                        Fragment::Text(text) => f.write_str(&escape(text))?,
                        Fragment::Expr(expr) => {
                            let source = Embedded { printer: *self,
                                                    expr }.to_string();
                            write!(f, "${{{}}}", escape(&source))?;
                        },
                    }
                }
                f.write_str("\"")
            },
        }
    }

    fn write_lambda(&self, f: &mut fmt::Formatter<'_>, lambda: &Lambda) -> fmt::Result {
        write!(f, "\\{} -> ", lambda.parameters.join(" "))?;
        self.write(f, &lambda.body, LOWEST)
    }

    fn write_list(&self, f: &mut fmt::Formatter<'_>, list: &List, min: u8) -> fmt::Result {
        if list_precedence(list) < min {
            f.write_str("(")?;
            self.write_list_bare(f, list)?;
            f.write_str(")")
        } else {
            self.write_list_bare(f, list)
        }
    }

    fn write_list_bare(&self, f: &mut fmt::Formatter<'_>, list: &List) -> fmt::Result {
        match list {
            List::Items { items, env, .. } => {
                let printer = self.with_env(env);
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    printer.write(f, item, LOWEST)?;
                }
                f.write_str("]")
            },
            List::Range(range) => write_range(f, range),
            List::Prepend { head, tail } => {
                let op = BinaryOperator::Prepend;
                self.write(f, head, op.left_precedence())?;
                write!(f, " {op} ")?;
                self.write_list(f, tail, op.right_precedence())
            },
            List::Concat { first, second } => {
                let op = BinaryOperator::Concat;
                self.write_list(f, first, op.left_precedence())?;
                write!(f, " {op} ")?;
                self.write_list(f, second, op.right_precedence())
            },
            List::Mapped { function, source } => {
                f.write_str("map ")?;
                self.write(f, function, ATOM)?;
                f.write_str(" ")?;
                self.write_list(f, source, ATOM)
            },
            List::Filtered { predicate, source } => {
                f.write_str("filter ")?;
                self.write(f, predicate, ATOM)?;
                f.write_str(" ")?;
                self.write_list(f, source, ATOM)
            },
            List::Dropped { count, source } => {
                write!(f, "drop {count} ")?;
                self.write_list(f, source, ATOM)
            },
        }
    }
}

/// An expression embedded in an interpolated string, written on its own so
/// that its text can be escaped as part of the string literal.
struct Embedded<'p, 'e> {
    printer: Printer<'p>,
    expr:    &'e Expr,
}

impl fmt::Display for Embedded<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.printer.write(f, self.expr, LOWEST)
    }
}

/// Writes a range in literal form, listing the second element only when the
/// step is not 1.
fn write_range(f: &mut fmt::Formatter<'_>, range: &Range) -> fmt::Result {
    let start = range.start();
    write!(f, "[{}", start.into_expr())?;
    if range.step().compare(Number::Integer(1)) != Ordering::Equal
       && let Some(second) = start.checked_add(range.step())
    {
        write!(f, ", {}", second.into_expr())?;
    }
    f.write_str("..")?;
    if let Some(end) = range.end() {
        write!(f, "{}", end.into_expr())?;
    }
    f.write_str("]")
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Integer(i64::MIN) => ATOM,
        Expr::Integer(n) if *n < 0 => UNARY,
        Expr::Decimal(d) if d.is_sign_negative() && !d.is_zero() => UNARY,
        Expr::Call { .. } | Expr::Partial { .. } => APPLICATION,
        Expr::Lambda(_) | Expr::Closure { .. } | Expr::If { .. } => LOWEST,
        Expr::Unary { .. } => UNARY,
        Expr::Binary { op, .. } => op.precedence(),
        Expr::List(list) => list_precedence(list),
        _ => ATOM,
    }
}

fn list_precedence(list: &List) -> u8 {
    match list {
        List::Prepend { .. } | List::Concat { .. } => BinaryOperator::Concat.precedence(),
        List::Mapped { .. } | List::Filtered { .. } | List::Dropped { .. } => APPLICATION,
        List::Items { .. } | List::Range(_) => ATOM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Expr {
        Expr::Integer(n)
    }

    #[test]
    fn parenthesises_only_where_needed() {
        let sum = Expr::binary(BinaryOperator::Add, int(1), int(2));
        let product = Expr::binary(BinaryOperator::Mul, sum.clone(), int(3));
        assert_eq!(product.to_string(), "(1 + 2) * 3");

        let product = Expr::binary(BinaryOperator::Mul, int(2), int(3));
        let sum = Expr::binary(BinaryOperator::Add, int(1), product);
        assert_eq!(sum.to_string(), "1 + 2 * 3");
    }

    #[test]
    fn respects_associativity() {
        let left = Expr::binary(BinaryOperator::Sub, Expr::binary(BinaryOperator::Sub, int(1), int(2)), int(3));
        assert_eq!(left.to_string(), "1 - 2 - 3");

        let right = Expr::binary(BinaryOperator::Sub, int(1), Expr::binary(BinaryOperator::Sub, int(2), int(3)));
        assert_eq!(right.to_string(), "1 - (2 - 3)");

        let prepend = Expr::binary(BinaryOperator::Prepend,
                                   int(1),
                                   Expr::binary(BinaryOperator::Prepend, int(2), Expr::list(vec![])));
        assert_eq!(prepend.to_string(), "1 : 2 : []");
    }

    #[test]
    fn ranges() {
        let range = |start, step, end: Option<i64>| {
            Expr::List(List::Range(Range::new(Number::Integer(start), Number::Integer(step), end.map(Number::Integer))))
        };
        assert_eq!(range(1, 1, None).to_string(), "[1..]");
        assert_eq!(range(1, 2, Some(9)).to_string(), "[1, 3..9]");
        assert_eq!(range(5, -1, Some(1)).to_string(), "[5, 4..1]");
    }

    #[test]
    fn literals() {
        assert_eq!(Expr::string("a\"b").to_string(), r#""a\"b""#);
        assert_eq!(Expr::Decimal(rust_decimal::Decimal::from(6)).to_string(), "6.0");
        assert_eq!(Expr::list(vec![int(1), Expr::Null, Expr::Bool(true)]).to_string(), "[1, null, true]");
    }

    #[test]
    fn minimum_integer_is_written_as_an_expression() {
        assert_eq!(int(i64::MIN).to_string(), "(-9223372036854775807 - 1)");
        assert_eq!(Expr::list(vec![int(i64::MIN)]).to_string(), "[(-9223372036854775807 - 1)]");
    }

    #[test]
    fn embedded_expressions_are_escaped() {
        let fragments = vec![Fragment::Text("a ".to_string()), Fragment::Expr(Expr::string("b"))];
        assert_eq!(Expr::ParsedString(fragments.into()).to_string(), r#"p"a ${\"b\"}""#);
    }

    #[test]
    fn negative_operands() {
        let call = Expr::call(Expr::Argument(Rc::new(ArgumentSlot { depth: 1,
                                                                    index: 0,
                                                                    name:  "f".to_string(), })),
                              int(-1));
        assert_eq!(call.to_string(), "f (-1)");
    }
}
