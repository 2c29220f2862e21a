use std::{cell::OnceCell, rc::Rc};

use crate::{
    ast::Expr,
    interpreter::value::{frame::Env, number::Number},
};

/// A list value.
///
/// Lists never change after construction. Prepending, concatenating,
/// mapping, filtering and dropping build new views that share the original
/// lists, and the elements of a view are only produced when a traversal asks
/// for them. See [`crate::interpreter::value::cursor`] for traversal.
#[derive(Debug, Clone)]
pub enum List {
    /// A finite list of element expressions.
    ///
    /// An element is evaluated, in `env` when it refers to lambda arguments,
    /// the first time any traversal reaches it. Clones of the list share the
    /// results, so each element is evaluated at most once per list value.
    Items {
        /// The element expressions.
        items:  Rc<[Expr]>,
        /// The environment the list literal was evaluated in.
        env:    Env,
        /// The elements forced so far, by position.
        forced: Rc<[OnceCell<Expr>]>,
    },
    /// An arithmetic progression.
    Range(Range),
    /// `head : tail`.
    Prepend {
        /// The evaluated first element.
        head: Rc<Expr>,
        /// The remaining elements.
        tail: Rc<Self>,
    },
    /// `first ++ second`.
    Concat {
        /// Elements produced first.
        first:  Rc<Self>,
        /// Elements produced once `first` is exhausted.
        second: Rc<Self>,
    },
    /// The elements of `source` with `function` applied to each.
    Mapped {
        /// The function to apply.
        function: Rc<Expr>,
        /// The list being mapped.
        source:   Rc<Self>,
    },
    /// The elements of `source` for which `predicate` holds.
    Filtered {
        /// The predicate, cast to boolean for each element.
        predicate: Rc<Expr>,
        /// The list being filtered.
        source:    Rc<Self>,
    },
    /// `source` without its first `count` elements.
    Dropped {
        /// Number of leading elements skipped.
        count:  usize,
        /// The list being dropped from.
        source: Rc<Self>,
    },
}

impl List {
    /// A finite list of values that need no environment.
    #[must_use]
    pub fn items(items: Vec<Expr>) -> Self {
        Self::literal(items.into(), None)
    }

    /// A finite list of element expressions evaluated in `env`, none of
    /// which has been forced yet.
    #[must_use]
    pub fn literal(items: Rc<[Expr]>, env: Env) -> Self {
        let forced = items.iter().map(|_| OnceCell::new()).collect();
        Self::Items { items,
                      env,
                      forced }
    }

    /// The empty list.
    #[must_use]
    pub fn empty() -> Self {
        Self::items(Vec::new())
    }

    /// Whether a traversal of the list never ends.
    ///
    /// This is a structural property: it is derived from range bounds and the
    /// shape of the views, never by running a traversal. Eager operations such
    /// as `sum` and `join` consult it to fail fast.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        match self {
            Self::Items { .. } => false,
            Self::Range(range) => range.is_infinite(),
            Self::Prepend { tail, .. } => tail.is_infinite(),
            Self::Concat { first, second } => first.is_infinite() || second.is_infinite(),
            Self::Mapped { source, .. }
            | Self::Filtered { source, .. }
            | Self::Dropped { source, .. } => source.is_infinite(),
        }
    }
}

/// An arithmetic progression `start, start + step, ...` up to an optional
/// inclusive end.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    start: Number,
    step:  Number,
    end:   Option<Number>,
}

impl Range {
    /// Creates a range, promoting every bound to decimal if any of them is.
    ///
    /// # Parameters
    /// - `start`: The first element.
    /// - `step`: The difference between consecutive elements.
    /// - `end`: The optional inclusive bound.
    #[must_use]
    pub fn new(start: Number, step: Number, end: Option<Number>) -> Self {
        let decimal = start.is_decimal() || step.is_decimal() || end.is_some_and(Number::is_decimal);
        let promote = |n: Number| {
            if decimal {
                Number::Decimal(n.to_decimal())
            } else {
                n
            }
        };
        Self { start: promote(start),
               step:  promote(step),
               end:   end.map(promote), }
    }

    /// The first element.
    #[must_use]
    pub const fn start(&self) -> Number {
        self.start
    }

    /// The difference between consecutive elements.
    #[must_use]
    pub const fn step(&self) -> Number {
        self.step
    }

    /// The inclusive end, if any.
    #[must_use]
    pub const fn end(&self) -> Option<Number> {
        self.end
    }

    /// An open range, or one that never advances, is infinite.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.end.is_none() || self.step.is_zero()
    }
}
