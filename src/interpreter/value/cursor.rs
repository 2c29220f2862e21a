use std::{
    cell::OnceCell,
    cmp::Ordering,
    rc::Rc,
};

use crate::{
    ast::Expr,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{frame::Env, list::List, number::Number},
    },
};

/// A single traversal over a list.
///
/// Each list variant provides its own cursor. Cursors are not shared: every
/// consumer asks the list for a fresh one, so traversing a list twice
/// produces the same elements twice.
pub trait Cursor {
    /// Produces the next element, or `None` once the traversal is over.
    ///
    /// # Errors
    /// Propagates evaluation errors raised while forcing an element.
    fn next(&mut self, context: &Context) -> EvalResult<Option<Expr>>;
}

impl List {
    /// Starts a new traversal of the list.
    #[must_use]
    pub fn cursor(&self) -> Box<dyn Cursor> {
        match self {
            Self::Items { items, env, forced } => Box::new(ItemsCursor { items:    Rc::clone(items),
                                                                         env:      env.clone(),
                                                                         forced:   Rc::clone(forced),
                                                                         position: 0, }),
            Self::Range(range) => Box::new(RangeCursor { current: Some(range.start()),
                                                         step:    range.step(),
                                                         end:     range.end(), }),
            Self::Prepend { head, tail } => {
                Box::new(PrependCursor { head: Some(Expr::clone(head)),
                                         tail: tail.cursor(), })
            },
            Self::Concat { first, second } => Box::new(ConcatCursor { first:      first.cursor(),
                                                                      second:     second.cursor(),
                                                                      first_done: false, }),
            Self::Mapped { function, source } => {
                Box::new(MappedCursor { function: Rc::clone(function),
                                        source:   source.cursor(), })
            },
            Self::Filtered { predicate, source } => {
                Box::new(FilteredCursor { predicate: Rc::clone(predicate),
                                          source:    source.cursor(), })
            },
            Self::Dropped { count, source } => Box::new(DroppedCursor { remaining: *count,
                                                                        source:    source.cursor(), }),
        }
    }
}

struct ItemsCursor {
    items:    Rc<[Expr]>,
    env:      Env,
    forced:   Rc<[OnceCell<Expr>]>,
    position: usize,
}

impl Cursor for ItemsCursor {
    fn next(&mut self, context: &Context) -> EvalResult<Option<Expr>> {
        let (Some(item), Some(slot)) = (self.items.get(self.position), self.forced.get(self.position)) else {
            return Ok(None);
        };
        self.position += 1;

        if let Some(value) = slot.get() {
            return Ok(Some(value.clone()));
        }
        let value = context.eval(item, self.env.as_ref())?;
        Ok(Some(slot.get_or_init(|| value).clone()))
    }
}

struct RangeCursor {
    current: Option<Number>,
    step:    Number,
    end:     Option<Number>,
}

impl Cursor for RangeCursor {
    fn next(&mut self, _context: &Context) -> EvalResult<Option<Expr>> {
        let Some(current) = self.current else {
            return Ok(None);
        };

        if let Some(end) = self.end
           && !self.step.is_zero()
        {
            let beyond = if self.step.is_negative() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
            if current.compare(end) == beyond {
                self.current = None;
                return Ok(None);
            }
        }

        // Overflow ends the progression.
        self.current = current.checked_add(self.step);
        Ok(Some(current.into_expr()))
    }
}

struct PrependCursor {
    head: Option<Expr>,
    tail: Box<dyn Cursor>,
}

impl Cursor for PrependCursor {
    fn next(&mut self, context: &Context) -> EvalResult<Option<Expr>> {
        match self.head.take() {
            Some(head) => Ok(Some(head)),
            None => self.tail.next(context),
        }
    }
}

struct ConcatCursor {
    first:      Box<dyn Cursor>,
    second:     Box<dyn Cursor>,
    first_done: bool,
}

impl Cursor for ConcatCursor {
    fn next(&mut self, context: &Context) -> EvalResult<Option<Expr>> {
        if !self.first_done {
            if let Some(item) = self.first.next(context)? {
                return Ok(Some(item));
            }
            self.first_done = true;
        }
        self.second.next(context)
    }
}

struct MappedCursor {
    function: Rc<Expr>,
    source:   Box<dyn Cursor>,
}

impl Cursor for MappedCursor {
    fn next(&mut self, context: &Context) -> EvalResult<Option<Expr>> {
        match self.source.next(context)? {
            Some(item) => context.apply(&self.function, item).map(Some),
            None => Ok(None),
        }
    }
}

struct FilteredCursor {
    predicate: Rc<Expr>,
    source:    Box<dyn Cursor>,
}

impl Cursor for FilteredCursor {
    fn next(&mut self, context: &Context) -> EvalResult<Option<Expr>> {
        while let Some(item) = self.source.next(context)? {
            context.check()?;
            if context.apply(&self.predicate, item.clone())?.as_bool()? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}

struct DroppedCursor {
    remaining: usize,
    source:    Box<dyn Cursor>,
}

impl Cursor for DroppedCursor {
    fn next(&mut self, context: &Context) -> EvalResult<Option<Expr>> {
        while self.remaining > 0 {
            context.check()?;
            self.remaining -= 1;
            if self.source.next(context)?.is_none() {
                self.remaining = 0;
                return Ok(None);
            }
        }
        self.source.next(context)
    }
}

/// A traversal bound to an evaluation context.
///
/// Adapts a [`Cursor`] to [`Iterator`], checking the context's cancellation
/// token before every step. The iterator stops after the first error.
pub struct ListIter<'c> {
    context:  &'c Context,
    cursor:   Box<dyn Cursor>,
    finished: bool,
}

impl<'c> ListIter<'c> {
    /// Starts traversing `list` under `context`.
    #[must_use]
    pub fn new(context: &'c Context, list: &List) -> Self {
        Self { context,
               cursor: list.cursor(),
               finished: false }
    }
}

impl Iterator for ListIter<'_> {
    type Item = EvalResult<Expr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let step = self.context
                       .check()
                       .and_then(|()| self.cursor.next(self.context));
        match step {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            },
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            },
        }
    }
}
