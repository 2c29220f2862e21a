use std::rc::Rc;

use crate::ast::{ArgumentSlot, Expr};

/// The chain of activation records visible to an expression.
///
/// `None` is the top level, where no lambda is active.
pub type Env = Option<Rc<Frame>>;

/// One activation record, created fresh for every lambda invocation.
///
/// Frames are never mutated after creation, so a lambda may be invoked
/// recursively or from several lists at once without the calls observing each
/// other's arguments.
#[derive(Debug)]
pub struct Frame {
    depth:     usize,
    arguments: Vec<Expr>,
    parent:    Env,
}

impl Frame {
    /// Creates the activation record of a lambda at `depth`.
    ///
    /// # Parameters
    /// - `depth`: Lexical depth of the invoked lambda.
    /// - `arguments`: Evaluated arguments in parameter order.
    /// - `parent`: The environment the lambda was closed over.
    #[must_use]
    pub fn new(depth: usize, arguments: Vec<Expr>, parent: Env) -> Rc<Self> {
        Rc::new(Self { depth,
                       arguments,
                       parent })
    }

    /// Lexical depth of the lambda that owns this record.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Finds the value bound to `slot`, walking outward through parents.
    ///
    /// Returns `None` when no enclosing record belongs to the slot's lambda,
    /// which only happens when a lambda body is inspected outside of a call.
    #[must_use]
    pub fn lookup(&self, slot: &ArgumentSlot) -> Option<&Expr> {
        let mut frame = Some(self);
        while let Some(current) = frame {
            if current.depth == slot.depth {
                return current.arguments.get(slot.index);
            }
            if current.depth < slot.depth {
                return None;
            }
            frame = current.parent.as_deref();
        }
        None
    }
}
