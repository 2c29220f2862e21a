use crate::{
    ast::Expr,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{join, map, sum, take},
        },
        scope::Scope,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context and a slice of evaluated
/// arguments, exactly as many as its arity.
type BuiltinFn = fn(&Context, &[Expr]) -> EvalResult<Expr>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the number of arguments it takes,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for registration),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "map"    => { arity: 2, func: map::map },
    "filter" => { arity: 2, func: map::filter },
    "sum"    => { arity: 1, func: sum::sum },
    "length" => { arity: 1, func: sum::length },
    "take"   => { arity: 2, func: take::take },
    "drop"   => { arity: 2, func: take::drop },
    "head"   => { arity: 1, func: take::head },
    "tail"   => { arity: 1, func: take::tail },
    "join"   => { arity: 2, func: join::join },
}

/// Registers every builtin into the global scope of `scope`.
///
/// Called once per global scope; there is no process-wide table of bound
/// functions, so scopes never observe each other's registrations.
pub fn register_builtins(scope: &Scope) {
    for builtin in BUILTIN_TABLE {
        scope.register_function(builtin.name, builtin.arity, builtin.func);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_is_registered() {
        let scope = Scope::new_global();
        register_builtins(&scope);
        for name in BUILTIN_FUNCTIONS {
            assert!(matches!(scope.lookup(name), Some(Expr::Function(_))), "{name} missing");
        }
    }
}
