/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree, applies functions by currying, performs
/// arithmetic, comparison and list operations, and observes the cancellation
/// token at every step. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates expressions to values, creating a fresh activation record for
///   every lambda call.
/// - Provides the standard library of built-in functions.
/// - Reports runtime errors such as type mismatches or cancellation.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   location.
/// - Handles numeric and string literals, identifiers, operators, and
///   comments.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the structure of an expression. Identifiers are
/// resolved against a [`scope::Scope`] as they are read.
///
/// # Responsibilities
/// - Converts tokens into expression nodes by precedence climbing.
/// - Handles application by juxtaposition, sections, lambdas and ranges.
/// - Validates the grammar, reporting errors with location info.
pub mod parser;
/// Lexical scopes for name resolution.
///
/// A chain of scopes maps identifiers to expressions; the root holds the
/// built-in functions and anything the embedding application registers.
pub mod scope;
/// The value module defines the runtime data types for evaluation.
///
/// Values are expressions; this module holds what evaluation needs on top of
/// them: lazy lists and their cursors, activation records for lambda calls,
/// numeric promotion, and casts.
///
/// # Responsibilities
/// - Defines list variants and the traversal of each.
/// - Implements casts used wherever a context demands a type.
/// - Provides promotion between integers and decimals.
pub mod value;
