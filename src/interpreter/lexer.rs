use std::str::FromStr;

use log::trace;
use logos::Logos;
use rust_decimal::Decimal;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Where patterns overlap, the longest match wins and fixed tokens win over
/// regular expressions of the same length, so `++` is never read as two `+`
/// and `then` is a keyword rather than an identifier.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum Token {
    /// Decimal literal tokens, such as `3.14`.
    #[regex(r"[0-9]+\.[0-9]+", parse_decimal)]
    Decimal(Decimal),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, `true` or `false` in any letter case.
    #[token("true", |_| true, ignore(ascii_case))]
    #[token("false", |_| false, ignore(ascii_case))]
    Bool(bool),
    /// `null`
    #[token("null")]
    Null,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// Identifier tokens; names such as `x`, `map` or `x'`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_']*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// A plain string literal, with its escapes already resolved.
    #[token("\"", lex_string)]
    Str(String),
    /// The body of an interpolated string literal `p"..."`, with its escapes
    /// already resolved. Interpolation markers are left in place.
    #[token("p\"", lex_string)]
    ParsedStr(String),
    /// `-- Comments.`
    #[regex(r"--[^\n]*", logos::skip)]
    Comment,
    /// `\`
    #[token("\\")]
    Backslash,
    /// `->`
    #[token("->")]
    Arrow,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `..`
    #[token("..")]
    DotDot,
    /// `$`
    #[token("$")]
    Dollar,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `:`
    #[token(":")]
    Colon,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `!`
    #[token("!")]
    Bang,

    /// Line breaks only move the line bookkeeping forward.
    #[token("\n", |lex| {
        lex.extras.line      += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, feeds and carriage returns.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// The ways raw input can fail to form a token.
///
/// These are produced inside the logos callbacks and turned into a
/// [`ParseError`] carrying the offending location by [`Lexer`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexError {
    /// No pattern matches the input.
    #[default]
    UnrecognizedCharacter,
    /// A string literal reaches the end of its line or of the input.
    UnterminatedString,
    /// A backslash is followed by a character that is not an escape.
    InvalidEscape(char),
    /// A numeric literal is out of range.
    MalformedNumber,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and where it begins for error reporting and
/// diagnostics. Advances as newlines are processed.
pub struct LexerExtras {
    /// The current line number, starting at 1.
    pub line:       usize,
    /// Byte offset at which the current line begins.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Where a token was found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Line number, starting at 1.
    pub line:      usize,
    /// Byte column within the line, starting at 1.
    pub column:    usize,
    /// The exact matched text.
    pub text:      String,
    /// Length of the matched text in bytes.
    pub length:    usize,
    /// The full text of the line the token starts on.
    pub line_text: String,
}

/// A token together with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token.
    pub token:    Token,
    /// Where it was found.
    pub location: Location,
}

/// A token stream with one token of lookahead.
///
/// The parser inspects the next token with [`Lexer::peek`], as often as it
/// likes, and consumes it with [`Lexer::advance`]. Tokens are produced lazily
/// and lexical errors are reported the first time the offending input is
/// peeked.
///
/// # Example
/// ```
/// use morgana::interpreter::lexer::{Lexer, Token};
///
/// let mut lexer = Lexer::new("f 42");
///
/// assert_eq!(lexer.peek().unwrap().map(|s| s.token.clone()),
///            Some(Token::Identifier("f".to_string())));
/// let spanned = lexer.advance().unwrap();
/// assert_eq!(spanned.location.column, 1);
///
/// let spanned = { lexer.peek().unwrap(); lexer.advance().unwrap() };
/// assert_eq!(spanned.token, Token::Integer(42));
/// assert_eq!(spanned.location.column, 3);
/// assert!(lexer.peek().unwrap().is_none());
/// ```
pub struct Lexer<'s> {
    source:  &'s str,
    inner:   logos::Lexer<'s, Token>,
    peeked:  Option<Spanned>,
    nesting: usize,
}

/// Maximum number of values the parser may be inside of at once.
pub const MAX_NESTING: usize = 128;

impl<'s> Lexer<'s> {
    /// Creates a lexer over `source`.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self { source,
               inner: Token::lexer(source),
               peeked: None,
               nesting: 0 }
    }

    /// The text being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'s str {
        self.source
    }

    /// Returns the next token without consuming it.
    ///
    /// Repeated calls return the same token until [`Lexer::advance`] is
    /// called. `None` marks the end of input.
    ///
    /// # Errors
    /// Returns a `ParseError` if the upcoming input does not form a valid
    /// token.
    pub fn peek(&mut self) -> ParseResult<Option<&Spanned>> {
        if self.peeked.is_none() {
            self.peeked = self.lex_next()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Returns a copy of the next token without consuming it.
    ///
    /// # Errors
    /// See [`Lexer::peek`].
    pub fn peek_token(&mut self) -> ParseResult<Option<Token>> {
        Ok(self.peek()?.map(|spanned| spanned.token.clone()))
    }

    /// Consumes the token returned by the last [`Lexer::peek`].
    ///
    /// # Errors
    /// Returns `ParseError::NothingPeeked` if no token is pending.
    pub fn advance(&mut self) -> ParseResult<Spanned> {
        self.peeked.take().ok_or(ParseError::NothingPeeked)
    }

    /// Consumes the next token, which must be `expected`.
    ///
    /// # Parameters
    /// - `expected`: The required token.
    /// - `description`: How the token is named in error messages.
    ///
    /// # Errors
    /// - `ExpectedToken` if another token follows.
    /// - `UnexpectedEndOfInput` if the input ends.
    pub fn expect(&mut self, expected: &Token, description: &'static str) -> ParseResult<Spanned> {
        match self.peek()? {
            Some(spanned) if spanned.token == *expected => self.advance(),
            Some(spanned) => Err(ParseError::ExpectedToken { expected: description,
                                                             location: spanned.location.clone(), }),
            None => Err(ParseError::UnexpectedEndOfInput { expected: description }),
        }
    }

    /// Records that the parser starts an expression nested inside the current one.
    ///
    /// Every call must be paired with [`Lexer::ascend`] once the value is
    /// parsed, whether or not parsing succeeded.
    ///
    /// # Errors
    /// `NestingTooDeep` at the upcoming token if [`MAX_NESTING`] expressions are
    /// already open; the nesting is left unchanged.
    pub fn descend(&mut self) -> ParseResult<()> {
        if self.nesting >= MAX_NESTING {
            if let Some(spanned) = self.peek()? {
                return Err(ParseError::NestingTooDeep { limit:    MAX_NESTING,
                                                        location: spanned.location.clone(), });
            }
            return Err(ParseError::UnexpectedEndOfInput { expected: "an expression" });
        }
        self.nesting += 1;
        Ok(())
    }

    /// Closes the expression opened by the last [`Lexer::descend`].
    pub const fn ascend(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    fn lex_next(&mut self) -> ParseResult<Option<Spanned>> {
        let Some(result) = self.inner.next() else {
            return Ok(None);
        };
        let location = self.location();
        match result {
            Ok(token) => {
                trace!("token {token:?} at {}:{}", location.line, location.column);
                Ok(Some(Spanned { token, location }))
            },
            Err(error) => Err(lex_error_to_parse_error(error, location)),
        }
    }

    fn location(&self) -> Location {
        let span = self.inner.span();
        let extras = &self.inner.extras;
        let rest = self.source.get(extras.line_start..).unwrap_or_default();
        let line_text = rest.split('\n').next().unwrap_or_default();
        let text = self.inner.slice();

        Location { line:      extras.line,
                   column:    span.start.saturating_sub(extras.line_start) + 1,
                   text:      text.to_string(),
                   length:    text.len(),
                   line_text: line_text.to_string(), }
    }
}

fn lex_error_to_parse_error(error: LexError, location: Location) -> ParseError {
    match error {
        LexError::UnrecognizedCharacter => {
            let character = location.text.chars().next().unwrap_or('\u{FFFD}');
            ParseError::UnrecognizedCharacter { character,
                                                code_point: u32::from(character),
                                                location }
        },
        LexError::UnterminatedString => ParseError::UnterminatedString { location },
        LexError::InvalidEscape(escape) => ParseError::InvalidEscape { escape, location },
        LexError::MalformedNumber => ParseError::MalformedNumber { location },
    }
}

/// Parses a decimal literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(Decimal)`: The parsed value.
/// - `Err(LexError::MalformedNumber)`: If the literal exceeds the decimal
///   range.
fn parse_decimal(lex: &logos::Lexer<Token>) -> Result<Decimal, LexError> {
    Decimal::from_str(lex.slice()).map_err(|_| LexError::MalformedNumber)
}

/// Parses an integer literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(i64)`: The parsed value.
/// - `Err(LexError::MalformedNumber)`: If the literal does not fit in 64 bits.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexError> {
    lex.slice().parse().map_err(|_| LexError::MalformedNumber)
}

/// Scans the body of a string literal after its opening quote.
///
/// Consumes input up to and including the closing quote and resolves the
/// escapes `\\`, `\"`, `\n` and `\r`. A string may not span lines.
///
/// # Returns
/// - `Ok(String)`: The unescaped contents.
/// - `Err(LexError::UnterminatedString)`: If a line break or the end of input
///   comes before the closing quote.
/// - `Err(LexError::InvalidEscape)`: If a backslash starts an unknown escape.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexError> {
    let remainder = lex.remainder();
    let mut contents = String::new();
    let mut chars = remainder.char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(offset + 1);
                return Ok(contents);
            },
            '\\' => {
                let Some((escape_offset, escape)) = chars.next() else {
                    lex.bump(remainder.len());
                    return Err(LexError::UnterminatedString);
                };
                let resolved = match escape {
                    '\\' => '\\',
                    '"' => '"',
                    'n' => '\n',
                    'r' => '\r',
                    '\n' => {
                        lex.bump(escape_offset);
                        return Err(LexError::UnterminatedString);
                    },
                    other => {
                        lex.bump(escape_offset + other.len_utf8());
                        return Err(LexError::InvalidEscape(other));
                    },
                };
                contents.push(resolved);
            },
            '\n' => {
                lex.bump(offset);
                return Err(LexError::UnterminatedString);
            },
            other => contents.push(other),
        }
    }

    lex.bump(remainder.len());
    Err(LexError::UnterminatedString)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|result| result.expect("valid token"))
                            .collect()
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(tokens("++ + <= < -> -"),
                   vec![Token::PlusPlus,
                        Token::Plus,
                        Token::LessEqual,
                        Token::Less,
                        Token::Arrow,
                        Token::Minus]);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(tokens("if iffy then x' TRUE null"),
                   vec![Token::If,
                        Token::Identifier("iffy".to_string()),
                        Token::Then,
                        Token::Identifier("x'".to_string()),
                        Token::Bool(true),
                        Token::Null]);
    }

    #[test]
    fn range_dots_are_not_a_decimal_point() {
        assert_eq!(tokens("[1..5]"),
                   vec![Token::LBracket,
                        Token::Integer(1),
                        Token::DotDot,
                        Token::Integer(5),
                        Token::RBracket]);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(tokens(r#""a\"b\\c\n" p"x $y""#),
                   vec![Token::Str("a\"b\\c\n".to_string()),
                        Token::ParsedStr("x $y".to_string())]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(tokens("1 -- one\n2"), vec![Token::Integer(1), Token::Integer(2)]);
    }

    #[test]
    fn advance_requires_a_peeked_token() {
        let mut lexer = Lexer::new("1 2");
        assert_eq!(lexer.advance().unwrap_err(), ParseError::NothingPeeked);

        lexer.peek().unwrap();
        assert_eq!(lexer.advance().unwrap().token, Token::Integer(1));
        assert_eq!(lexer.advance().unwrap_err(), ParseError::NothingPeeked);

        assert_eq!(lexer.peek_token().unwrap(), Some(Token::Integer(2)));
        assert_eq!(lexer.peek_token().unwrap(), Some(Token::Integer(2)));
        assert_eq!(lexer.advance().unwrap().token, Token::Integer(2));
        assert!(lexer.peek().unwrap().is_none());
    }

    #[test]
    fn nesting_is_bounded() {
        let mut lexer = Lexer::new("(");
        for _ in 0..MAX_NESTING {
            lexer.descend().unwrap();
        }
        assert!(matches!(lexer.descend(),
                         Err(ParseError::NestingTooDeep { limit: MAX_NESTING, .. })));

        lexer.ascend();
        assert!(lexer.descend().is_ok());
    }

    #[test]
    fn string_errors() {
        let mut lexer = Token::lexer("\"abc");
        assert_eq!(lexer.next(), Some(Err(LexError::UnterminatedString)));

        let mut lexer = Token::lexer(r#""a\qb""#);
        assert_eq!(lexer.next(), Some(Err(LexError::InvalidEscape('q'))));

        let mut lexer = Token::lexer("\"a\nb\"");
        assert_eq!(lexer.next(), Some(Err(LexError::UnterminatedString)));
    }
}
