use std::rc::Rc;

use crate::{
    ast::{Expr, Fragment},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Location},
        parser::core::{ParseResult, parse_program},
        scope::Scope,
    },
};

/// Splits the body of an interpolated string into fragments.
///
/// - `$name` embeds the value bound to `name`, where a name is made of
///   identifier characters.
/// - `${expr}` embeds an arbitrary expression. Braces inside the expression
///   must balance; braces inside string literals in it do not count.
/// - Any other `$` is literal text.
///
/// Embedded expressions are resolved in `scope`, so they can refer to the
/// parameters of an enclosing lambda.
///
/// # Parameters
/// - `body`: The string contents with escapes already resolved.
/// - `location`: Location of the whole literal, used for errors.
/// - `scope`: Scope used to resolve identifiers.
///
/// # Returns
/// An `Expr::ParsedString` node.
///
/// # Errors
/// - `UndefinedIdentifier` if a `$name` is not bound.
/// - `InvalidInterpolation` if a `${` is never closed or its contents do not
///   parse as one expression.
///
/// # Example
/// ```
/// use morgana::{evaluate, parse};
///
/// let expr = parse(r#"p"${1 + 2} is ${\"three\"}""#).unwrap();
/// assert_eq!(evaluate(&expr, &[]).unwrap().to_string(), r#""3 is three""#);
/// ```
pub fn parse_interpolated(body: &str, location: &Location, scope: &Rc<Scope>) -> ParseResult<Expr> {
    let mut fragments = Vec::new();
    let mut text = String::new();
    let mut rest = body;

    while let Some(position) = rest.find('$') {
        text.push_str(&rest[..position]);
        let after = &rest[position + 1..];

        if let Some(inner) = after.strip_prefix('{') {
            let Some(close) = find_closing_brace(inner) else {
                return Err(ParseError::InvalidInterpolation { reason:   "unclosed '${'".to_string(),
                                                              location: location.clone(), });
            };
            let expr = parse_embedded(&inner[..close], location, scope)?;
            flush(&mut fragments, &mut text);
            fragments.push(Fragment::Expr(expr));
            rest = &inner[close + 1..];
        } else if after.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            let length = after.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '\''))
                              .unwrap_or(after.len());
            let name = &after[..length];
            let expr = scope.lookup(name)
                            .ok_or_else(|| ParseError::UndefinedIdentifier { name:     name.to_string(),
                                                                             location: location.clone(), })?;
            flush(&mut fragments, &mut text);
            fragments.push(Fragment::Expr(expr));
            rest = &after[length..];
        } else {
            text.push('$');
            rest = after;
        }
    }

    text.push_str(rest);
    flush(&mut fragments, &mut text);

    Ok(Expr::ParsedString(fragments.into()))
}

fn flush(fragments: &mut Vec<Fragment>, text: &mut String) {
    if !text.is_empty() {
        fragments.push(Fragment::Text(std::mem::take(text)));
    }
}

fn parse_embedded(source: &str, location: &Location, scope: &Rc<Scope>) -> ParseResult<Expr> {
    let mut tokens = Lexer::new(source);
    parse_program(&mut tokens, scope).map_err(|error| ParseError::InvalidInterpolation { reason:   error.to_string(),
                                                                                        location: location.clone(), })
}

/// Finds the `}` closing an interpolation, skipping nested braces and string
/// literals.
///
/// # Returns
/// The byte offset of the closing brace in `source`, if there is one.
fn find_closing_brace(source: &str) -> Option<usize> {
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in source.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {},
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' if depth == 0 => return Some(offset),
            '}' => depth -= 1,
            _ => {},
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_brace_skips_nesting_and_strings() {
        assert_eq!(find_closing_brace("a}"), Some(1));
        assert_eq!(find_closing_brace("{}}"), Some(2));
        assert_eq!(find_closing_brace(r#""}" }"#), Some(4));
        assert_eq!(find_closing_brace("{"), None);
    }
}
