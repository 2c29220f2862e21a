use rust_decimal::Decimal;

/// Escapes a string so it can be written between double quotes.
///
/// Only the escapes the lexer understands are produced: `\\`, `\"`, `\n` and
/// `\r`.
///
/// ## Example
/// ```
/// use morgana::util::text::escape;
///
/// assert_eq!(escape("say \"hi\"\n"), r#"say \"hi\"\n"#);
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats a decimal so that it always reads back as a decimal.
///
/// The scale of the value is kept; whole values gain a `.0` suffix.
///
/// ## Example
/// ```
/// use morgana::util::text::format_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_decimal(Decimal::new(250, 2)), "2.50");
/// assert_eq!(format_decimal(Decimal::from(6)), "6.0");
/// ```
#[must_use]
pub fn format_decimal(value: Decimal) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Parses a boolean written the way people type it in chat.
///
/// Accepts `true`, `t`, `y`, `yes` and `false`, `f`, `n`, `no`, ignoring
/// case and surrounding whitespace.
///
/// ## Example
/// ```
/// use morgana::util::text::parse_bool;
///
/// assert_eq!(parse_bool("Yes"), Some(true));
/// assert_eq!(parse_bool("f"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "y" | "yes" => Some(true),
        "false" | "f" | "n" | "no" => Some(false),
        _ => None,
    }
}
