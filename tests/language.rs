use std::{cell::Cell, fs, rc::Rc};

use morgana::{
    EvalOptions,
    ast::Expr,
    error::{Error, ParseError, RuntimeError},
    evaluate, get_result,
    interpreter::{
        evaluator::core::{Context, MAX_DEPTH},
        lexer::MAX_NESTING,
        scope::Scope,
    },
    parse, parse_with,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, (code, expected)) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            match get_result(&code, &EvalOptions::default()) {
                Ok(result) => {
                    if let Some(expected) = expected {
                        assert_eq!(result,
                                   expected,
                                   "DSL example {} in {:?} gave the wrong result:\n{}",
                                   i + 1,
                                   path,
                                   code);
                    }
                },
                Err(e) => panic!("DSL example {} in {:?} failed:\n{}\nError: {:?}",
                                 i + 1,
                                 path,
                                 code,
                                 e),
            }
        }
    }

    assert!(count > 0, "No DSL examples found in book/src");
}

/// Collects the `morgana` code blocks of a markdown file, each with the
/// result announced by a `-- => result` comment, if it has one.
fn extract_dsl_blocks(content: &str) -> Vec<(String, Option<String>)> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();
    let mut expected = None;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```morgana") {
            inside = true;
            buf.clear();
            expected = None;
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push((buf.clone(), expected.take()));
            continue;
        }
        if inside {
            if let Some(result) = trimmed.strip_prefix("-- => ") {
                expected = Some(result.to_string());
            }
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn result(src: &str) -> Result<String, Error> {
    get_result(src, &EvalOptions::default())
}

fn assert_evaluates(src: &str, expected: &str) {
    match result(src) {
        Ok(value) => assert_eq!(value, expected, "wrong result for {src}"),
        Err(e) => panic!("Script failed: {src}\n{e}"),
    }
}

fn assert_failure(src: &str) {
    if let Ok(value) = result(src) {
        panic!("Script {src} succeeded with {value} but was expected to fail")
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match result(src) {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error from {src}, got {other:?}"),
    }
}

fn parse_error(src: &str) -> ParseError {
    match parse(src) {
        Err(e) => e,
        Ok(expr) => panic!("expected {src} not to parse, got {expr}"),
    }
}

#[test]
fn integer_literals_print_as_written() {
    for literal in ["0", "7", "42", "1000000", "9223372036854775807"] {
        assert_eq!(parse(literal).unwrap().to_string(), literal);
    }
}

#[test]
fn printed_values_parse_back_to_the_same_value() {
    for src in ["42",
                "2.50",
                "true",
                "null",
                r#""quote \" and \\ and \n""#,
                "[1, 2.5, \"a\", false, null]",
                "[[1, 2], [], [3]]",
                "take 3 [1, 3..]",
                "[5, 4..1]",
                "-9223372036854775807 - 1",
                "[9223372036854775807 + 1, -5]"]
    {
        let first = result(src).unwrap();
        let second = result(&first).unwrap();
        assert_eq!(first, second, "round trip of {src}");
    }
}

#[test]
fn printed_expressions_parse_back_to_themselves() {
    for src in [r"\x -> x * (x + 1)",
                "map (+ 1) [1, 2]",
                "1 - (2 - 3)",
                "1 - 2 - 3",
                "1 : 2 : []",
                "([1] ++ [2]) ++ [3]",
                "if true then 1 else 2",
                r#"p"a ${1 + 2} b""#,
                "[1, 3..]",
                "[1..10]",
                "(3 -)",
                "(* 2)",
                "-(head [1])",
                "sum $ take 3 [1..]",
                "take(2, [1..])",
                r"(\x y -> x + y) 1"]
    {
        let printed = parse(src).unwrap().to_string();
        let reprinted = parse(&printed).unwrap().to_string();
        assert_eq!(printed, reprinted, "round trip of {src}");
    }

    assert_eq!(parse("take(2, [1..])").unwrap().to_string(), "take 2 [1..]");
    assert_eq!(parse("(1 + 2) * 3").unwrap().to_string(), "(1 + 2) * 3");
}

#[test]
fn arithmetic_and_promotion() {
    assert_evaluates("1 + 1", "2");
    assert_evaluates("1 + 1.5", "2.5");
    assert_evaluates(r#""a" + "b""#, r#""ab""#);
    assert_evaluates("7 / 2", "3");
    assert_evaluates("-7 % 3", "-1");
    assert_evaluates("7.0 / 2", "3.5");
    assert_evaluates("0.5 + 0.25", "0.75");

    assert_failure("1 + true");
    assert!(matches!(runtime_error("1 + true"), RuntimeError::TypeMismatch { operator: "+", .. }));
    assert_eq!(runtime_error("1 / 0"), RuntimeError::DivisionByZero);
    assert_eq!(runtime_error("1.5 % 0"), RuntimeError::DivisionByZero);
}

#[test]
fn operator_precedence() {
    assert_evaluates("1 + 2 * 3", "7");
    assert_evaluates("(1 + 2) * 3", "9");
    assert_evaluates("10 - 4 - 3", "3");
    assert_evaluates("1 : 2 : []", "[1, 2]");
    assert_evaluates("1 < 2 && 2 < 3 || false", "true");
    assert_evaluates("head [5] - 1", "4");
}

#[test]
fn unary_operators() {
    assert_evaluates("-3 + 5", "2");
    assert_evaluates("- -3", "3");
    assert_evaluates("!true", "false");
    assert_evaluates("!(1 > 2)", "true");
    assert!(matches!(runtime_error(r#"-"a""#), RuntimeError::InvalidOperand { .. }));
}

#[test]
fn null_equality() {
    assert_evaluates("null == null", "true");
    assert_evaluates("null == 1", "false");
    assert_evaluates("1 == null", "false");
    assert_evaluates("null != []", "true");
}

#[test]
fn comparisons() {
    assert_evaluates("1 == 1.0", "true");
    assert_evaluates(r#""a" == "a""#, "true");
    assert_evaluates(r#""a" != "b""#, "true");
    assert_evaluates("2 > 1.5", "true");
    assert_evaluates("2 <= 2", "true");

    assert!(matches!(runtime_error("[1] == [1]"), RuntimeError::TypeMismatch { operator: "==", .. }));
    assert!(matches!(runtime_error(r#""a" < "b""#), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("true == 1"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn logical_operators_short_circuit() {
    assert_evaluates("false && 1 / 0 == 1", "false");
    assert_evaluates("true || head []", "true");
    assert_evaluates(r#""yes" && "n""#, "false");
    assert!(matches!(runtime_error("1 && true"), RuntimeError::InvalidCast { target: "boolean", .. }));
}

#[test]
fn conditionals() {
    assert_evaluates(r#"if 1 < 2 then "yes" else "no""#, r#""yes""#);
    assert_evaluates(r#"if "Y" then 1 else 2"#, "1");
    assert_evaluates("if false then 1 else 2 + 3", "5");
    assert!(matches!(runtime_error("if 1 then 1 else 2"), RuntimeError::InvalidCast { .. }));
}

#[test]
fn infinite_lists_are_lazy() {
    assert_evaluates("take(5, [1..])", "[1, 2, 3, 4, 5]");
    assert_evaluates("take 3 $ map (* 2) [1..]", "[2, 4, 6]");
    assert_evaluates("take 3 ([1] ++ [5..])", "[1, 5, 6]");
    assert_evaluates("take 3 (drop 5 [1..])", "[6, 7, 8]");
    assert_evaluates("head (filter (> 100) [1, 3..])", "101");
    assert_evaluates("take 2 (tail [0..])", "[1, 2]");
    assert_evaluates("take 4 [0, 0..]", "[0, 0, 0, 0]");
}

#[test]
fn infinite_lists_print_structurally() {
    assert_evaluates("[1..]", "[1..]");
    assert_evaluates("[0, 5..]", "[0, 5..]");
    assert_evaluates("map (+ 1) [1..]", "map (+ 1) [1..]");
    assert_evaluates("0 : [1..]", "0 : [1..]");
}

#[test]
fn eager_functions_reject_infinite_lists() {
    assert_eq!(runtime_error("sum([1..])"), RuntimeError::InfiniteList { function: "sum" });
    assert_eq!(runtime_error(r#"join(",", 0 : [1..])"#),
               RuntimeError::InfiniteList { function: "join" });
    assert_eq!(runtime_error("length (map (+ 1) [1..])"),
               RuntimeError::InfiniteList { function: "length" });
}

#[test]
fn ranges() {
    assert_evaluates("[1..5]", "[1, 2, 3, 4, 5]");
    assert_evaluates("[1, 3..9]", "[1, 3, 5, 7, 9]");
    assert_evaluates("[1, 3..8]", "[1, 3, 5, 7]");
    assert_evaluates("[5..1]", "[]");
    assert_evaluates("[5, 4..1]", "[5, 4, 3, 2, 1]");
    assert_evaluates("[1.0, 1.5..3]", "[1.0, 1.5, 2.0, 2.5, 3.0]");
    assert_evaluates("[2 * 2..3 + 3]", "[4, 5, 6]");
    assert!(matches!(runtime_error(r#"["a"..]"#), RuntimeError::InvalidCast { target: "number", .. }));
}

#[test]
fn builtins() {
    assert_evaluates("sum [1, 2, 3]", "6.0");
    assert_evaluates("sum [1.5, 2]", "3.5");
    assert_evaluates("sum []", "0.0");
    assert_evaluates(r#"join(",", [1, 2, 3])"#, r#""1,2,3""#);
    assert_evaluates(r#"join(",", [])"#, r#""""#);
    assert_evaluates(r#"join("-", ["a", null, 1.5, [1]])"#, r#""a--1.5-[1]""#);
    assert_evaluates("take 10 [1, 2]", "[1, 2]");
    assert_evaluates("take (-1) [1, 2]", "[]");
    assert_evaluates("length [1, 2, 3]", "3");
    assert_evaluates("head [7, 8]", "7");
    assert_evaluates("tail [1, 2, 3]", "[2, 3]");
    assert_evaluates("drop 2 [1, 2, 3]", "[3]");
    assert_evaluates(r"filter (\x -> x % 2 == 0) [1..6]", "[2, 4, 6]");

    assert_eq!(runtime_error("head []"), RuntimeError::EmptyResult { function: "head" });
    assert_eq!(runtime_error("tail []"), RuntimeError::EmptyResult { function: "tail" });
    assert!(matches!(runtime_error("join(1, [])"), RuntimeError::InvalidCast { target: "string", .. }));
    assert!(matches!(runtime_error(r#"sum ["a"]"#), RuntimeError::InvalidCast { .. }));
    assert!(matches!(runtime_error("take 1.5 [1]"), RuntimeError::InvalidCast { .. }));
}

#[test]
fn sections() {
    assert_evaluates("map((+ 1), [1, 2, 3])", "[2, 3, 4]");
    assert_evaluates("map (2 *) [1, 2]", "[2, 4]");
    assert_evaluates("(3 -) 1", "2");
    assert_evaluates("(/ 2) 10", "5");
    assert_evaluates("(: []) 1", "[1]");
    assert_evaluates("(- 1)", "-1");
    assert_evaluates("(- 1 + 3)", "2");
}

#[test]
fn application() {
    assert_evaluates("take 2 [7, 8, 9]", "[7, 8]");
    assert_evaluates("take(2, [7, 8, 9])", "[7, 8]");
    assert_evaluates("(take 2) [7, 8, 9]", "[7, 8]");
    assert_evaluates("take 2 $ drop 1 $ [7, 8, 9]", "[8, 9]");
    assert_evaluates("take 2", "take 2");

    assert!(matches!(runtime_error("1 2"), RuntimeError::NotCallable { .. }));
    assert!(matches!(parse_error("(1, 2)"), ParseError::UnexpectedToken { .. }));
    assert_failure("f 1");
}

#[test]
fn lambdas_and_closures() {
    let increment = parse(r"\x -> x + 1").unwrap();
    assert_eq!(evaluate(&increment, &[Expr::Integer(4)]).unwrap().to_string(), "5");

    let unapplied = evaluate(&increment, &[]).unwrap();
    assert!(matches!(unapplied, Expr::Closure { .. }));
    assert_eq!(unapplied.to_string(), r"\x -> x + 1");

    assert_evaluates(r"(\x y -> x - y) 10 3", "7");
    assert_evaluates(r"(\x -> \y -> x - y) 10 3", "7");
    assert_evaluates(r"(\x -> \y -> x + y) 1", r"\y -> 1 + y");
    assert_evaluates(r"(\x y -> x + y) 1", r"(\x y -> x + y) 1");
    assert_evaluates(r"(\x -> [x, x * 2]) 3", "[3, 6]");
    assert_evaluates(r"map (\x -> map (\y -> x * y) [1, 2]) [1, 2]", "[[1, 2], [2, 4]]");
    assert_evaluates(r"(\f -> map f [1, 2] ++ map f [3]) (\x -> x * 10)", "[10, 20, 30]");
    assert_evaluates(r"(\x -> x) (\x -> x) 5", "5");
    assert_evaluates(r"(\x' -> x' : []) null", "[null]");
}

#[test]
fn string_interpolation() {
    assert_evaluates(r#"(\name -> p"hello $name!") "bob""#, r#""hello bob!""#);
    assert_evaluates(r#"p"sum: ${sum [1, 2]}""#, r#""sum: 3.0""#);
    assert_evaluates(r#"p"cost: $5 and ${null}""#, r#""cost: $5 and ""#);
    assert_evaluates(r#"p"${[1, 2]} ${\"quoted\"}""#, r#""[1, 2] quoted""#);
    assert_evaluates(r#"p"$$""#, r#""$$""#);

    assert!(matches!(parse_error(r#"p"${1""#), ParseError::InvalidInterpolation { .. }));
    assert!(matches!(parse_error(r#"p"${)}""#), ParseError::InvalidInterpolation { .. }));
    assert!(matches!(parse_error(r#"p"$nobody""#), ParseError::UndefinedIdentifier { .. }));
}

#[test]
fn undefined_identifiers_are_rejected_when_parsing() {
    match parse_error("undefined_name + 1") {
        ParseError::UndefinedIdentifier { name, location } => {
            assert_eq!(name, "undefined_name");
            assert_eq!(location.column, 1);
        },
        other => panic!("unexpected error {other:?}"),
    }
    assert!(matches!(result(r"\x -> y"), Err(Error::Parse(ParseError::UndefinedIdentifier { .. }))));
}

#[test]
fn parameters_go_out_of_scope() {
    assert!(matches!(parse_error(r"(\x -> x) x"), ParseError::UndefinedIdentifier { .. }));
}

#[test]
fn parse_errors() {
    assert!(matches!(parse_error(""), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("-- only a comment"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("1 )"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("[1, 2, 3..5]"), ParseError::TooManyRangeValues { count: 3, .. }));
    assert!(matches!(parse_error(r#""abc"#), ParseError::UnterminatedString { .. }));
    assert!(matches!(parse_error(r#""a\tb""#), ParseError::InvalidEscape { escape: 't', .. }));
    assert!(matches!(parse_error("1 # 2"),
                     ParseError::UnrecognizedCharacter { character: '#',
                                                         code_point: 0x23,
                                                         .. }));
    assert!(matches!(parse_error("99999999999999999999"), ParseError::MalformedNumber { .. }));
    assert!(matches!(parse_error(r"\ -> 1"), ParseError::ExpectedToken { .. }));
    assert!(matches!(parse_error("if true then 1"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("[1, 2"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("(+)"), ParseError::ExpectedToken { .. }));
}

#[test]
fn pretty_errors_point_at_the_token() {
    let error = parse_error("  1 +\n    oops");
    assert_eq!(error.pretty(),
               "Error on line 2: Undefined identifier 'oops'.\n    oops\n    ^^^^");

    let error = parse_error("[1, 2 # 3]");
    assert_eq!(error.location().map(|l| l.column), Some(7));
    assert_eq!(error.pretty(),
               "Error on line 1: Unrecognized character '#' (U+0023).\n    [1, 2 # 3]\n          ^");

    assert_eq!(parse_error("").pretty(), "Unexpected end of input, expected an expression.");
}

#[test]
fn registered_functions() {
    let scope = Scope::with_builtins();
    scope.register_function("greet", 1, |context, args| {
             Ok(Expr::string(&format!("hi {}", context.display_string(&args[0])?)))
         });
    scope.register_function("answer", 0, |_, _| Ok(Expr::Integer(42)));

    let expr = parse_with("map greet [\"ann\", \"bo\"]", &scope).unwrap();
    let context = Context::new();
    let value = context.eval(&expr, None).unwrap();
    assert_eq!(context.render(&value).unwrap(), r#"["hi ann", "hi bo"]"#);

    let expr = parse_with("answer + 1", &scope).unwrap();
    assert_eq!(evaluate(&expr, &[]).unwrap().to_string(), "43");

    assert!(parse("greet 1").is_err());
}

#[test]
fn list_elements_are_forced_once_per_evaluation() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let scope = Scope::with_builtins();
    scope.register_function("tick", 0, move |_, _| {
             counter.set(counter.get() + 1);
             Ok(Expr::Integer(counter.get()))
         });

    let expr = parse_with(r"(\xs -> [sum xs, length xs, sum xs]) [tick, tick]", &scope).unwrap();
    let context = Context::new();
    let value = context.eval(&expr, None).unwrap();
    assert_eq!(context.render(&value).unwrap(), "[3.0, 2, 3.0]");
    assert_eq!(calls.get(), 2);

    let value = context.eval(&expr, None).unwrap();
    assert_eq!(context.render(&value).unwrap(), "[7.0, 2, 7.0]");
    assert_eq!(calls.get(), 4);
}

#[test]
fn sections_need_parentheses() {
    assert_evaluates("(1 + 2 -) 1", "2");
    assert_evaluates("map (1 :) [[], [2]]", "[[1], [1, 2]]");

    assert!(matches!(parse_error("1 +"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("(1 + 2 *)"), ParseError::ExpectedToken { .. }));
    assert!(matches!(parse_error("[1 +]"), ParseError::ExpectedToken { .. }));
    assert!(matches!(parse_error(r#"p"${1 +}""#), ParseError::InvalidInterpolation { .. }));
}

#[test]
fn runaway_recursion_is_an_error() {
    assert_eq!(runtime_error(r"(\f -> f f) (\f -> f f)"),
               RuntimeError::RecursionLimit { limit: MAX_DEPTH });
    assert_eq!(runtime_error(r"(\f -> f f 1) (\f x -> x + f f x)"),
               RuntimeError::RecursionLimit { limit: MAX_DEPTH });
}

#[test]
fn deeply_nested_input_is_rejected() {
    let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(matches!(parse_error(&parens),
                     ParseError::NestingTooDeep { limit: MAX_NESTING, .. }));

    let lists = format!("{}{}", "[".repeat(100_000), "]".repeat(100_000));
    assert!(matches!(parse_error(&lists), ParseError::NestingTooDeep { .. }));

    let negations = format!("{}true", "!".repeat(100_000));
    assert!(matches!(parse_error(&negations), ParseError::NestingTooDeep { .. }));

    let prepends = format!("{}[]", "1 : ".repeat(100_000));
    assert!(matches!(parse_error(&prepends), ParseError::NestingTooDeep { .. }));

    assert_evaluates(&format!("{}1{}", "(".repeat(50), ")".repeat(50)), "1");
    assert_evaluates(&format!("{}{}", "[".repeat(20), "]".repeat(20)),
                     &format!("{}{}", "[".repeat(20), "]".repeat(20)));
}

#[test]
fn test_script_file() {
    let script = fs::read_to_string("tests/example.mg").expect("missing file");
    assert_evaluates(&script, r#""even squares: 4, 16, 36, 64""#);
}
