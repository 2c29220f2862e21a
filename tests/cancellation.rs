use std::{
    thread,
    time::{Duration, Instant},
};

use morgana::{
    error::{Error, RuntimeError},
    evaluate_with_deadline,
    interpreter::evaluator::{cancel::CancellationToken, core::Context},
    parse,
};

#[test]
fn cancelled_token_stops_evaluation_before_it_starts() {
    let token = CancellationToken::new();
    token.cancel();

    let context = Context::with_token(token);
    let expr = parse("sum (take 3 [1..])").unwrap();
    assert_eq!(context.eval(&expr, None).unwrap_err(), RuntimeError::Cancelled);
}

#[test]
fn cancellation_wins_over_domain_errors() {
    let token = CancellationToken::new();
    token.cancel();

    let context = Context::with_token(token);
    let expr = parse(r"sum(map(\x -> x, [1..]))").unwrap();
    assert!(context.eval(&expr, None).unwrap_err().is_cancelled());
}

#[test]
fn deadline_interrupts_a_search_that_never_ends() {
    let started = Instant::now();
    let error = evaluate_with_deadline(r"head (filter (\x -> x < 0) [1..])",
                                       Duration::from_millis(100)).unwrap_err();

    assert!(error.is_timeout(), "expected a timeout, got {error:?}");
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn summing_an_infinite_list_fails_without_waiting_for_the_deadline() {
    let started = Instant::now();
    let error = evaluate_with_deadline("sum [1..]", Duration::from_secs(30)).unwrap_err();

    assert!(matches!(error, Error::Runtime(RuntimeError::InfiniteList { function: "sum" })));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn runaway_recursion_fails_without_waiting_for_the_deadline() {
    let started = Instant::now();
    let error = evaluate_with_deadline(r"(\f -> f f) (\f -> f f)", Duration::from_secs(30)).unwrap_err();

    assert!(matches!(error, Error::Runtime(RuntimeError::RecursionLimit { .. })));
    assert!(!error.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn fast_requests_finish_before_their_deadline() {
    let result = evaluate_with_deadline("take 3 $ map (* 2) [1..]", Duration::from_secs(30)).unwrap();
    assert_eq!(result, "[2, 4, 6]");
}

#[test]
fn token_can_be_cancelled_from_another_thread() {
    let token = CancellationToken::new();
    let remote = token.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        remote.cancel();
    });

    let context = Context::with_token(token);
    let expr = parse(r"length (filter (\x -> x < 0) [1..1000000000000])").unwrap();
    let result = context.eval(&expr, None);
    canceller.join().unwrap();

    assert_eq!(result.unwrap_err(), RuntimeError::Cancelled);
}
