use keygate::gate::{AttemptPolicy, GateController, GateOutcome, GatePolicy, GateState};

fn gate(attempts: u32) -> GateController {
    GateController::new(GatePolicy::new("lmnop"), GateState::new(attempts))
}

fn exact_gate(attempts: u32) -> GateController {
    GateController::new(
        GatePolicy::new("lmnop").with_attempt_policy(AttemptPolicy::Exact),
        GateState::new(attempts),
    )
}

/// Feed a whole line and return the outcome of its last byte.
fn line(gate: &mut GateController, bytes: &[u8]) -> GateOutcome {
    let mut outcome = GateOutcome::Continue;
    for &byte in bytes {
        outcome = gate.on_character(byte);
    }
    outcome
}

#[test]
fn wrong_line_then_secret_grants() {
    let mut gate = gate(3);
    assert_eq!(line(&mut gate, b"abc\n"), GateOutcome::Continue);
    assert_eq!(gate.attempts_left(), Some(2));
    assert_eq!(line(&mut gate, b"lmnop\n"), GateOutcome::Grant);
}

#[test]
fn fourth_wrong_line_denies_with_three_attempts() {
    // Compatible policy: the zero check runs before the decrement, so three
    // configured attempts accept four wrong guesses and the fourth denies.
    let mut gate = gate(3);
    for (guess, left) in [(b"x\n", 2), (b"y\n", 1), (b"z\n", 0)] {
        assert_eq!(line(&mut gate, guess), GateOutcome::Continue);
        assert_eq!(gate.attempts_left(), Some(left));
    }
    assert_eq!(line(&mut gate, b"w\n"), GateOutcome::Deny);
    assert!(gate.is_terminal());
}

#[test]
fn secret_still_grants_when_counter_is_zero() {
    let mut gate = gate(3);
    line(&mut gate, b"x\ny\nz\n");
    assert_eq!(gate.attempts_left(), Some(0));
    assert_eq!(line(&mut gate, b"lmnop\n"), GateOutcome::Grant);
}

#[test]
fn secret_grants_regardless_of_counter() {
    for attempts in [0, 1, 3, 100] {
        let mut gate = gate(attempts);
        assert_eq!(line(&mut gate, b"lmnop\n"), GateOutcome::Grant, "attempts={}", attempts);
    }
}

#[test]
fn empty_line_consumes_an_attempt() {
    let mut gate = gate(3);
    assert_eq!(gate.on_character(b'\n'), GateOutcome::Continue);
    assert_eq!(gate.attempts_left(), Some(2));
}

#[test]
fn failed_attempt_does_not_leak_into_next() {
    let mut gate = gate(3);
    line(&mut gate, b"lm\n");
    assert_eq!(gate.buffered_len(), 0);
    // "lm" + "nop" would match if the first attempt leaked.
    assert_eq!(line(&mut gate, b"nop\n"), GateOutcome::Continue);
    assert_eq!(gate.attempts_left(), Some(1));
}

#[test]
fn mismatch_decrements_exactly_once() {
    let mut gate = gate(10);
    for expected in (0..10).rev() {
        assert_eq!(line(&mut gate, b"nope\n"), GateOutcome::Continue);
        assert_eq!(gate.attempts_left(), Some(expected));
        assert_eq!(gate.buffered_len(), 0);
    }
}

#[test]
fn carriage_return_is_part_of_the_line() {
    let mut gate = gate(3);
    assert_eq!(line(&mut gate, b"lmnop\r\n"), GateOutcome::Continue);
    assert_eq!(gate.attempts_left(), Some(2));
}

#[test]
fn exact_policy_allows_exactly_n_guesses() {
    let mut gate = exact_gate(3);
    assert_eq!(line(&mut gate, b"x\n"), GateOutcome::Continue);
    assert_eq!(line(&mut gate, b"y\n"), GateOutcome::Continue);
    assert_eq!(line(&mut gate, b"z\n"), GateOutcome::Deny);
}

#[test]
fn exact_policy_grants_on_last_guess() {
    let mut gate = exact_gate(2);
    assert_eq!(line(&mut gate, b"x\n"), GateOutcome::Continue);
    assert_eq!(gate.attempts_left(), Some(1));
    assert_eq!(line(&mut gate, b"lmnop\n"), GateOutcome::Grant);
}

#[test]
fn overlong_line_is_a_mismatch() {
    let mut gate = GateController::new(
        GatePolicy::new("lmnop").with_max_line_len(Some(8)),
        GateState::new(3),
    );
    let long = [b'a'; 64];
    line(&mut gate, &long);
    assert_eq!(gate.buffered_len(), 8);
    assert_eq!(gate.on_character(b'\n'), GateOutcome::Continue);
    assert_eq!(gate.attempts_left(), Some(2));
}

#[test]
fn secret_prefix_followed_by_overflow_does_not_match() {
    let mut gate = GateController::new(
        GatePolicy::new("lmnop").with_max_line_len(Some(5)),
        GateState::new(3),
    );
    assert_eq!(line(&mut gate, b"lmnopXYZ\n"), GateOutcome::Continue);
    assert_eq!(gate.attempts_left(), Some(2));
}

#[test]
fn unbounded_lines_keep_growing() {
    let mut gate = GateController::new(
        GatePolicy::new("lmnop").with_max_line_len(None),
        GateState::new(3),
    );
    line(&mut gate, &vec![b'a'; 10_000]);
    assert_eq!(gate.buffered_len(), 10_000);
}

#[test]
fn decided_gate_ignores_further_input() {
    let mut gate = gate(0);
    assert_eq!(line(&mut gate, b"x\n"), GateOutcome::Deny);
    assert_eq!(line(&mut gate, b"lmnop\n"), GateOutcome::Deny);
    assert_eq!(gate.state(), &GateState::Denied);
}
