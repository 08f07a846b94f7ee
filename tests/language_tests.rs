//! End-to-end tests driven through `Interpreter::interpret_line`, the same entry point the REPL
//! and `LOAD` use. Grounded on the teacher's `eval_and_stack` integration-test harness (one
//! interpreter per test, feed it source, inspect the resulting stack) but without any word
//! registration step — every primitive here is already built into the bytecode interpreter.

use bigforth::runtime::interpreter::Interpreter;
use test_case::test_case;

/// Run every line of `source` through one interpreter and return the final value stack,
/// bottom-to-top, as decimal strings. Comparing decimal text rather than parsing back into `i64`
/// keeps this harness honest for the big-integer stress test, where the result doesn't fit in a
/// machine word.
fn stack_after(source: &str) -> Vec<String> {
    let mut interp = Interpreter::new();
    for line in source.lines() {
        interp.interpret_line(line);
    }
    interp.value_stack.as_slice().iter().map(|value| value.to_string()).collect()
}

fn depth_after(source: &str) -> usize {
    let mut interp = Interpreter::new();
    for line in source.lines() {
        interp.interpret_line(line);
    }
    interp.value_stack.as_slice().len()
}

#[test]
fn scenario_1_simple_addition() {
    assert_eq!(stack_after("2 3 +"), vec!["5"]);
}

#[test]
fn scenario_2_colon_definition_squares() {
    assert_eq!(stack_after(": SQR DUP * ;\n12 SQR"), vec!["144"]);
}

#[test]
fn scenario_3_factorial_via_do_loop() {
    assert_eq!(
        stack_after(": FACT 1 SWAP 1 + 1 DO I * LOOP ;\n20 FACT"),
        vec!["2432902008176640000"]
    );
}

#[test]
fn scenario_4_fibonacci_via_do_loop() {
    assert_eq!(stack_after(": FIB 0 1 ROT 0 DO OVER + SWAP LOOP DROP ;\n10 FIB"), vec!["55"]);
}

#[test]
fn scenario_5_variable_by_raw_index() {
    assert_eq!(stack_after("VARIABLE X\n42 0 ! 0 @"), vec!["42"]);
}

#[test]
fn scenario_5_variable_via_accessor_word() {
    assert_eq!(stack_after("VARIABLE X\n42 X ! X @"), vec!["42"]);
}

#[test_case(-7, "-1")]
#[test_case(0, "0")]
#[test_case(7, "1")]
fn scenario_6_sign(input: i64, expected: &str) {
    let source = format!(
        ": SIGN DUP 0 < IF DROP -1 ELSE 0 > IF 1 ELSE 0 THEN THEN ;\n{} SIGN",
        input
    );
    assert_eq!(stack_after(&source), vec![expected.to_string()]);
}

#[test]
fn scenario_7_do_loop_at_the_top_level_counts_up() {
    // `I .` pops and prints each iteration, so nothing is left on the stack; collect the same
    // count differently (pushing instead of printing) to get an assertable result while still
    // exercising a `DO/LOOP` typed directly at the prompt, outside any colon-definition.
    assert_eq!(depth_after("100 0 DO I . LOOP"), 0);
    assert_eq!(stack_after("100 0 DO I LOOP"), (0..100).map(|n| n.to_string()).collect::<Vec<_>>());
}

#[test]
fn scenario_8_big_integer_stress_two_to_the_two_hundred() {
    let expected = "1606938044258990275541962092341162602522202993782792835301376";
    assert_eq!(stack_after(": POW 1 SWAP 0 DO OVER * LOOP SWAP DROP ;\n2 200 POW"), vec![expected]);
}

#[test]
fn forget_then_lookup_of_the_forgotten_word_fails() {
    let mut interp = Interpreter::new();
    interp.interpret_line(": DOUBLE 2 * ;");
    assert!(interp.dictionary.find_index("DOUBLE").is_some());

    interp.interpret_line("FORGET DOUBLE");
    assert!(interp.dictionary.find_index("DOUBLE").is_none());
}

#[test]
fn redefinition_preserves_index_and_rebinds_an_existing_caller() {
    let mut interp = Interpreter::new();
    interp.interpret_line(": STEP 1 + ;");
    interp.interpret_line(": RUN STEP ;");

    interp.interpret_line("0 RUN");
    assert_eq!(interp.value_stack.as_slice().last().unwrap().to_string(), "1");
    interp.value_stack.clear();

    // Redefining STEP in place must change what RUN does, because RUN compiled a CALL to
    // STEP's dictionary slot, not its name.
    interp.interpret_line(": STEP 10 + ;");
    interp.interpret_line("0 RUN");
    assert_eq!(interp.value_stack.as_slice().last().unwrap().to_string(), "10");
}

#[test]
fn dictionary_lookup_returns_the_most_recently_defined_word() {
    let mut interp = Interpreter::new();
    interp.interpret_line(": K 1 ;");
    interp.interpret_line(": K 2 ;");

    interp.interpret_line("K");
    assert_eq!(interp.value_stack.as_slice(), &[bigforth::runtime::data_structures::bigint::Int::from_i64(2)]);
}

#[test]
fn dup_dot_prints_the_same_value_twice() {
    assert_eq!(stack_after("5 DUP ="), vec!["1"]);
}

#[test]
fn round_trip_through_decimal_text() {
    let mut interp = Interpreter::new();
    interp.interpret_line("-123456789012345678901234567890");
    let text = interp.value_stack.as_slice()[0].to_string();
    assert_eq!(text, "-123456789012345678901234567890");
}

#[test_case("3 5", "5 3")]
#[test_case("-7 2", "2 -7")]
#[test_case("0 0", "0 0")]
fn commutativity_of_addition(a_then_b: &str, b_then_a: &str) {
    let lhs = stack_after(&format!("{} +", a_then_b));
    let rhs = stack_after(&format!("{} +", b_then_a));
    assert_eq!(lhs, rhs);
}

#[test]
fn do_loop_with_equal_start_and_limit_still_runs_once() {
    // `DO` never checks bounds before the first iteration (it's the classic Forth `DO`, not a
    // bounds-checked `?DO`), so `start == limit` still runs the body once before `LOOP` notices
    // the index has reached the limit.
    assert_eq!(stack_after("5 5 DO I LOOP"), vec!["5"]);
}

#[test]
fn zero_pick_equals_dup() {
    assert_eq!(stack_after("7 0 PICK"), stack_after("7 DUP"));
}

#[test]
fn shift_by_zero_is_identity() {
    assert_eq!(stack_after("12345 0 LSHIFT"), vec!["12345"]);
    assert_eq!(stack_after("12345 0 RSHIFT"), vec!["12345"]);
}

#[test]
fn bit_not_is_involutive() {
    assert_eq!(stack_after("12345 ~ ~"), vec!["12345"]);
    assert_eq!(stack_after("-9999 ~ ~"), vec!["-9999"]);
}

#[test]
fn unknown_word_is_a_diagnostic_not_an_abort() {
    // The rest of the line after an unknown word keeps running.
    assert_eq!(stack_after("1 FROBNICATE 2"), vec!["1", "2"]);
}

#[test]
fn division_by_zero_aborts_the_rest_of_the_line_but_leaves_the_stack() {
    let mut interp = Interpreter::new();
    interp.interpret_line("5 0 / 999");
    // The 999 after the error never runs; DIV has already popped both operands by the time it
    // discovers the divisor is zero, so the stack is left empty rather than with 5 restored.
    assert_eq!(interp.value_stack.as_slice().len(), 0);
}

#[test]
fn string_capturing_words_work_inside_a_definition() {
    let mut interp = Interpreter::new();
    interp.interpret_line(": GREET .\" hello\" ;");
    // No observable stack effect; this exercises that compiling `."` inside a definition and
    // running it later doesn't panic or leave the dictionary in a broken state.
    interp.interpret_line("GREET");
    assert_eq!(interp.value_stack.as_slice().len(), 0);
}

#[test]
fn nested_loops_each_see_the_innermost_index() {
    // `I` always reads the innermost loop's counter; the outer loop's index is inaccessible
    // once a nested `DO` is open.
    assert_eq!(
        stack_after(": PAIRS 3 0 DO 2 0 DO I LOOP LOOP ;\nPAIRS"),
        vec!["0", "1", "0", "1", "0", "1"]
    );
}

// A matched clause's `ENDOF` jumps past `ENDCASE` entirely, so `ENDCASE`'s selector-drop only
// ever runs on the fall-through path. On a match the clause's own pushed result is what's left.
#[test]
fn case_of_endcase_match_leaves_the_matched_clause_result() {
    let source = ": CLASSIFY CASE 1 OF 111 ENDOF 2 OF 222 ENDOF 999 ENDCASE ;\n2 CLASSIFY";
    assert_eq!(stack_after(source), vec!["222"]);
}

#[test]
fn case_of_endcase_fall_through_consumes_the_default_and_restores_the_switch_value() {
    let source = ": CLASSIFY CASE 1 OF 111 ENDOF 2 OF 222 ENDOF 999 ENDCASE ;\n5 CLASSIFY";
    assert_eq!(stack_after(source), vec!["5"]);
}
