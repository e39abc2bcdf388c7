//! End-to-end session tests driving the public `Calculator` API.
//!
//! Each test replays a short sequence of button presses the way a front end
//! would and checks the resulting snapshot.

use calc_core::{
    Action, BinaryOp, Calculator, DisplayMode, EngineConfig, MemoryOp, Preferences, ScientificFn,
    Variable,
};

/// Dispatches every action in order and returns the final display.
fn press(
    calc: &mut Calculator,
    actions: &[Action],
) -> String {
    for &action in actions {
        calc.dispatch(action);
    }
    calc.state().display().to_string()
}

fn with_history_limit(limit: usize) -> Calculator {
    let config = EngineConfig {
        history_limit: limit,
        ..EngineConfig::default()
    };
    Calculator::new(config, Preferences::in_memory()).expect("valid config")
}

#[test]
fn test_leading_zeros_collapse() {
    let mut calc = Calculator::default();

    let display = press(&mut calc, &[Action::Digit(0), Action::Digit(0), Action::Digit(5)]);

    assert_eq!(display, "5");
}

#[test]
fn test_decimal_point_entered_once() {
    let mut calc = Calculator::default();

    let display = press(&mut calc, &[Action::Decimal, Action::Decimal]);

    assert_eq!(display, "0.");
    assert_eq!(display.matches('.').count(), 1);
}

#[test]
fn test_two_plus_two() {
    let mut calc = Calculator::default();

    let display = press(
        &mut calc,
        &[
            Action::Digit(2),
            Action::Operator(BinaryOp::Add),
            Action::Digit(2),
            Action::Equals,
        ],
    );

    assert_eq!(display, "4");
    let entries: Vec<&str> = calc.state().history().iter().collect();
    assert_eq!(entries, vec!["2 + 2 = 4"]);
}

#[test]
fn test_divide_by_zero_then_fresh_digit() {
    let mut calc = Calculator::default();

    let display = press(
        &mut calc,
        &[
            Action::Digit(5),
            Action::Operator(BinaryOp::Divide),
            Action::Digit(0),
            Action::Equals,
        ],
    );
    assert_eq!(display, "Error");
    assert!(calc.state().history().is_empty());

    assert_eq!(press(&mut calc, &[Action::Digit(3)]), "3");
}

#[test]
fn test_backspace_cases() {
    let mut calc = Calculator::default();
    press(&mut calc, &[Action::Digit(1), Action::Digit(2), Action::Digit(3)]);
    assert_eq!(press(&mut calc, &[Action::Backspace]), "12");

    press(&mut calc, &[Action::Clear, Action::Digit(5)]);
    assert_eq!(press(&mut calc, &[Action::Backspace]), "0");

    press(&mut calc, &[Action::Scientific(ScientificFn::Reciprocal)]);
    assert_eq!(calc.state().display(), "Infinity");
    assert_eq!(press(&mut calc, &[Action::Backspace]), "0");
    assert_eq!(calc.state().pending(), None);
}

#[test]
fn test_scientific_domain_and_asymptotes() {
    let mut calc = Calculator::default();

    let sqrt = press(
        &mut calc,
        &[
            Action::Digit(1),
            Action::ToggleSign,
            Action::Scientific(ScientificFn::Sqrt),
        ],
    );
    assert_eq!(sqrt, "Error");

    let reciprocal = press(
        &mut calc,
        &[
            Action::Clear,
            Action::Digit(0),
            Action::Scientific(ScientificFn::Reciprocal),
        ],
    );
    assert_eq!(reciprocal, "Infinity");

    let tan = press(
        &mut calc,
        &[
            Action::Clear,
            Action::Digit(9),
            Action::Digit(0),
            Action::Scientific(ScientificFn::Tan),
        ],
    );
    assert_eq!(tan, "Infinity");
    assert!(calc.state().history().is_empty());
}

#[test]
fn test_memory_add_clear_recall() {
    let mut calc = Calculator::default();

    let display = press(
        &mut calc,
        &[
            Action::Digit(5),
            Action::Memory(MemoryOp::Add),
            Action::Memory(MemoryOp::Clear),
            Action::Memory(MemoryOp::Recall),
        ],
    );

    assert_eq!(display, "0");
    assert_eq!(calc.state().memory(), 0.0);
}

#[test]
fn test_variable_store_and_recall() {
    let mut calc = Calculator::default();

    let display = press(
        &mut calc,
        &[
            Action::Variable(Variable::X),
            Action::Digit(7),
            Action::StoreVariable(Variable::X),
            Action::Clear,
            Action::Variable(Variable::X),
        ],
    );

    assert_eq!(display, "7");
    assert_eq!(calc.state().variable(Variable::X), 7.0);
}

#[test]
fn test_history_evicts_oldest_past_limit() {
    let limit = 5;
    let mut calc = with_history_limit(limit);

    for n in 1..=limit as u8 + 1 {
        press(
            &mut calc,
            &[
                Action::Clear,
                Action::Digit(n),
                Action::Operator(BinaryOp::Multiply),
                Action::Digit(1),
                Action::Equals,
            ],
        );
    }

    let entries: Vec<&str> = calc.state().history().iter().collect();
    assert_eq!(entries.len(), limit);
    assert_eq!(entries.first(), Some(&"2 * 1 = 2"));
    assert_eq!(entries.last(), Some(&"6 * 1 = 6"));
}

#[test]
fn test_keyboard_session() {
    let mut calc = Calculator::default();

    for key in ["1", "2", ".", "5", "*", "2", "Enter"] {
        calc.press_key(key);
    }

    assert_eq!(calc.state().display(), "25");
    assert_eq!(calc.state().history().latest(), Some("12.5 * 2 = 25"));
}

#[test]
fn test_engineering_mode_session() {
    let mut calc = Calculator::default();

    let display = press(
        &mut calc,
        &[
            Action::SetDisplayMode(DisplayMode::Eng),
            Action::SetPrecision(1),
            Action::Digit(4),
            Action::Digit(5),
            Action::Digit(0),
            Action::Digit(0),
            Action::Operator(BinaryOp::Multiply),
            Action::Digit(3),
            Action::Equals,
        ],
    );

    assert_eq!(display, "13.5e+3");
}

#[test]
fn test_recalled_history_result_continues_calculation() {
    let mut calc = Calculator::default();
    press(
        &mut calc,
        &[
            Action::Digit(9),
            Action::Scientific(ScientificFn::Sqrt),
            Action::Digit(2),
            Action::Operator(BinaryOp::Subtract),
        ],
    );

    let display = press(&mut calc, &[Action::RecallHistory(0), Action::Equals]);

    assert_eq!(display, "-1");
    assert_eq!(calc.state().history().latest(), Some("2 - 3 = -1"));
}
