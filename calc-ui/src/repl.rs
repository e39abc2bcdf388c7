//! Line-oriented front end: reads commands, dispatches them, prints snapshots.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use calc_core::{Calculator, CalculatorState, Theme};
use tracing::{debug, info, warn};

use crate::commands::{Command, HELP, parse_line};
use crate::logging;

/// Renders the expression trace (when present) and the display line.
pub fn render_state(state: &CalculatorState) -> String {
    let mut flags = vec![
        state.angle_mode().as_str().to_string(),
        format!("{} {}", state.display_mode().as_str(), state.display_precision()),
    ];
    if state.memory() != 0.0 {
        flags.push("M".to_string());
    }
    if let Some(variable) = state.current_variable() {
        flags.push(format!("{variable} armed"));
    }

    let mut out = String::new();
    if !state.expression().is_empty() {
        out.push_str("  ");
        out.push_str(state.expression());
        out.push('\n');
    }
    out.push_str(&format!("> {}    [{}]", state.display(), flags.join(", ")));
    out
}

/// Numbered history listing, oldest first.
pub fn render_history(state: &CalculatorState) -> String {
    if state.history().is_empty() {
        return "(no history)".to_string();
    }
    state
        .history()
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>3}  {entry}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_theme(theme: Theme) -> String {
    format!("theme: {theme}")
}

/// Runs commands from `input` until `quit` or end of input.
///
/// `prompt` is written before each line when given. Parse errors are
/// reported on `output` and do not end the session.
pub fn run<R: BufRead, W: Write>(
    calc: &mut Calculator,
    mut input: R,
    mut output: W,
    prompt: Option<&str>,
) -> Result<()> {
    info!(theme = %calc.theme(), "session started");
    writeln!(output, "{}", render_state(calc.state()))?;

    loop {
        if let Some(prompt) = prompt {
            write!(output, "{prompt}")?;
            output.flush()?;
        }
        let mut line = String::new();
        if input.read_line(&mut line).context("read input")? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        debug!(line, "read line");

        let commands = match parse_line(line) {
            Ok(commands) => commands,
            Err(error) => {
                writeln!(output, "error: {error}")?;
                continue;
            }
        };
        if commands.is_empty() {
            continue;
        }

        let mut dispatched = false;
        for command in commands {
            match command {
                Command::Engine(action) => {
                    calc.dispatch(action);
                    dispatched = true;
                }
                Command::ShowHistory => writeln!(output, "{}", render_history(calc.state()))?,
                Command::Theme(None) => {
                    let theme = calc.toggle_theme();
                    writeln!(output, "{}", render_theme(theme))?;
                }
                Command::Theme(Some(theme)) => {
                    calc.set_theme(theme);
                    writeln!(output, "{}", render_theme(theme))?;
                }
                Command::LogLevel(level) => match logging::set_log_level(&level) {
                    Ok(()) => writeln!(output, "log level: {level}")?,
                    Err(error) => {
                        warn!(%error, "log level not changed");
                        writeln!(output, "error: {error}")?;
                    }
                },
                Command::Help => writeln!(output, "{HELP}")?,
                Command::Quit => {
                    if dispatched {
                        writeln!(output, "{}", render_state(calc.state()))?;
                    }
                    info!("session ended");
                    return Ok(());
                }
            }
        }
        if dispatched {
            writeln!(output, "{}", render_state(calc.state()))?;
        }
    }

    info!("input closed, session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use calc_core::{Action, BinaryOp, MemoryOp, Variable};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn render_state_shows_expression_and_flags() {
        let mut calc = Calculator::default();
        for action in [
            Action::Digit(3),
            Action::Memory(MemoryOp::Add),
            Action::Operator(BinaryOp::Add),
        ] {
            calc.dispatch(action);
        }

        assert_eq!(render_state(calc.state()), "  3 +\n> 3    [deg, fix 6, M]");
    }

    #[test]
    fn render_state_marks_armed_variable() {
        let mut calc = Calculator::default();
        calc.dispatch(Action::Variable(Variable::Z));

        assert_eq!(render_state(calc.state()), "> 0    [deg, fix 6, z armed]");
    }

    #[test]
    fn render_history_numbers_from_one() {
        let mut calc = Calculator::default();
        assert_eq!(render_history(calc.state()), "(no history)");

        for line in ["2+2=", "3*3="] {
            for command in parse_line(line).expect("parse") {
                if let Command::Engine(action) = command {
                    calc.dispatch(action);
                }
            }
        }

        assert_eq!(render_history(calc.state()), "  1  2 + 2 = 4\n  2  3 * 3 = 9");
    }
}
