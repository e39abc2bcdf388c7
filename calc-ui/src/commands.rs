//! Parsing of REPL input into engine actions and front-end commands.
//!
//! A line is split on whitespace. Most tokens map to a single [`Command`];
//! `sto`, `prec`, `recall`, `theme` and `loglevel` take the following token as
//! their argument.

use std::iter::Peekable;
use std::str::SplitWhitespace;

use calc_core::{
    Action, AngleMode, Bracket, DisplayMode, MemoryOp, ScientificFn, Theme, Variable,
};
use thiserror::Error;

/// One parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Engine(Action),
    ShowHistory,
    /// Flip the theme, or set it when a name is given.
    Theme(Option<Theme>),
    LogLevel(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{command}': invalid argument '{value}', expected {expected}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        expected: &'static str,
    },
}

pub const HELP: &str = "\
digits . + - * / =     enter numbers and operators (e.g. 12.5 * 2 =)
ac | esc               clear entry and pending operation
bs                     delete last character
neg  %                 toggle sign, percentage
( )                    decorative brackets
sin cos tan log ln sqrt pow2 pow3 exp 1/x pi e
mc mr m+ m-            memory register
a b c x y z            recall variable; press again to store
sto <var>              store display into variable
deg rad                angle mode
fix sci eng            display notation
prec <n>               display precision
hist                   show history
recall <n>             load result of history entry n (1 is oldest)
clearhist              clear history
theme [dark|light]     toggle or set theme
loglevel <filter>      change log filter
help  quit";

/// Parses a whole line into commands, in order.
pub fn parse_line(line: &str) -> Result<Vec<Command>, CommandError> {
    let mut tokens = line.split_whitespace().peekable();
    let mut commands = Vec::new();
    while let Some(token) = tokens.next() {
        commands.extend(parse_token(token, &mut tokens)?);
    }
    Ok(commands)
}

fn parse_token(
    token: &str,
    rest: &mut Peekable<SplitWhitespace<'_>>,
) -> Result<Vec<Command>, CommandError> {
    let lower = token.to_ascii_lowercase();
    let single = |action: Action| -> Result<Vec<Command>, CommandError> {
        Ok(vec![Command::Engine(action)])
    };

    match lower.as_str() {
        "ac" | "clear" | "esc" => return single(Action::Clear),
        "bs" | "back" => return single(Action::Backspace),
        "neg" | "+/-" => return single(Action::ToggleSign),
        "%" => return single(Action::Percentage),
        "(" => return single(Action::Bracket(Bracket::Open)),
        ")" => return single(Action::Bracket(Bracket::Close)),
        "1/x" => return single(Action::Scientific(ScientificFn::Reciprocal)),
        "mc" => return single(Action::Memory(MemoryOp::Clear)),
        "mr" => return single(Action::Memory(MemoryOp::Recall)),
        "m+" => return single(Action::Memory(MemoryOp::Add)),
        "m-" => return single(Action::Memory(MemoryOp::Subtract)),
        "clearhist" => return single(Action::ClearHistory),
        "hist" | "history" => return Ok(vec![Command::ShowHistory]),
        "help" | "?" => return Ok(vec![Command::Help]),
        "quit" | "exit" | "q" => return Ok(vec![Command::Quit]),
        "sto" => {
            let value = rest.next().ok_or(CommandError::MissingArgument {
                command: "sto",
                expected: "a variable (a b c x y z)",
            })?;
            let variable = Variable::parse(&value.to_ascii_lowercase()).ok_or_else(|| {
                CommandError::InvalidArgument {
                    command: "sto",
                    value: value.to_string(),
                    expected: "one of a b c x y z",
                }
            })?;
            return single(Action::StoreVariable(variable));
        }
        "prec" => {
            let value = rest.next().ok_or(CommandError::MissingArgument {
                command: "prec",
                expected: "a digit count",
            })?;
            let precision = value.parse().map_err(|_| CommandError::InvalidArgument {
                command: "prec",
                value: value.to_string(),
                expected: "a whole number",
            })?;
            return single(Action::SetPrecision(precision));
        }
        "recall" => {
            let value = rest.next().ok_or(CommandError::MissingArgument {
                command: "recall",
                expected: "a history entry number",
            })?;
            let index = value
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| CommandError::InvalidArgument {
                    command: "recall",
                    value: value.to_string(),
                    expected: "an entry number starting at 1",
                })?;
            return single(Action::RecallHistory(index));
        }
        "theme" => {
            let theme = rest
                .peek()
                .and_then(|value| Theme::parse(&value.to_ascii_lowercase()));
            if theme.is_some() {
                rest.next();
            }
            return Ok(vec![Command::Theme(theme)]);
        }
        "loglevel" => {
            let value = rest.next().ok_or(CommandError::MissingArgument {
                command: "loglevel",
                expected: "a level or filter directive",
            })?;
            return Ok(vec![Command::LogLevel(value.to_string())]);
        }
        _ => {}
    }

    if let Some(mode) = AngleMode::parse(&lower) {
        return single(Action::SetAngleMode(mode));
    }
    if let Some(mode) = DisplayMode::parse(&lower) {
        return single(Action::SetDisplayMode(mode));
    }
    if let Some(func) = ScientificFn::parse(&lower) {
        return single(Action::Scientific(func));
    }
    if let Some(variable) = Variable::parse(&lower) {
        return single(Action::Variable(variable));
    }
    if let Some(action) = Action::from_key(token) {
        return single(action);
    }

    parse_keys(token)
}

/// Splits a run of key characters such as `12.5` or `2+3=` into actions.
fn parse_keys(token: &str) -> Result<Vec<Command>, CommandError> {
    let mut buf = [0u8; 4];
    token
        .chars()
        .map(|c| {
            Action::from_key(c.encode_utf8(&mut buf))
                .map(Command::Engine)
                .ok_or_else(|| CommandError::Unknown(token.to_string()))
        })
        .collect()
}
