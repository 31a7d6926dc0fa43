#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns one line of player text into a typed action.
//!
//! The grammar is `<kind> <value>`, matched without regard to case:
//!
//! * `move N` and `trace N` take a direction, written as one of `N`, `E`,
//!   `S`, `W` or spelled out (`north`, ...).
//! * `attack B4` takes a column letter and a 1-based row number; `B 4` and
//!   `B,4` are accepted too.

use cursendus_core::{Action, ActionKind, AttackTarget, Direction, Interpreter};

/// Reasons a line of text is not a command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line was empty or contained only whitespace.
    #[error("command is empty")]
    Empty,
    /// The first word is not a known action kind.
    #[error("unknown command '{0}'")]
    UnknownKind(String),
    /// The action kind was not followed by a value.
    #[error("{0} needs a value")]
    MissingValue(ActionKind),
    /// The value is not a direction.
    #[error("'{0}' is not a direction")]
    InvalidDirection(String),
    /// The value is not a column letter followed by a row number.
    #[error("'{0}' is not a target cell")]
    InvalidTarget(String),
}

/// Parses one line of text into an action.
pub fn parse_action(text: &str) -> Result<Action, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (keyword, value) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, value)) => (keyword, value.trim()),
        None => (trimmed, ""),
    };

    let kind = match keyword.to_ascii_lowercase().as_str() {
        "move" => ActionKind::Move,
        "trace" => ActionKind::Trace,
        "attack" => ActionKind::Attack,
        _ => return Err(ParseError::UnknownKind(keyword.to_owned())),
    };

    if value.is_empty() {
        return Err(ParseError::MissingValue(kind));
    }

    match kind {
        ActionKind::Move => parse_direction(value).map(Action::Move),
        ActionKind::Trace => parse_direction(value).map(Action::Trace),
        ActionKind::Attack => parse_target(value).map(Action::Attack),
    }
}

fn parse_direction(value: &str) -> Result<Direction, ParseError> {
    let direction = match value.to_ascii_lowercase().as_str() {
        "n" | "north" => Direction::North,
        "e" | "east" => Direction::East,
        "s" | "south" => Direction::South,
        "w" | "west" => Direction::West,
        _ => return Err(ParseError::InvalidDirection(value.to_owned())),
    };
    Ok(direction)
}

fn parse_target(value: &str) -> Result<AttackTarget, ParseError> {
    let invalid = || ParseError::InvalidTarget(value.to_owned());

    let mut chars = value.chars();
    let column = chars
        .next()
        .filter(char::is_ascii_alphabetic)
        .ok_or_else(invalid)?;

    let rest = chars.as_str().trim_start();
    let row_text = rest.strip_prefix(',').unwrap_or(rest).trim_start();
    if row_text.is_empty() || !row_text.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let row = row_text.parse::<u32>().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    Ok(AttackTarget::new(column.to_ascii_uppercase(), row))
}

/// Command interpreter backed by [`parse_action`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandParser;

impl CommandParser {
    /// Creates a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Interpreter for CommandParser {
    fn parse(&self, text: &str) -> Option<Action> {
        parse_action(text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_zero_is_not_a_target() {
        assert_eq!(
            parse_target("A0"),
            Err(ParseError::InvalidTarget("A0".to_owned()))
        );
    }

    #[test]
    fn oversized_rows_are_rejected_rather_than_wrapped() {
        assert!(parse_target("A99999999999").is_err());
    }
}
