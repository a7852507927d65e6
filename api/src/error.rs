//! Errors reported back to the person at the keyboard.
//!
//! The console, input and sound paths never fail: bad input is absorbed
//! where it arrives. The only thing that can go wrong is a typed command
//! the shell does not understand. Each variant's `Display` text is what the
//! shell prints, on its own line.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError<'a> {
    /// The first word of the line is not a command.
    UnknownCommand(&'a str),
    /// `color` was typed without a name.
    MissingColor,
    /// `color` was given a name that is not in the palette.
    UnknownColor(&'a str),
}

impl fmt::Display for CommandError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand(_) => {
                f.write_str("Unknown command. Type 'help' to list commands.")
            }
            CommandError::MissingColor => f.write_str("Usage: color <name>  (e.g. color white)"),
            CommandError::UnknownColor(_) => f.write_str("Unknown color name."),
        }
    }
}
