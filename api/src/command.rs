//! Shell command lines.
//!
//! A line is split at its first space into a command word and an optional
//! argument. Matching is exact and case-sensitive.

use crate::color::Color;
use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Clear,
    /// Visual bell: flash the screen.
    Beep,
    /// Play a melody. The argument is passed to the sequencer untouched.
    Note(&'a str),
    /// Change the text foreground. The background goes back to black.
    Color(Color),
    Date,
    Time,
    Reboot,
}

/// Commands in the order `help` lists them, with their one-line summary.
pub const HELP: [(&str, &str); 8] = [
    ("reboot", "restart the computer"),
    ("cls", "clear the screen"),
    ("beep", "visual flash (screen bell)"),
    ("note", "play notes (do re mi fa sol la si)"),
    ("color", "change text foreground color"),
    ("date", "display current date"),
    ("time", "display current time"),
    ("help", "list available commands"),
];

/// Parse one edited line.
///
/// An empty command word, as in `""` or `" cls"`, is not an error: it
/// yields `Ok(None)` and the shell just prompts again.
pub fn parse(line: &str) -> Result<Option<Command<'_>>, CommandError<'_>> {
    let (word, arg) = match line.split_once(' ') {
        Some((word, arg)) => (word, Some(arg)),
        None => (line, None),
    };

    let command = match word {
        "" => return Ok(None),
        "help" => Command::Help,
        "cls" => Command::Clear,
        "beep" => Command::Beep,
        "note" => Command::Note(arg.unwrap_or("")),
        "color" => {
            let name = arg.ok_or(CommandError::MissingColor)?;
            let color = Color::from_name(name).ok_or(CommandError::UnknownColor(name))?;
            Command::Color(color)
        }
        "date" => Command::Date,
        "time" => Command::Time,
        "reboot" => Command::Reboot,
        other => return Err(CommandError::UnknownCommand(other)),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_commands() {
        assert_eq!(parse("help"), Ok(Some(Command::Help)));
        assert_eq!(parse("cls"), Ok(Some(Command::Clear)));
        assert_eq!(parse("beep"), Ok(Some(Command::Beep)));
        assert_eq!(parse("date"), Ok(Some(Command::Date)));
        assert_eq!(parse("time"), Ok(Some(Command::Time)));
        assert_eq!(parse("reboot"), Ok(Some(Command::Reboot)));
    }

    #[test]
    fn arguments_after_the_first_space() {
        assert_eq!(parse("note do re  mi"), Ok(Some(Command::Note("do re  mi"))));
        assert_eq!(parse("note"), Ok(Some(Command::Note(""))));
        assert_eq!(parse("help me"), Ok(Some(Command::Help)));
    }

    #[test]
    fn empty_word_is_ignored() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse(" cls"), Ok(None));
    }

    #[test]
    fn color_names() {
        assert_eq!(parse("color white"), Ok(Some(Command::Color(Color::White))));
        assert_eq!(parse("color"), Err(CommandError::MissingColor));
        assert_eq!(parse("color pink"), Err(CommandError::UnknownColor("pink")));
        // The argument is everything after the first space.
        assert_eq!(parse("color  red"), Err(CommandError::UnknownColor(" red")));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(parse("HELP"), Err(CommandError::UnknownCommand("HELP")));
        assert_eq!(parse("Cls now"), Err(CommandError::UnknownCommand("Cls")));
    }

    #[test]
    fn help_lists_every_command_once() {
        for (name, _) in HELP {
            let parsed = parse(name);
            assert!(!matches!(parsed, Err(CommandError::UnknownCommand(_))), "{name}: {parsed:?}");
        }
    }
}
