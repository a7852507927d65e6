//! The resident command shell.
//!
//! Prompt, read a line, run it, forever. Parsing lives in
//! [`exige_api::command`]; this module only wires the parsed command to
//! the board's devices.

use core::fmt::Write;

use exige_api::command::{self, Command, HELP};
use exige_api::{Color, Keyboard, Screen, Sound};

use crate::platform::{Board, Platform};

pub const BANNER: &str = "EXIGE OS [version 0.1]";

const PROMPT: &str = "Kernel# ";

/// Bytes per input line, terminator slot included.
const LINE_BUFFER: usize = 128;

/// Command names are padded to this width in the help listing.
const HELP_NAME_WIDTH: usize = 8;

pub fn run<P: Platform>(board: &mut Board<P>) -> ! {
    let mut buf = [0u8; LINE_BUFFER];
    loop {
        board.console.newline();
        board.console.print(PROMPT);
        let line = board.keyboard.read_line(&mut board.console, &mut buf);
        if line.dropped > 0 {
            log::debug!("line full, {} bytes dropped", line.dropped);
        }

        match command::parse(line.text) {
            Ok(Some(cmd)) => execute(board, cmd),
            Ok(None) => {}
            Err(err) => {
                board.console.newline();
                let _ = write!(board.console, "{}", err);
                board.console.newline();
            }
        }
    }
}

fn execute<P: Platform>(board: &mut Board<P>, cmd: Command<'_>) {
    log::trace!("command: {:?}", cmd);
    let console = &mut board.console;
    match cmd {
        Command::Help => {
            console.newline();
            console.print("Available commands:");
            console.newline();
            console.newline();
            for (name, summary) in HELP {
                let _ = write!(console, "  {:<width$}: {}", name, summary, width = HELP_NAME_WIDTH);
                console.newline();
            }
        }
        Command::Clear => console.clear(),
        Command::Beep => console.flash(),
        Command::Note(melody) => board.sound.play_sequence(melody),
        Command::Color(fg) => console.set_color(fg, Color::Black),
        Command::Date | Command::Time => {
            console.newline();
            match P::read_clock() {
                Some(now) if cmd == Command::Date => {
                    let _ = write!(console, "{}", now.date());
                }
                Some(now) => {
                    let _ = write!(console, "{}", now.time());
                }
                None => console.print("Not available on this board (no RTC)"),
            }
            console.newline();
        }
        Command::Reboot => {
            log::info!("rebooting");
            P::reboot()
        }
    }
}
