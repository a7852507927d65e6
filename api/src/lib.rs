//! EXIGE API: the board-independent half of the console environment.
//!
//! Everything in here is plain logic over a few hardware traits
//! ([`hal`]): the text console with its cursor automaton, the serial
//! terminal rendition of it, the line editor, down-counter timing, tone
//! generation and the note sequencer, plus the shell's command parser and
//! clock decoding. The kernel supplies one implementation of each trait per
//! board and never re-implements any of the logic.
//!
//! The crate is `#![no_std]` and never allocates. Under `cargo test` it
//! builds against `std` so the logic can be exercised on the host with the
//! fakes in `testing`.

#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod command;
pub mod console;
pub mod error;
pub mod hal;
pub mod input;
pub mod keymap;
pub mod notes;
pub mod rtc;
pub mod sound;
pub mod terminal;
pub mod timing;

#[cfg(test)]
mod testing;

pub use color::{Attribute, Cell, Color};
pub use command::Command;
pub use console::{FlashScope, GridConsole, Position, Screen};
pub use error::CommandError;
pub use hal::{CellGrid, CounterSource, ScanSource, SerialPort, ToneChannel};
pub use input::{Keyboard, Line, Ps2Keyboard, SerialKeyboard};
pub use rtc::{ClockFormat, ClockRegisters, DateTime};
pub use sound::{Silent, Sound, Speaker};
pub use terminal::TerminalConsole;

// ————————————————————————————————————————————————————————————————————————————
// Screen geometry, shared by both console backends
// ————————————————————————————————————————————————————————————————————————————

/// Columns per row.
pub const WIDTH: usize = 80;

/// Rows on screen.
pub const HEIGHT: usize = 25;

/// Total character cells.
pub const CELLS: usize = WIDTH * HEIGHT;
