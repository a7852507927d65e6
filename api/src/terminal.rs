//! Console output over a serial line.
//!
//! A serial terminal has no addressable cells. This backend runs the same
//! [`Cursor`] automaton as [`GridConsole`](crate::console::GridConsole) so
//! cursor and attribute state stay identical, and replays each step as
//! bytes and ANSI escape sequences. The terminal on the other end does its
//! own wrapping and scrolling.

use core::fmt;

use crate::color::{Attribute, Color};
use crate::console::{Cursor, Edit, FLASH_HOLD_MS, FlashScope, Position, Screen};
use crate::hal::{CounterSource, SerialPort};

const ESC_CLEAR_HOME: &[u8] = b"\x1b[2J\x1b[H";
const ESC_RESET: &[u8] = b"\x1b[0m";
const ESC_REVERSE_ON: &[u8] = b"\x1b[?5h";
const ESC_REVERSE_OFF: &[u8] = b"\x1b[?5l";

/// Back one column, overwrite with a space, back again.
const ERASE: &[u8] = b"\x08 \x08";

/// Console rendered as a byte stream on a serial port.
pub struct TerminalConsole<S, C> {
    serial: S,
    counter: C,
    cursor: Cursor,
    attr: Attribute,
}

impl<S: SerialPort, C: CounterSource> TerminalConsole<S, C> {
    pub const fn new(serial: S, counter: C) -> Self {
        TerminalConsole {
            serial,
            counter,
            cursor: Cursor::new(),
            attr: Attribute::DEFAULT,
        }
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn counter(&mut self) -> &mut C {
        &mut self.counter
    }

    /// Emit `ESC [ <code> m`.
    fn write_sgr(&mut self, code: u8) {
        let mut digits = [0u8; 3];
        let mut n = code;
        let mut len = 0;
        loop {
            digits[len] = b'0' + n % 10;
            n /= 10;
            len += 1;
            if n == 0 {
                break;
            }
        }
        self.serial.write_bytes(b"\x1b[");
        for &d in digits[..len].iter().rev() {
            self.serial.write_byte(d);
        }
        self.serial.write_byte(b'm');
    }
}

impl<S: SerialPort, C: CounterSource> Screen for TerminalConsole<S, C> {
    const FLASH_SCOPE: FlashScope = FlashScope::WholeScreen;

    fn init(&mut self) {
        self.serial.write_bytes(ESC_RESET);
        self.attr = Attribute::DEFAULT;
        self.clear();
    }

    fn clear(&mut self) {
        self.serial.write_bytes(ESC_CLEAR_HOME);
        self.cursor.home();
    }

    fn put_char(&mut self, byte: u8) {
        let step = self.cursor.advance(byte);
        match (byte, step.edit) {
            (b'\n', _) => self.serial.write_bytes(b"\r\n"),
            (b'\r', _) => self.serial.write_byte(b'\r'),
            (_, Edit::Put(_, b)) => self.serial.write_byte(b),
            (_, Edit::Erase(_)) => self.serial.write_bytes(ERASE),
            (_, Edit::Moved) => {}
        }
    }

    fn set_color(&mut self, fg: Color, bg: Color) {
        self.attr = Attribute::new(fg, bg);
        self.write_sgr(self.attr.foreground().ansi_foreground());
        self.write_sgr(self.attr.background().ansi_background());
    }

    fn flash(&mut self) {
        self.serial.write_bytes(ESC_REVERSE_ON);
        self.counter.wait_ms(FLASH_HOLD_MS);
        self.serial.write_bytes(ESC_REVERSE_OFF);
    }

    fn cursor(&self) -> Position {
        self.cursor.position()
    }

    fn attribute(&self) -> Attribute {
        self.attr
    }
}

impl<S: SerialPort, C: CounterSource> fmt::Write for TerminalConsole<S, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }
}
