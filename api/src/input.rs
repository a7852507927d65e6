//! Console input: blocking key reads and the echoing line editor.
//!
//! All reads busy-poll the hardware. Nothing here returns an error. Bytes
//! that make no sense in context are skipped and the wait goes on.

use crate::console::{BACKSPACE, Screen};
use crate::hal::{ScanSource, SerialPort};
use crate::keymap::Keymap;

/// What serial terminals usually send for the Backspace key.
pub const DELETE: u8 = 0x7F;

/// One edited line, borrowed from the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'b> {
    /// The text typed, without the terminator.
    pub text: &'b str,
    /// Printable bytes that arrived after the buffer was full. They were
    /// neither stored nor echoed.
    pub dropped: usize,
}

pub trait Keyboard {
    /// Throw away anything the hardware buffered before now.
    fn init(&mut self);

    /// Block until a key produces a byte, and return it.
    fn read_char(&mut self) -> u8;

    /// Read one line into `buf`, echoing through `echo`, until Enter.
    ///
    /// At most `buf.len() - 1` bytes are kept. Enter is `\n` or `\r`.
    /// Backspace and Delete remove the last byte and erase it on screen,
    /// and do nothing on an empty line. Other printable ASCII is stored
    /// and echoed while room remains. Everything else is ignored.
    fn read_line<'b, S: Screen>(&mut self, echo: &mut S, buf: &'b mut [u8]) -> Line<'b> {
        let capacity = buf.len().saturating_sub(1);
        let mut len = 0;
        let mut dropped = 0;

        loop {
            match self.read_char() {
                b'\n' | b'\r' => {
                    echo.newline();
                    break;
                }
                BACKSPACE | DELETE => {
                    if len > 0 {
                        len -= 1;
                        echo.put_char(BACKSPACE);
                    }
                }
                byte @ 0x20..=0x7E => {
                    if len < capacity {
                        buf[len] = byte;
                        len += 1;
                        echo.put_char(byte);
                    } else {
                        dropped += 1;
                    }
                }
                _ => {}
            }
        }

        let stored: &'b [u8] = buf;
        // Only printable ASCII was stored, so this cannot fail.
        let text = core::str::from_utf8(&stored[..len]).unwrap_or_default();
        Line { text, dropped }
    }
}

/// A PS/2 keyboard decoded through a keymap.
pub struct Ps2Keyboard<P> {
    port: P,
    keymap: &'static Keymap,
}

impl<P: ScanSource> Ps2Keyboard<P> {
    pub const fn new(port: P, keymap: &'static Keymap) -> Self {
        Ps2Keyboard { port, keymap }
    }

    pub fn keymap(&self) -> &'static Keymap {
        self.keymap
    }
}

impl<P: ScanSource> Keyboard for Ps2Keyboard<P> {
    fn init(&mut self) {
        while self.port.poll().is_some() {}
    }

    fn read_char(&mut self) -> u8 {
        loop {
            if let Some(ascii) = self.port.poll().and_then(|sc| self.keymap.decode(sc)) {
                return ascii;
            }
            core::hint::spin_loop();
        }
    }
}

/// Keys typed on the far end of a serial line. Bytes pass through raw.
pub struct SerialKeyboard<S> {
    serial: S,
}

impl<S: SerialPort> SerialKeyboard<S> {
    pub const fn new(serial: S) -> Self {
        SerialKeyboard { serial }
    }
}

impl<S: SerialPort> Keyboard for SerialKeyboard<S> {
    fn init(&mut self) {
        while self.serial.read_byte().is_some() {}
    }

    fn read_char(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.serial.read_byte() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{GridConsole, Position};
    use crate::keymap::{AZERTY, QWERTY};
    use crate::terminal::TerminalConsole;
    use crate::testing::{CaptureSerial, MemoryGrid, PitCounter, ScriptedKeys, TimerCounter};

    /// Keyboard that replays a fixed byte string.
    struct Typed(std::vec::IntoIter<u8>);

    impl Typed {
        fn new(bytes: &[u8]) -> Self {
            Typed(bytes.to_vec().into_iter())
        }
    }

    impl Keyboard for Typed {
        fn init(&mut self) {}

        fn read_char(&mut self) -> u8 {
            self.0.next().expect("test script ran out of input")
        }
    }

    fn screen() -> GridConsole<MemoryGrid, PitCounter> {
        let mut console = GridConsole::new(MemoryGrid::new(), PitCounter::default());
        console.init();
        console
    }

    #[test]
    fn backspace_edits_the_line() {
        let mut screen = screen();
        let mut buf = [0u8; 128];
        let line = Typed::new(b"ab\x08c\n").read_line(&mut screen, &mut buf);
        assert_eq!(line.text, "ac");
        assert_eq!(line.dropped, 0);
        assert_eq!(screen.grid().row_text(0).trim_end(), "ac");
        assert_eq!(screen.cursor(), Position { row: 1, col: 0 });
    }

    #[test]
    fn delete_and_carriage_return_work_too() {
        let mut screen = screen();
        let mut buf = [0u8; 16];
        let line = Typed::new(b"xyz\x7f\x7f!\r").read_line(&mut screen, &mut buf);
        assert_eq!(line.text, "x!");
    }

    #[test]
    fn erase_on_empty_line_does_nothing() {
        let mut screen = screen();
        screen.print("Kernel# ");
        let mut buf = [0u8; 16];
        let line = Typed::new(b"\x08\x08ok\n").read_line(&mut screen, &mut buf);
        assert_eq!(line.text, "ok");
        assert_eq!(screen.grid().row_text(0).trim_end(), "Kernel# ok");
    }

    #[test]
    fn full_buffer_drops_and_counts() {
        let mut screen = screen();
        let mut buf = [0u8; 4];
        let line = Typed::new(b"abcdef\n").read_line(&mut screen, &mut buf);
        assert_eq!(line.text, "abc");
        assert_eq!(line.dropped, 3);
        // Dropped bytes are not echoed either.
        assert_eq!(screen.grid().row_text(0).trim_end(), "abc");
    }

    #[test]
    fn room_frees_up_after_erase() {
        let mut screen = screen();
        let mut buf = [0u8; 3];
        let line = Typed::new(b"abc\x08d\n").read_line(&mut screen, &mut buf);
        assert_eq!(line.text, "ad");
        assert_eq!(line.dropped, 1);
    }

    #[test]
    fn control_bytes_are_ignored() {
        let mut screen = screen();
        let mut buf = [0u8; 16];
        let line = Typed::new(b"a\t\x1b\x00b\xffc\n").read_line(&mut screen, &mut buf);
        assert_eq!(line.text, "abc");
        assert_eq!(line.dropped, 0);
    }

    #[test]
    fn zero_sized_buffer_keeps_nothing() {
        let mut screen = screen();
        let mut buf = [0u8; 0];
        let line = Typed::new(b"hi\n").read_line(&mut screen, &mut buf);
        assert_eq!(line.text, "");
        assert_eq!(line.dropped, 2);
    }

    #[test]
    fn serial_echo_uses_crlf_and_visual_erase() {
        let mut term = TerminalConsole::new(CaptureSerial::new(), TimerCounter::default());
        let mut buf = [0u8; 16];
        let line = Typed::new(b"ab\x7fc\r").read_line(&mut term, &mut buf);
        assert_eq!(line.text, "ac");
        assert_eq!(term.serial().output(), b"ab\x08 \x08c\r\n");
    }

    #[test]
    fn ps2_skips_releases_and_unmapped_codes() {
        // Left shift press, 'q' position press and release, F1, Enter.
        let port = ScriptedKeys::new(&[0x2A, 0x10, 0x90, 0x3B, 0x1C]);
        let mut kbd = Ps2Keyboard::new(port, &QWERTY);
        assert_eq!(kbd.read_char(), b'q');
        assert_eq!(kbd.read_char(), b'\n');
    }

    #[test]
    fn ps2_layout_changes_the_letter() {
        let mut kbd = Ps2Keyboard::new(ScriptedKeys::new(&[0x10]), &AZERTY);
        assert_eq!(kbd.read_char(), b'a');
        assert_eq!(kbd.keymap().name(), "azerty");
    }

    #[test]
    fn ps2_init_drains_stale_codes() {
        let mut kbd = Ps2Keyboard::new(ScriptedKeys::new(&[0x1E, 0x9E]), &QWERTY);
        kbd.init();
        assert_eq!(kbd.port.remaining(), 0);
    }

    #[test]
    fn ps2_line_through_the_keymap() {
        let mut screen = screen();
        // h, e, l, l, o with releases interleaved, then Enter.
        let codes = [0x23, 0xA3, 0x12, 0x92, 0x26, 0xA6, 0x26, 0xA6, 0x18, 0x98, 0x1C, 0x9C];
        let mut kbd = Ps2Keyboard::new(ScriptedKeys::new(&codes), &QWERTY);
        let mut buf = [0u8; 128];
        assert_eq!(kbd.read_line(&mut screen, &mut buf).text, "hello");
    }

    #[test]
    fn serial_keyboard_init_drains_then_reads_raw() {
        let mut serial = CaptureSerial::new();
        serial.feed(b"stale");
        let mut kbd = SerialKeyboard::new(serial);
        kbd.init();
        kbd.serial.feed(b"\x7f");
        assert_eq!(kbd.read_char(), DELETE);
    }
}
