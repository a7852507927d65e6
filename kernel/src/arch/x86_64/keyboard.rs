//! PS/2 keyboard controller, polled.
//!
//! The 8042 controller exposes two ports: data (0x60) and status (0x64).
//! Bit 0 of the status byte says a byte is waiting in the output buffer.
//! There is no IRQ handler here. [`Ps2Port`] only answers "is there a scan
//! code, and if so which", and the keymap and line editing happen in
//! [`exige_api::Ps2Keyboard`].
//!
//! The same controller also owns the CPU reset line; see [`pulse_reset`].

use exige_api::ScanSource;
use exige_api::keymap::{self, Keymap};

use super::port::{inb, outb};

// PS/2 keyboard controller ports. These have been the same since the IBM PC AT (1984).
const DATA_PORT: u16 = 0x60;
const STATUS_PORT: u16 = 0x64;
const COMMAND_PORT: u16 = 0x64;

const STATUS_OUTPUT_FULL: u8 = 0x01;

/// Controller command: pulse the CPU's RESET# line low.
const CMD_PULSE_RESET: u8 = 0xFE;

#[derive(Debug, Clone, Copy, Default)]
pub struct Ps2Port;

impl ScanSource for Ps2Port {
    fn poll(&mut self) -> Option<u8> {
        unsafe {
            if inb(STATUS_PORT) & STATUS_OUTPUT_FULL != 0 {
                Some(inb(DATA_PORT))
            } else {
                None
            }
        }
    }
}

/// The layout chosen at build time.
pub fn layout() -> &'static Keymap {
    if cfg!(feature = "layout-qwerty") {
        &keymap::QWERTY
    } else {
        &keymap::AZERTY
    }
}

/// Ask the controller to reset the machine. Returns only if it ignored us.
pub fn pulse_reset() {
    unsafe {
        outb(COMMAND_PORT, CMD_PULSE_RESET);
    }
}
