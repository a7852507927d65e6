//! 16550 UART on COM1: the debug log.
//!
//! On the PC the user-facing console is the VGA grid, so COM1 only carries
//! `log` output and panic messages. Run QEMU with `-serial stdio` to see it.

use super::port::{inb, outb};
use crate::platform::SerialConsole;

const COM1: u16 = 0x3F8;

// Register offsets from the base port. DLL/DLM overlay DATA/IER while
// LCR's DLAB bit is set.
const DATA: u16 = 0;
const IER: u16 = 1;
const DLL: u16 = 0;
const DLM: u16 = 1;
const FCR: u16 = 2;
const LCR: u16 = 3;
const MCR: u16 = 4;
const LSR: u16 = 5;

const LCR_DLAB: u8 = 0x80;
const LCR_8N1: u8 = 0x03;
/// Enable and clear both FIFOs, 14-byte trigger level.
const FCR_ENABLE_CLEAR_14: u8 = 0xC7;
/// DTR and RTS. OUT2 stays clear so the chip never raises an IRQ.
const MCR_DTR_RTS: u8 = 0x03;

const LSR_DATA_READY: u8 = 0x01;
const LSR_THR_EMPTY: u8 = 0x20;

/// 115200 / 3 = 38400 baud.
const DIVISOR_38400: u16 = 3;

/// Serializes writers so log lines don't interleave.
pub static SERIAL_LOCK: spin::Mutex<()> = spin::Mutex::new(());

#[derive(Debug, Clone, Copy, Default)]
pub struct Serial;

impl SerialConsole for Serial {
    fn init() {
        let [lo, hi] = DIVISOR_38400.to_le_bytes();
        unsafe {
            outb(COM1 + IER, 0x00);
            outb(COM1 + LCR, LCR_DLAB);
            outb(COM1 + DLL, lo);
            outb(COM1 + DLM, hi);
            outb(COM1 + LCR, LCR_8N1);
            outb(COM1 + FCR, FCR_ENABLE_CLEAR_14);
            outb(COM1 + MCR, MCR_DTR_RTS);
        }
    }

    /// Spins until the transmit holding register is empty.
    fn write_byte(b: u8) {
        unsafe {
            while inb(COM1 + LSR) & LSR_THR_EMPTY == 0 {
                core::hint::spin_loop();
            }
            outb(COM1 + DATA, b);
        }
    }

    fn read_byte() -> Option<u8> {
        let ready = unsafe { inb(COM1 + LSR) } & LSR_DATA_READY != 0;
        ready.then(|| unsafe { inb(COM1 + DATA) })
    }
}

/// Lets `write!` target the port directly. Terminals want CR LF, so a bare
/// `\n` goes out as both.
impl core::fmt::Write for Serial {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        s.bytes().for_each(|b| {
            if b == b'\n' {
                Serial::write_byte(b'\r');
            }
            Serial::write_byte(b);
        });
        Ok(())
    }
}
