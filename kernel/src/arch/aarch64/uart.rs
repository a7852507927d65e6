//! PL011 UART0: the whole user interface on the Pi.
//!
//! There is no display driver on this board. The console is a serial
//! terminal on the other end of UART0, driven with ANSI escapes by
//! [`exige_api::TerminalConsole`], and keystrokes come back the same way.
//! Log output shares the line.

use exige_api::SerialPort;

use super::mmio::{self, PERIPHERAL_BASE};
use crate::platform::SerialConsole;

const UART0: usize = PERIPHERAL_BASE + 0x20_1000;

const DR: usize = UART0;
const FR: usize = UART0 + 0x18;
const IBRD: usize = UART0 + 0x24;
const FBRD: usize = UART0 + 0x28;
const LCRH: usize = UART0 + 0x2C;
const CR: usize = UART0 + 0x30;
const ICR: usize = UART0 + 0x44;

const FR_RXFE: u32 = 1 << 4;
const FR_TXFF: u32 = 1 << 5;

/// 8 data bits, FIFOs enabled, one stop bit, no parity.
const LCRH_8N1_FIFO: u32 = (3 << 5) | (1 << 4);
/// UART enable, TX enable, RX enable.
const CR_ENABLE: u32 = (1 << 0) | (1 << 8) | (1 << 9);
const ICR_ALL: u32 = 0x7FF;

/// 48 MHz UART clock / (16 × 115200) = 26.041..., fraction 0.041 × 64 ≈ 3.
const IBRD_115200: u32 = 26;
const FBRD_115200: u32 = 3;

/// Serializes `log` lines against each other.
pub static SERIAL_LOCK: spin::Mutex<()> = spin::Mutex::new(());

#[derive(Debug, Clone, Copy, Default)]
pub struct Serial;

impl SerialConsole for Serial {
    /// The UART must be disabled while baud and line settings change.
    fn init() {
        unsafe {
            mmio::write(CR, 0);
            mmio::write(ICR, ICR_ALL);
            mmio::write(IBRD, IBRD_115200);
            mmio::write(FBRD, FBRD_115200);
            mmio::write(LCRH, LCRH_8N1_FIFO);
            mmio::write(CR, CR_ENABLE);
        }
    }

    fn write_byte(b: u8) {
        unsafe {
            while mmio::read(FR) & FR_TXFF != 0 {
                core::hint::spin_loop();
            }
            mmio::write(DR, u32::from(b));
        }
    }

    fn read_byte() -> Option<u8> {
        unsafe {
            if mmio::read(FR) & FR_RXFE != 0 {
                None
            } else {
                Some((mmio::read(DR) & 0xFF) as u8)
            }
        }
    }
}

impl SerialPort for Serial {
    fn write_byte(&mut self, byte: u8) {
        <Serial as SerialConsole>::write_byte(byte);
    }

    fn read_byte(&mut self) -> Option<u8> {
        <Serial as SerialConsole>::read_byte()
    }
}

impl core::fmt::Write for Serial {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for b in s.bytes() {
            if b == b'\n' {
                <Serial as SerialConsole>::write_byte(b'\r');
            }
            <Serial as SerialConsole>::write_byte(b);
        }
        Ok(())
    }
}
