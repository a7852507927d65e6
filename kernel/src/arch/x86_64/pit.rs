//! 8254 PIT channel 0 as a free-running down-counter.
//!
//! The PIT's oscillator runs at **1,193,182 Hz**, a frequency inherited from
//! the original IBM PC: a 14.31818 MHz crystal (4× the NTSC color burst)
//! divided by 12. Every x86 PC since has kept it.
//!
//! There are no interrupts in this kernel, so channel 0 is not a tick
//! source. It is only ever *read*: we latch its current count and measure
//! how far it moved since the last sample. See
//! [`CounterSource::wait_ms`](exige_api::CounterSource::wait_ms) for the
//! wrap handling.
//!
//! To make one count equal one oscillator period, channel 0 is programmed
//! at boot as a mode 2 rate generator with reload 0 (meaning 65536). In
//! mode 3, the BIOS default, the counter steps by two per clock and would
//! make every delay twice too short.

use exige_api::CounterSource;

use super::port::{inb, outb};

/// Channel 0 data port. Reload writes and latched reads both go here.
const CHANNEL_0: u16 = 0x40;

/// Mode/command register (write-only).
const COMMAND: u16 = 0x43;

/// The PIT's base oscillator frequency in Hz. Shared by all three channels.
pub const PIT_FREQUENCY: u32 = 1_193_182;

/// Command byte 0x34:
///   bits 6–7 = 00  → select channel 0
///   bits 4–5 = 11  → access mode: lobyte/hibyte
///   bits 1–3 = 010 → mode 2: rate generator
///   bit 0    = 0   → binary counting (not BCD)
const CH0_RATE_GENERATOR: u8 = 0x34;

/// Command byte 0x00: counter latch for channel 0. The count is frozen in
/// a holding register until both bytes have been read; the counter itself
/// keeps running.
const CH0_LATCH: u8 = 0x00;

/// Program channel 0 as a full-range rate generator.
pub fn init() {
    unsafe {
        outb(COMMAND, CH0_RATE_GENERATOR);
        // Reload 0 means 65536.
        outb(CHANNEL_0, 0);
        outb(CHANNEL_0, 0);
    }
    log::debug!("PIT channel 0: mode 2, reload 65536, {} Hz", PIT_FREQUENCY);
}

/// Handle on PIT channel 0. Zero-sized, so every owner of a delay gets its
/// own copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pit;

impl CounterSource for Pit {
    const MAX: u32 = 0xFFFF;
    const TICKS_PER_MS: u32 = PIT_FREQUENCY / 1000;

    fn read(&mut self) -> u32 {
        unsafe {
            outb(COMMAND, CH0_LATCH);
            let lo = inb(CHANNEL_0);
            let hi = inb(CHANNEL_0);
            u32::from(u16::from_le_bytes([lo, hi]))
        }
    }
}
