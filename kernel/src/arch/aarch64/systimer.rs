//! BCM2837 system timer, free-running at 1 MHz.
//!
//! The hardware counts *up*. [`SystemTimer`] reports `u32::MAX - CLO`, so
//! the shared wait loop sees the same falling, wrapping counter it gets
//! from the PIT on a PC.

use exige_api::CounterSource;

use super::mmio::{self, PERIPHERAL_BASE};

/// Low 32 bits of the 64-bit counter.
const CLO: usize = PERIPHERAL_BASE + 0x3004;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimer;

impl CounterSource for SystemTimer {
    const MAX: u32 = u32::MAX;
    const TICKS_PER_MS: u32 = 1000;

    fn read(&mut self) -> u32 {
        u32::MAX - unsafe { mmio::read(CLO) }
    }
}
