//! Reset through the power management watchdog.

use super::mmio::{self, PERIPHERAL_BASE};

const PM_RSTC: usize = PERIPHERAL_BASE + 0x10_001C;
const PM_WDOG: usize = PERIPHERAL_BASE + 0x10_0024;

/// Every PM write must carry this in the top byte or it is ignored.
const PM_PASSWORD: u32 = 0x5A00_0000;
const RSTC_WRCFG_MASK: u32 = 0x30;
const RSTC_WRCFG_FULL_RESET: u32 = 0x20;

/// Watchdog ticks before it fires (about 16 µs each).
const WDOG_TICKS: u32 = 32;

/// Arm the watchdog for a full reset a few ticks from now.
pub fn reset() {
    unsafe {
        mmio::write(PM_WDOG, PM_PASSWORD | WDOG_TICKS);
        let rstc = mmio::read(PM_RSTC) & !RSTC_WRCFG_MASK;
        mmio::write(PM_RSTC, rstc | PM_PASSWORD | RSTC_WRCFG_FULL_RESET);
    }
}
