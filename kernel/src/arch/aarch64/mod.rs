//! Raspberry Pi 3 (BCM2837, Cortex-A53) platform implementation.
//!
//! The firmware loads `kernel8.img` at 0x80000 and releases all four cores
//! there at once. `_start` parks every core but core 0, puts the stack
//! just below the image, zeroes `.bss` and calls `kmain`.

pub mod mmio;
pub mod power;
pub mod systimer;
pub mod uart;

pub type Arch = RaspberryPi3;
pub use uart::Serial;

use exige_api::{DateTime, SerialKeyboard, Silent, TerminalConsole};

use crate::platform::{Board, Platform};
use systimer::SystemTimer;

core::arch::global_asm!(
    ".section .text.boot",
    ".global _start",
    "_start:",
    "    mrs     x1, mpidr_el1",
    "    and     x1, x1, #3",
    "    cbz     x1, 2f",
    "1:  wfe",
    "    b       1b",
    "2:  ldr     x1, =_start",
    "    mov     sp, x1",
    "    ldr     x1, =__bss_start",
    "    ldr     x2, =__bss_end",
    "3:  cmp     x1, x2",
    "    b.hs    4f",
    "    str     xzr, [x1], #8",
    "    b       3b",
    "4:  bl      kmain",
    "    b       1b",
);

pub struct RaspberryPi3;

impl Platform for RaspberryPi3 {
    type Console = TerminalConsole<Serial, SystemTimer>;
    type Keyboard = SerialKeyboard<Serial>;
    type Sound = Silent;

    const NAME: &'static str = "Raspberry Pi 3";

    fn init() -> Board<Self> {
        Board {
            console: TerminalConsole::new(Serial, SystemTimer),
            keyboard: SerialKeyboard::new(Serial),
            sound: Silent,
        }
    }

    /// The board has no battery-backed clock.
    fn read_clock() -> Option<DateTime> {
        None
    }

    fn reboot() -> ! {
        power::reset();
        Self::halt()
    }

    fn halt() -> ! {
        loop {
            unsafe { core::arch::asm!("wfe", options(nomem, nostack)) };
        }
    }
}
