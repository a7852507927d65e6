//! The board seam.
//!
//! Every architecture implements [`Platform`]. The kernel proper (boot
//! banner, shell, smoke tests) only calls through this trait and the
//! `exige_api` traits its associated types carry, and never names a port
//! or a register.

use exige_api::{DateTime, Keyboard, Screen, Sound};

pub trait Platform {
    type Console: Screen;
    type Keyboard: Keyboard;
    type Sound: Sound;

    /// Human-readable board name for the boot log.
    const NAME: &'static str;

    /// Bring up the devices behind the console, keyboard and sound
    /// handles. Called exactly once from `kmain`, after the debug serial
    /// line and the logger.
    fn init() -> Board<Self>
    where
        Self: Sized;

    /// Current wall-clock time, or `None` on boards without a clock chip.
    fn read_clock() -> Option<DateTime>;

    fn reboot() -> !;

    /// Stop the CPU for good.
    fn halt() -> !;
}

/// The devices a board hands to the kernel after [`Platform::init`].
pub struct Board<P: Platform> {
    pub console: P::Console,
    pub keyboard: P::Keyboard,
    pub sound: P::Sound,
}

/// Serial port access for debug output.
///
/// Static methods: there is one debug port per board and `print!` reaches
/// it without holding a handle.
pub trait SerialConsole {
    fn init();
    fn write_byte(b: u8);
    fn read_byte() -> Option<u8>;
}
