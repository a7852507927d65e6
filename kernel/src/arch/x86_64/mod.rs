//! x86_64 legacy PC platform implementation.

pub mod boot;
pub mod cmos;
pub mod keyboard;
pub mod pit;
pub mod port;
pub mod serial;
pub mod speaker;
#[cfg(not(feature = "framebuffer"))]
pub mod vga;

// Re-export arch types under neutral names so the kernel can use
// `arch::Serial` and `arch::Arch` without reaching into submodules. The
// aarch64 module re-exports its own types under the same names.
pub type Arch = X86_64;
pub use serial::Serial;

use exige_api::{DateTime, GridConsole, Ps2Keyboard, Speaker};

use crate::platform::{Board, Platform};
use keyboard::Ps2Port;
use pit::Pit;
use speaker::PcSpeaker;

#[cfg(not(feature = "framebuffer"))]
pub type Grid = vga::TextBuffer;
#[cfg(feature = "framebuffer")]
pub type Grid = crate::framebuffer::FramebufferGrid;

/// x86_64 platform: VGA text, PS/2, PIT, PC speaker, CMOS.
pub struct X86_64;

#[cfg(not(feature = "framebuffer"))]
fn grid() -> Grid {
    let Some(base) = boot::phys_to_virt(vga::TEXT_BUFFER_PHYS) else {
        panic!("bootloader provided no higher-half direct map");
    };
    log::debug!("VGA text buffer mapped at {:p}", base);
    // The HHDM maps the legacy video window, and only the console writes it.
    unsafe { vga::TextBuffer::new(base.cast()) }
}

#[cfg(feature = "framebuffer")]
fn grid() -> Grid {
    let Some(info) = boot::framebuffer() else {
        panic!("bootloader provided no framebuffer");
    };
    log::debug!("framebuffer {}x{} pitch {}", info.width, info.height, info.pitch);
    crate::framebuffer::FramebufferGrid::new(info)
}

impl Platform for X86_64 {
    type Console = GridConsole<Grid, Pit>;
    type Keyboard = Ps2Keyboard<Ps2Port>;
    type Sound = Speaker<PcSpeaker, Pit>;

    const NAME: &'static str = "x86_64 PC";

    fn init() -> Board<Self> {
        assert!(boot::revision_supported(), "Limine base revision 2 not supported");
        pit::init();
        let layout = keyboard::layout();
        log::info!("keyboard layout: {}", layout.name());
        Board {
            console: GridConsole::new(grid(), Pit),
            keyboard: Ps2Keyboard::new(Ps2Port, layout),
            sound: Speaker::new(PcSpeaker, Pit),
        }
    }

    fn read_clock() -> Option<DateTime> {
        let (registers, format) = cmos::read();
        Some(registers.decode(format))
    }

    /// Pulse the reset line through the keyboard controller. If the
    /// controller ignores it, halt instead.
    fn reboot() -> ! {
        keyboard::pulse_reset();
        log::warn!("keyboard controller ignored the reset command");
        Self::halt()
    }

    /// `cli; hlt` forever. With interrupts masked, nothing wakes the CPU.
    fn halt() -> ! {
        loop {
            unsafe { core::arch::asm!("cli", "hlt", options(nomem, nostack)) };
        }
    }
}
