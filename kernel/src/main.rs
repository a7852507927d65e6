//! ExigeOS: a text console, a keyboard and a speaker, on bare metal.
//!
//! Boots via Limine on x86_64 PCs and from the firmware's `kernel8.img`
//! on the Raspberry Pi 3. Single core, no interrupts, no heap. Everything
//! polls.

#![no_std] // No standard library. We ARE the operating system.
#![no_main] // No C runtime, no normal main(). We define our own entry point.

mod arch;
#[cfg(feature = "framebuffer")]
mod framebuffer;
mod logger;
mod platform;
mod shell;

use exige_api::{Keyboard, Screen};
use platform::{Platform, SerialConsole};

/// Formatted printing to the debug serial line.
///
/// On a PC that is COM1, so output appears in the terminal running QEMU
/// (via `-serial stdio`) and never on the VGA console. On the Pi it shares
/// UART0 with the console.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let _guard = crate::arch::serial::SERIAL_LOCK.lock();
        let _ = write!(crate::arch::Serial, $($arg)*);
    }};
}

/// Like [`print!`], but appends a newline.
#[macro_export]
macro_rules! println {
    () => { $crate::print!("\n") };
    ($($arg:tt)*) => {{
        $crate::print!($($arg)*);
        $crate::print!("\n");
    }};
}

/// Kernel entry point. Limine jumps here directly; on the Pi the boot
/// stub in `arch::aarch64` calls it once the stack and `.bss` are ready.
#[unsafe(no_mangle)]
extern "C" fn kmain() -> ! {
    arch::Serial::init();
    logger::init();
    let mut board = arch::Arch::init();
    log::info!("{} on {}", shell::BANNER, <arch::Arch as Platform>::NAME);

    // Run smoke tests when built with `--features smoke-test` (via `make test`).
    #[cfg(feature = "smoke-test")]
    tests::run_all(&mut board);

    board.console.init();
    board.keyboard.init();

    board.console.print(shell::BANNER);
    board.console.newline();

    shell::run(&mut board)
}

/// Panic handler, required by `#![no_std]`.
///
/// Prints the panic message to serial and halts forever.
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    println!();
    println!("!!! KERNEL PANIC !!!");
    println!("{}", info);
    arch::Arch::halt()
}
