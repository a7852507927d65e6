/*
 * Conditionally compiles the correct architecture module.
 * The kernel uses `arch::*` everywhere and never names a board directly.
 * Each module exports the same set of names: `Arch`, `Serial` and the
 * `serial::SERIAL_LOCK` used by `print!`.
 */

#[cfg(target_arch = "x86_64")]
pub mod x86_64;
#[cfg(target_arch = "x86_64")]
pub use x86_64::*;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;
#[cfg(target_arch = "aarch64")]
pub use aarch64::*;

#[cfg(target_arch = "aarch64")]
pub use aarch64::uart as serial;
