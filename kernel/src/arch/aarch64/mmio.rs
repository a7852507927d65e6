//! 32-bit memory-mapped register access.
//!
//! The kernel runs with the MMU off, so bus addresses from the BCM2837
//! datasheet (shifted from 0x7E00_0000 to 0x3F00_0000) are used as-is.

/// Base of the peripheral window as the ARM cores see it.
pub const PERIPHERAL_BASE: usize = 0x3F00_0000;

/// # Safety
///
/// `addr` must be a readable device register.
pub unsafe fn read(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// # Safety
///
/// `addr` must be a writable device register, and the write must be one
/// the device tolerates.
pub unsafe fn write(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}
