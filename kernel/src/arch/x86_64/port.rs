/* Raw x86 port I/O.
 *
 * x86 keeps legacy devices in a separate 16-bit I/O address space reached
 * only through the `in`/`out` instructions. Everything on the PC board this
 * kernel drives lives there: the PIT, the speaker gate, the PS/2 controller,
 * the CRTC cursor registers, the CMOS clock and COM1. Only the text grid
 * itself is memory-mapped.
 *
 * These run in ring 0 only, and the caller vouches that the port is the
 * device it expects.
 */
pub unsafe fn outb(port: u16, value: u8) {
    unsafe {
        core::arch::asm!("out dx, al", in("dx") port, in("al") value, options(nomem, nostack, preserves_flags));
    }
}

pub unsafe fn inb(port: u16) -> u8 {
    let value: u8;
    unsafe {
        core::arch::asm!("in al, dx", in("dx") port, out("al") value, options(nomem, nostack, preserves_flags));
    }
    value
}

/// Unused POST diagnostic port. Writing to it costs roughly a microsecond
/// of bus time, enough for slow chips like the CMOS to settle.
const POST_PORT: u16 = 0x80;

pub fn io_wait() {
    unsafe { outb(POST_PORT, 0) };
}
