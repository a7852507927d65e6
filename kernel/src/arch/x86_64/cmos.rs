//! MC146818-compatible CMOS real-time clock.
//!
//! Registers are reached by writing an index to port 0x70 and then
//! reading port 0x71. Bit 7 of the index port also masks NMIs, so it is
//! left clear.

use exige_api::{ClockFormat, ClockRegisters};

use super::port::{inb, io_wait, outb};

const INDEX_PORT: u16 = 0x70;
const DATA_PORT: u16 = 0x71;

const REG_SECOND: u8 = 0x00;
const REG_MINUTE: u8 = 0x02;
const REG_HOUR: u8 = 0x04;
const REG_DAY: u8 = 0x07;
const REG_MONTH: u8 = 0x08;
const REG_YEAR: u8 = 0x09;
const REG_STATUS_A: u8 = 0x0A;
const REG_STATUS_B: u8 = 0x0B;
/// Not standardized, but 0x32 is where QEMU and most PC BIOSes keep it.
const REG_CENTURY: u8 = 0x32;

const STATUS_A_UPDATING: u8 = 0x80;
const STATUS_B_24_HOUR: u8 = 0x02;
const STATUS_B_BINARY: u8 = 0x04;

/// Spins on update-in-progress before giving up on a stable snapshot.
const MAX_ATTEMPTS: usize = 8;

fn read_register(reg: u8) -> u8 {
    unsafe {
        outb(INDEX_PORT, reg);
        io_wait();
        inb(DATA_PORT)
    }
}

fn updating() -> bool {
    read_register(REG_STATUS_A) & STATUS_A_UPDATING != 0
}

fn snapshot() -> ClockRegisters {
    while updating() {
        core::hint::spin_loop();
    }
    ClockRegisters {
        second: read_register(REG_SECOND),
        minute: read_register(REG_MINUTE),
        hour: read_register(REG_HOUR),
        day: read_register(REG_DAY),
        month: read_register(REG_MONTH),
        year: read_register(REG_YEAR),
        century: read_register(REG_CENTURY),
    }
}

/// Read the clock registers and the encoding they use.
///
/// The chip updates its registers once a second. Two snapshots that agree
/// cannot straddle an update; if they keep disagreeing the last one wins.
pub fn read() -> (ClockRegisters, ClockFormat) {
    let mut last = snapshot();
    for _ in 0..MAX_ATTEMPTS {
        let next = snapshot();
        if next == last {
            break;
        }
        last = next;
    }

    let status_b = read_register(REG_STATUS_B);
    let format = ClockFormat {
        binary: status_b & STATUS_B_BINARY != 0,
        hour_24: status_b & STATUS_B_24_HOUR != 0,
    };
    log::trace!("CMOS: {:?} status B {:#04x}", last, status_b);
    (last, format)
}
