//! PC speaker via PIT channel 2 and port 0x61.
//!
//! The PIT has three channels sharing one command register (port 0x43)
//! with separate data ports. Channel 0 is our time base ([`super::pit`]);
//! channel 2 is wired to the speaker. Programming one doesn't disturb the
//! other.
//!
//! Port 0x61 is system control port B. Its low two bits connect channel 2
//! to the speaker:
//! - Bit 0: channel 2 gate (1 = counter runs, 0 = counter frozen)
//! - Bit 1: speaker data enable (1 = speaker follows channel 2's output)
//! - Bits 2–7: NMI and parity status. Preserved with read-modify-write.
//!
//! Durations and the note table live above this, in
//! [`exige_api::Speaker`]. This module only flips the bits.

use exige_api::ToneChannel;

use super::pit::PIT_FREQUENCY;
use super::port::{inb, outb};

/// PIT channel 2 data port. The divisor goes here, low byte first.
const CHANNEL_2: u16 = 0x42;

/// PIT mode/command register (shared with channel 0, write-only).
const COMMAND: u16 = 0x43;

/// System control port B.
const SPEAKER_PORT: u16 = 0x61;

/// Gate + data enable.
const SPEAKER_BITS: u8 = 0x03;

/// Command byte 0xB6:
///   bits 6–7 = 10  → select channel 2
///   bits 4–5 = 11  → access mode: lobyte/hibyte
///   bits 1–3 = 011 → mode 3: square wave generator
///   bit 0    = 0   → binary counting (not BCD)
const CH2_SQUARE_WAVE: u8 = 0xB6;

#[derive(Debug, Clone, Copy, Default)]
pub struct PcSpeaker;

impl ToneChannel for PcSpeaker {
    const BASE_CLOCK_HZ: u32 = PIT_FREQUENCY;

    fn set_divisor(&mut self, divisor: u16) {
        let [lo, hi] = divisor.to_le_bytes();
        unsafe {
            outb(COMMAND, CH2_SQUARE_WAVE);
            outb(CHANNEL_2, lo);
            outb(CHANNEL_2, hi);
        }
    }

    fn set_gate(&mut self, on: bool) {
        unsafe {
            let prev = inb(SPEAKER_PORT);
            let next = if on { prev | SPEAKER_BITS } else { prev & !SPEAKER_BITS };
            outb(SPEAKER_PORT, next);
        }
    }
}

/// Whether the speaker is currently connected to channel 2.
///
/// Reads bit 1 of port 0x61. Used by the smoke test to check that the
/// gate really toggles.
#[cfg(feature = "smoke-test")]
pub(crate) fn is_enabled() -> bool {
    unsafe { inb(SPEAKER_PORT) & 0x02 != 0 }
}
