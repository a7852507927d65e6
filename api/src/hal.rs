//! Hardware seams.
//!
//! Each board implements these traits over its real registers. Everything
//! above them (the console automaton, the line editor, the tone logic and
//! the note sequencer) is written once against the traits and never
//! touches a port or an MMIO address directly. Exactly one implementation
//! of each trait is compiled into a given kernel image.

use crate::color::Cell;
use crate::timing;

/// A memory-mapped character grid, `WIDTH × HEIGHT` cells.
///
/// Cells are addressed by linear index `row * WIDTH + col`. Writes take
/// effect immediately; reads return what the hardware holds right now.
pub trait CellGrid {
    fn write_cell(&mut self, index: usize, cell: Cell);
    fn read_cell(&self, index: usize) -> Cell;

    /// Move the hardware cursor indicator to a linear index.
    ///
    /// Grids without a cursor register keep the default no-op.
    fn set_cursor(&mut self, _index: u16) {}
}

/// A byte-oriented serial transceiver.
pub trait SerialPort {
    /// Send one byte, spinning until the transmitter accepts it.
    fn write_byte(&mut self, byte: u8);

    /// Take one received byte if any is waiting. Never blocks.
    fn read_byte(&mut self) -> Option<u8>;

    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

/// A keyboard controller that hands out raw scan codes.
pub trait ScanSource {
    /// Return one pending scan code, or `None` if the controller's
    /// data-ready bit is clear.
    fn poll(&mut self) -> Option<u8>;
}

/// A free-running hardware down-counter.
///
/// The counter decreases at a fixed rate, and after reaching zero it
/// reloads to [`MAX`](CounterSource::MAX). It is the only source of real
/// time in the system: no interrupts, no calendar clock.
pub trait CounterSource {
    /// Highest value the counter takes. It wraps from 0 back to this.
    const MAX: u32;

    /// Counter ticks per millisecond.
    const TICKS_PER_MS: u32;

    /// Snapshot the counter. The value is always in `0..=MAX`.
    fn read(&mut self) -> u32;

    /// Spin until `ms` milliseconds of counter time have passed.
    ///
    /// Each iteration only measures the distance since the previous
    /// sample, so any number of wraps during the wait is handled, as long
    /// as samples are less than one counter period apart.
    fn wait_ms(&mut self, ms: u32) {
        let needed = u64::from(ms) * u64::from(Self::TICKS_PER_MS);
        let mut elapsed = 0u64;
        let mut prev = self.read();
        while elapsed < needed {
            let curr = self.read();
            elapsed += u64::from(timing::elapsed_ticks(prev, curr, Self::MAX));
            prev = curr;
            core::hint::spin_loop();
        }
    }
}

/// A square-wave channel gated onto a speaker.
pub trait ToneChannel {
    /// Input clock of the channel. The output frequency is
    /// `BASE_CLOCK_HZ / divisor`.
    const BASE_CLOCK_HZ: u32;

    /// Program the channel's 16-bit reload value.
    fn set_divisor(&mut self, divisor: u16);

    /// Connect (`true`) or disconnect the channel output from the speaker.
    fn set_gate(&mut self, on: bool);
}
