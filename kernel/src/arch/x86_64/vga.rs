//! VGA text mode: 80×25 cells of (byte, attribute) at physical 0xB8000.
//!
//! Each cell is a little-endian `u16` with the character in the low byte
//! and the attribute in the high byte, matching [`Cell::to_raw`]. The
//! blinking cursor is not part of the buffer; it is positioned through the
//! CRT controller's index/data port pair.

use exige_api::{Cell, CellGrid, CELLS};

use super::port::outb;

/// Physical address of the color text buffer.
pub const TEXT_BUFFER_PHYS: u64 = 0xB8000;

const CRTC_INDEX: u16 = 0x3D4;
const CRTC_DATA: u16 = 0x3D5;

/// Cursor location registers, high and low byte of the linear index.
const CURSOR_HIGH: u8 = 0x0E;
const CURSOR_LOW: u8 = 0x0F;

/// The live text buffer, reached through the higher-half direct map.
pub struct TextBuffer {
    base: *mut u16,
}

impl TextBuffer {
    /// # Safety
    ///
    /// `base` must point at the mapped VGA text buffer (`CELLS` writable
    /// `u16`s), and nothing else may write to it while this handle lives.
    pub const unsafe fn new(base: *mut u16) -> Self {
        TextBuffer { base }
    }
}

impl CellGrid for TextBuffer {
    fn write_cell(&mut self, index: usize, cell: Cell) {
        if index < CELLS {
            // Volatile: the compiler must not merge or drop stores to video memory.
            unsafe { self.base.add(index).write_volatile(cell.to_raw()) };
        }
    }

    fn read_cell(&self, index: usize) -> Cell {
        if index < CELLS {
            Cell::from_raw(unsafe { self.base.add(index).read_volatile() })
        } else {
            Cell::from_raw(0)
        }
    }

    fn set_cursor(&mut self, index: u16) {
        let [lo, hi] = index.to_le_bytes();
        unsafe {
            outb(CRTC_INDEX, CURSOR_LOW);
            outb(CRTC_DATA, lo);
            outb(CRTC_INDEX, CURSOR_HIGH);
            outb(CRTC_DATA, hi);
        }
    }
}
