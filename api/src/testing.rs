//! In-memory stand-ins for the hardware seams, shared by the unit tests.

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use crate::color::Cell;
use crate::hal::{CellGrid, CounterSource, ScanSource, SerialPort, ToneChannel};
use crate::sound::Sound;
use crate::{CELLS, WIDTH};

/// A text grid in a plain array, remembering the last cursor position set.
#[derive(Debug, Clone)]
pub struct MemoryGrid {
    cells: Vec<Cell>,
    cursor: Option<u16>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::filled(Cell::from_raw(0))
    }

    pub fn filled(cell: Cell) -> Self {
        MemoryGrid { cells: vec![cell; CELLS], cursor: None }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * WIDTH + col]
    }

    /// The characters of one row, padded with whatever the cells hold.
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row * WIDTH..(row + 1) * WIDTH]
            .iter()
            .map(|c| if c.byte == 0 { ' ' } else { char::from(c.byte) })
            .collect()
    }

    pub fn hardware_cursor(&self) -> Option<u16> {
        self.cursor
    }
}

impl CellGrid for MemoryGrid {
    fn write_cell(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    fn read_cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    fn set_cursor(&mut self, index: u16) {
        self.cursor = Some(index);
    }
}

/// A down-counter that moves `step` ticks between consecutive reads, so
/// every wait finishes after a predictable number of samples.
#[derive(Debug)]
pub struct StepCounter<const MAX: u32, const TICKS_PER_MS: u32> {
    value: u32,
    step: u32,
    reads: u64,
    wraps: u64,
}

/// Shaped like PIT channel 0: 16 bits, 1193 ticks per millisecond.
pub type PitCounter = StepCounter<65535, 1193>;

/// Shaped like a 1 MHz, 32-bit system timer.
pub type TimerCounter = StepCounter<{ u32::MAX }, 1000>;

impl<const MAX: u32, const TICKS_PER_MS: u32> StepCounter<MAX, TICKS_PER_MS> {
    pub fn new(step: u32) -> Self {
        StepCounter { value: MAX, step, reads: 0, wraps: 0 }
    }

    /// Ticks between the first and the latest read.
    pub fn ticks_consumed(&self) -> u64 {
        self.reads.saturating_sub(1) * u64::from(self.step)
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn wraps(&self) -> u64 {
        self.wraps
    }
}

impl Default for PitCounter {
    fn default() -> Self {
        Self::new(997)
    }
}

impl Default for TimerCounter {
    fn default() -> Self {
        Self::new(250)
    }
}

impl<const MAX: u32, const TICKS_PER_MS: u32> CounterSource for StepCounter<MAX, TICKS_PER_MS> {
    const MAX: u32 = MAX;
    const TICKS_PER_MS: u32 = TICKS_PER_MS;

    fn read(&mut self) -> u32 {
        let now = self.value;
        if self.value >= self.step {
            self.value -= self.step;
        } else {
            self.value = MAX - (self.step - self.value - 1);
            self.wraps += 1;
        }
        self.reads += 1;
        now
    }
}

/// A serial line with scripted input that records everything sent.
#[derive(Debug, Default)]
pub struct CaptureSerial {
    output: Vec<u8>,
    input: VecDeque<u8>,
}

impl CaptureSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}

impl SerialPort for CaptureSerial {
    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }
}

/// A keyboard controller replaying fixed scan codes, then going quiet.
#[derive(Debug)]
pub struct ScriptedKeys {
    codes: VecDeque<u8>,
}

impl ScriptedKeys {
    pub fn new(codes: &[u8]) -> Self {
        ScriptedKeys { codes: codes.iter().copied().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.codes.len()
    }
}

impl ScanSource for ScriptedKeys {
    fn poll(&mut self) -> Option<u8> {
        self.codes.pop_front()
    }
}

/// Records every `play` instead of making noise.
#[derive(Debug, Default)]
pub struct RecordingSound {
    pub plays: Vec<(u32, u32)>,
}

impl Sound for RecordingSound {
    fn play(&mut self, hz: u32, ms: u32) {
        self.plays.push((hz, ms));
    }

    fn stop(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    Divisor(u16),
    Gate(bool),
}

/// A tone channel that logs how it was programmed.
#[derive(Debug, Default)]
pub struct FakeTone {
    pub events: Vec<ToneEvent>,
    pub gate: bool,
}

impl ToneChannel for FakeTone {
    const BASE_CLOCK_HZ: u32 = 1_193_182;

    fn set_divisor(&mut self, divisor: u16) {
        self.events.push(ToneEvent::Divisor(divisor));
    }

    fn set_gate(&mut self, on: bool) {
        self.gate = on;
        self.events.push(ToneEvent::Gate(on));
    }
}
