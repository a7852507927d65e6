//! Tone generation and the note sequencer.
//!
//! [`Sound`] is what the shell talks to. The sequencer half of it
//! ([`Sound::note`], [`Sound::play_sequence`]) is written once as provided
//! methods, so every backend plays melodies the same way and only has to
//! supply `play` and `stop`.

use crate::hal::{CounterSource, ToneChannel};
use crate::notes::{self, GAP_MS, NOTE_MS};

pub trait Sound {
    /// Sound `hz` for `ms` milliseconds, then go quiet. Blocks for the full
    /// duration. `hz == 0` is a rest: silence, then wait.
    fn play(&mut self, hz: u32, ms: u32);

    /// Silence the output now.
    fn stop(&mut self);

    /// Play a named note for [`NOTE_MS`]. Unknown names are ignored.
    fn note(&mut self, name: &str) {
        if let Some(hz) = notes::frequency(name) {
            self.play(hz, NOTE_MS);
        }
    }

    /// Play a space-separated melody such as `"do re mi"`, with a
    /// [`GAP_MS`] rest after every token.
    fn play_sequence(&mut self, text: &str) {
        for token in notes::tokens(text) {
            self.note(token);
            self.play(0, GAP_MS);
        }
    }
}

/// Reload value that makes `base_hz / divisor` closest to `hz` from above,
/// kept inside the 16-bit counter's usable range.
///
/// Frequencies below `base_hz / 65535` (about 18 Hz on a PC) clamp to the
/// lowest pitch instead of wrapping to a high one. Frequencies above the
/// base clock clamp to a divisor of 1.
pub fn divisor_for(hz: u32, base_hz: u32) -> u16 {
    let divisor = (base_hz / hz.max(1)).clamp(1, u32::from(u16::MAX));
    divisor as u16
}

/// A square-wave channel gated onto a speaker, timed by a down-counter.
pub struct Speaker<T, C> {
    channel: T,
    counter: C,
}

impl<T: ToneChannel, C: CounterSource> Speaker<T, C> {
    pub const fn new(channel: T, counter: C) -> Self {
        Speaker { channel, counter }
    }

    pub fn channel(&self) -> &T {
        &self.channel
    }
}

impl<T: ToneChannel, C: CounterSource> Sound for Speaker<T, C> {
    fn play(&mut self, hz: u32, ms: u32) {
        if hz == 0 {
            self.stop();
            self.counter.wait_ms(ms);
            return;
        }
        self.channel.set_divisor(divisor_for(hz, T::BASE_CLOCK_HZ));
        self.channel.set_gate(true);
        self.counter.wait_ms(ms);
        self.stop();
    }

    fn stop(&mut self) {
        self.channel.set_gate(false);
    }
}

/// For boards with no tone hardware. Every call returns at once, rests
/// included, so melodies cost nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Sound for Silent {
    fn play(&mut self, _hz: u32, _ms: u32) {}

    fn stop(&mut self) {}

    fn note(&mut self, _name: &str) {}

    fn play_sequence(&mut self, _text: &str) {}
}
