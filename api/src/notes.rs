//! The solfège note table and melody tokenizer.
//!
//! Frequencies are the fourth octave in equal temperament, rounded to the
//! nearest hertz, with A4 at 440 Hz.

/// How long each recognized note sounds.
pub const NOTE_MS: u32 = 450;

/// Silence after every token, so repeated notes stay distinct.
pub const GAP_MS: u32 = 80;

/// Longest token the sequencer looks at. Longer tokens are cut down.
pub const MAX_TOKEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub name: &'static str,
    pub hz: u32,
}

pub const NOTES: [Note; 7] = [
    Note { name: "do", hz: 262 },
    Note { name: "re", hz: 294 },
    Note { name: "mi", hz: 330 },
    Note { name: "fa", hz: 349 },
    Note { name: "sol", hz: 392 },
    Note { name: "la", hz: 440 },
    Note { name: "si", hz: 494 },
];

/// Exact, case-sensitive lookup.
pub fn frequency(name: &str) -> Option<u32> {
    NOTES.iter().find(|n| n.name == name).map(|n| n.hz)
}

/// Split a melody on ASCII spaces.
///
/// Runs of spaces produce no empty tokens. Each token is cut to at most
/// [`MAX_TOKEN`] bytes, backing off to a char boundary for non-ASCII input.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|t| !t.is_empty()).map(truncate)
}

fn truncate(token: &str) -> &str {
    if token.len() <= MAX_TOKEN {
        return token;
    }
    let mut end = MAX_TOKEN;
    while !token.is_char_boundary(end) {
        end -= 1;
    }
    &token[..end]
}
