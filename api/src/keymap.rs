//! Scan code set 1 to ASCII.
//!
//! The PS/2 controller reports physical key positions. A keymap decides
//! which character each position produces. Only unshifted make codes are
//! mapped. There is no modifier tracking, so Shift, Ctrl and Alt are
//! simply unmapped keys.

use crate::console::BACKSPACE;

/// Release codes are the make code with this bit set.
pub const RELEASE: u8 = 0x80;

pub struct Keymap {
    name: &'static str,
    table: [u8; 128],
}

impl Keymap {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Character for a raw scan code.
    ///
    /// `None` for key releases and for keys this layout leaves unmapped.
    pub const fn decode(&self, scancode: u8) -> Option<u8> {
        if scancode & RELEASE != 0 {
            return None;
        }
        match self.table[scancode as usize] {
            0 => None,
            ascii => Some(ascii),
        }
    }
}

/// Copy `keys` into consecutive table slots starting at scan code `first`.
const fn place(mut table: [u8; 128], first: u8, keys: &[u8]) -> [u8; 128] {
    let mut i = 0;
    while i < keys.len() {
        table[first as usize + i] = keys[i];
        i += 1;
    }
    table
}

/// Keys both layouts agree on.
const fn common() -> [u8; 128] {
    let mut t = [0u8; 128];
    t = place(t, 0x02, b"1234567890-=");
    t = place(t, 0x0E, &[BACKSPACE, b'\t']);
    t = place(t, 0x1C, b"\n");
    t = place(t, 0x37, b"*");
    t = place(t, 0x39, b" ");
    t
}

/// French layout: A/Q and Z/W swapped, M where QWERTY has the semicolon.
pub static AZERTY: Keymap = Keymap {
    name: "azerty",
    table: {
        let mut t = common();
        t = place(t, 0x10, b"azertyuiop[]");
        t = place(t, 0x1E, b"qsdfghjklm'`");
        t = place(t, 0x2B, b"\\wxcvbn,./");
        t
    },
};

/// US layout.
pub static QWERTY: Keymap = Keymap {
    name: "qwerty",
    table: {
        let mut t = common();
        t = place(t, 0x10, b"qwertyuiop[]");
        t = place(t, 0x1E, b"asdfghjkl;'`");
        t = place(t, 0x2B, b"\\zxcvbnm,./");
        t
    },
};
