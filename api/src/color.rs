//! Text colors, attribute bytes, and character cells.
//!
//! The PC text grid stores each cell as two bytes: the character code and
//! an attribute byte.
//!
//! ```text
//!   bit  7   : blink
//!   bits 6–4 : background (3 bits → only the first 8 colors)
//!   bits 3–0 : foreground (4 bits → all 16 colors)
//! ```
//!
//! The serial terminal has no attribute bytes, so the same [`Color`] values
//! are translated to ANSI SGR sequences instead.

/// The 16-color text palette, in hardware index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGrey = 7,
    DarkGrey = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    /// Index 14. Light brown on real hardware, rendered as yellow.
    Yellow = 14,
    White = 15,
}

impl Color {
    /// Every palette entry, indexed by its hardware value.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Brown,
        Color::LightGrey,
        Color::DarkGrey,
        Color::LightBlue,
        Color::LightGreen,
        Color::LightCyan,
        Color::LightRed,
        Color::LightMagenta,
        Color::Yellow,
        Color::White,
    ];

    /// Palette entry for a 4-bit index. Upper bits are ignored.
    pub const fn from_index(index: u8) -> Color {
        Color::ALL[(index & 0x0F) as usize]
    }

    /// The name the shell's `color` command accepts for this entry.
    pub const fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Cyan => "cyan",
            Color::Red => "red",
            Color::Magenta => "magenta",
            Color::Brown => "brown",
            Color::LightGrey => "grey",
            Color::DarkGrey => "darkgrey",
            Color::LightBlue => "lightblue",
            Color::LightGreen => "lightgreen",
            Color::LightCyan => "lightcyan",
            Color::LightRed => "lightred",
            Color::LightMagenta => "lightmagenta",
            Color::Yellow => "yellow",
            Color::White => "white",
        }
    }

    /// Look up a palette entry by its shell name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.name() == name)
    }

    /// ANSI SGR parameter for this color as a foreground.
    ///
    /// The hardware palette orders its primaries blue-green-red, ANSI orders
    /// them red-green-blue, hence the shuffle. The bright half maps to the
    /// 90–97 "high intensity" range.
    pub const fn ansi_foreground(self) -> u8 {
        match self {
            Color::Black => 30,
            Color::Blue => 34,
            Color::Green => 32,
            Color::Cyan => 36,
            Color::Red => 31,
            Color::Magenta => 35,
            Color::Brown => 33,
            Color::LightGrey => 37,
            Color::DarkGrey => 90,
            Color::LightBlue => 94,
            Color::LightGreen => 92,
            Color::LightCyan => 96,
            Color::LightRed => 91,
            Color::LightMagenta => 95,
            Color::Yellow => 93,
            Color::White => 97,
        }
    }

    /// ANSI SGR parameter for this color as a background (foreground + 10).
    pub const fn ansi_background(self) -> u8 {
        self.ansi_foreground() + 10
    }

    /// The standard VGA palette in `0x00RRGGBB` form, for pixel backends.
    pub const fn rgb(self) -> u32 {
        match self {
            Color::Black => 0x0000_0000,
            Color::Blue => 0x0000_00AA,
            Color::Green => 0x0000_AA00,
            Color::Cyan => 0x0000_AAAA,
            Color::Red => 0x00AA_0000,
            Color::Magenta => 0x00AA_00AA,
            Color::Brown => 0x00AA_5500,
            Color::LightGrey => 0x00AA_AAAA,
            Color::DarkGrey => 0x0055_5555,
            Color::LightBlue => 0x0055_55FF,
            Color::LightGreen => 0x0055_FF55,
            Color::LightCyan => 0x0055_FFFF,
            Color::LightRed => 0x00FF_5555,
            Color::LightMagenta => 0x00FF_55FF,
            Color::Yellow => 0x00FF_FF55,
            Color::White => 0x00FF_FFFF,
        }
    }
}

/// A packed attribute byte: `blink << 7 | bg << 4 | fg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute(pub u8);

impl Attribute {
    /// Light grey on black, what the BIOS leaves behind.
    pub const DEFAULT: Attribute = Attribute(0x07);

    const BLINK: u8 = 0x80;

    /// Pack a foreground/background pair. Only the low 3 bits of the
    /// background fit; bright backgrounds fold onto their dark twin.
    pub const fn new(fg: Color, bg: Color) -> Self {
        Attribute(((bg as u8 & 0x07) << 4) | (fg as u8 & 0x0F))
    }

    pub const fn foreground(self) -> Color {
        Color::from_index(self.0 & 0x0F)
    }

    pub const fn background(self) -> Color {
        Color::from_index((self.0 >> 4) & 0x07)
    }

    pub const fn blink(self) -> bool {
        self.0 & Self::BLINK != 0
    }

    pub const fn with_blink(self, on: bool) -> Self {
        if on {
            Attribute(self.0 | Self::BLINK)
        } else {
            Attribute(self.0 & !Self::BLINK)
        }
    }

    /// Swap the two nibbles of the byte.
    ///
    /// This is what the flash effect applies to every cell. It swaps
    /// foreground and background (the blink bit travels with the nibble it
    /// lives in), and applying it twice gives back the original byte.
    pub const fn inverted(self) -> Self {
        Attribute(self.0.rotate_left(4))
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Attribute::DEFAULT
    }
}

/// One character cell: the byte shown and the attribute it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub byte: u8,
    pub attr: Attribute,
}

impl Cell {
    pub const fn new(byte: u8, attr: Attribute) -> Self {
        Cell { byte, attr }
    }

    /// A space in the given attribute. Clearing and scrolling leave these behind.
    pub const fn blank(attr: Attribute) -> Self {
        Cell { byte: b' ', attr }
    }

    /// Hardware layout of a text-memory entry: attribute in the high byte.
    pub const fn to_raw(self) -> u16 {
        ((self.attr.0 as u16) << 8) | self.byte as u16
    }

    pub const fn from_raw(raw: u16) -> Self {
        Cell {
            byte: raw as u8,
            attr: Attribute((raw >> 8) as u8),
        }
    }

    pub const fn inverted(self) -> Self {
        Cell {
            byte: self.byte,
            attr: self.attr.inverted(),
        }
    }
}
