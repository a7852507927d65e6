//! Console output: the cursor automaton and the cell-grid console.
//!
//! Placement, wrap and scroll are decided in one place, [`Cursor::advance`].
//! It reports what changed as a [`Step`], and each backend turns the step into
//! its own side effects. [`GridConsole`] writes cells and scrolls rows.
//! [`TerminalConsole`](crate::terminal::TerminalConsole) emits bytes. Both
//! therefore agree on where every character lands.

use core::fmt;

use crate::color::{Attribute, Cell, Color};
use crate::hal::{CellGrid, CounterSource};
use crate::{CELLS, HEIGHT, WIDTH};

/// The backspace control byte. It moves the cursor left and blanks the cell.
pub const BACKSPACE: u8 = 0x08;

/// How long [`Screen::flash`] keeps the inverted state on screen.
pub const FLASH_HOLD_MS: u32 = 150;

/// A cell coordinate. `row < HEIGHT` and `col < WIDTH` always hold for
/// positions handed out by [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    /// Linear index into the grid, the form the hardware cursor takes.
    pub const fn index(self) -> usize {
        self.row * WIDTH + self.col
    }
}

/// The single cell edit caused by one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Write the byte at this position in the current attribute.
    Put(Position, u8),
    /// Blank the cell at this position in the current attribute.
    Erase(Position),
    /// No cell changed. The cursor may have moved.
    Moved,
}

/// Outcome of [`Cursor::advance`]. Apply `edit` first, then scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub edit: Edit,
    pub scrolled: bool,
}

/// The cursor state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    pub const fn new() -> Self {
        Cursor { pos: Position::ORIGIN }
    }

    pub const fn position(&self) -> Position {
        self.pos
    }

    pub fn home(&mut self) {
        self.pos = Position::ORIGIN;
    }

    /// Feed one byte through the automaton.
    ///
    /// `\n` goes to the start of the next row, `\r` to the start of this
    /// one. Backspace steps left and erases, except at column 0 where it
    /// does nothing. Anything else is written where the cursor stands and
    /// the cursor moves right, wrapping at `WIDTH`. Reaching row `HEIGHT`
    /// requests a scroll and pins the cursor to the last row.
    pub fn advance(&mut self, byte: u8) -> Step {
        let edit = match byte {
            b'\n' => {
                self.pos.col = 0;
                self.pos.row += 1;
                Edit::Moved
            }
            b'\r' => {
                self.pos.col = 0;
                Edit::Moved
            }
            BACKSPACE => {
                if self.pos.col == 0 {
                    Edit::Moved
                } else {
                    self.pos.col -= 1;
                    Edit::Erase(self.pos)
                }
            }
            _ => {
                let at = self.pos;
                self.pos.col += 1;
                if self.pos.col == WIDTH {
                    self.pos.col = 0;
                    self.pos.row += 1;
                }
                Edit::Put(at, byte)
            }
        };

        let scrolled = self.pos.row == HEIGHT;
        if scrolled {
            self.pos.row = HEIGHT - 1;
        }
        Step { edit, scrolled }
    }
}

/// What [`Screen::flash`] can invert on a given backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashScope {
    /// Every cell's own attribute is swapped and later restored.
    PerCell,
    /// The whole display toggles reverse video. Individual cells are not
    /// addressable, so their attributes are never read.
    WholeScreen,
}

/// A text console of `WIDTH × HEIGHT` cells.
///
/// Every operation is synchronous and infallible. `fmt::Write` is a
/// supertrait so callers can `write!` formatted numbers without an
/// allocator.
pub trait Screen: fmt::Write {
    /// What this backend's [`flash`](Screen::flash) operates on.
    const FLASH_SCOPE: FlashScope;

    /// Default attribute, cleared grid, cursor at the origin. Idempotent.
    fn init(&mut self);

    /// Blank every cell in the current attribute and home the cursor.
    fn clear(&mut self);

    fn put_char(&mut self, byte: u8);

    fn print(&mut self, text: &str) {
        for byte in text.bytes() {
            self.put_char(byte);
        }
    }

    fn newline(&mut self) {
        self.put_char(b'\n');
    }

    /// Affects later writes only. Existing cells keep their colors.
    fn set_color(&mut self, fg: Color, bg: Color);

    /// Invert the display, hold for [`FLASH_HOLD_MS`], and restore it.
    fn flash(&mut self);

    fn cursor(&self) -> Position;

    fn attribute(&self) -> Attribute;
}

/// Console backed by an addressable cell grid with a hardware cursor.
pub struct GridConsole<G, C> {
    grid: G,
    counter: C,
    cursor: Cursor,
    attr: Attribute,
}

impl<G: CellGrid, C: CounterSource> GridConsole<G, C> {
    /// Wrap a grid. Call [`Screen::init`] before first use.
    pub const fn new(grid: G, counter: C) -> Self {
        GridConsole {
            grid,
            counter,
            cursor: Cursor::new(),
            attr: Attribute::DEFAULT,
        }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn counter(&mut self) -> &mut C {
        &mut self.counter
    }

    /// Shift rows 1.. up by one and blank the last row.
    fn scroll(&mut self) {
        for index in WIDTH..CELLS {
            let cell = self.grid.read_cell(index);
            self.grid.write_cell(index - WIDTH, cell);
        }
        let blank = Cell::blank(self.attr);
        for index in CELLS - WIDTH..CELLS {
            self.grid.write_cell(index, blank);
        }
    }

    fn invert_all(&mut self) {
        for index in 0..CELLS {
            let cell = self.grid.read_cell(index);
            self.grid.write_cell(index, cell.inverted());
        }
    }

    fn sync_cursor(&mut self) {
        // Largest index is CELLS - 1 = 1999, well inside u16.
        self.grid.set_cursor(self.cursor.position().index() as u16);
    }
}

impl<G: CellGrid, C: CounterSource> Screen for GridConsole<G, C> {
    const FLASH_SCOPE: FlashScope = FlashScope::PerCell;

    fn init(&mut self) {
        self.attr = Attribute::DEFAULT;
        self.clear();
    }

    fn clear(&mut self) {
        let blank = Cell::blank(self.attr);
        for index in 0..CELLS {
            self.grid.write_cell(index, blank);
        }
        self.cursor.home();
        self.sync_cursor();
    }

    fn put_char(&mut self, byte: u8) {
        let step = self.cursor.advance(byte);
        match step.edit {
            Edit::Put(at, b) => self.grid.write_cell(at.index(), Cell::new(b, self.attr)),
            Edit::Erase(at) => self.grid.write_cell(at.index(), Cell::blank(self.attr)),
            Edit::Moved => {}
        }
        if step.scrolled {
            self.scroll();
        }
        self.sync_cursor();
    }

    fn set_color(&mut self, fg: Color, bg: Color) {
        self.attr = Attribute::new(fg, bg);
    }

    fn flash(&mut self) {
        self.invert_all();
        self.counter.wait_ms(FLASH_HOLD_MS);
        self.invert_all();
    }

    fn cursor(&self) -> Position {
        self.cursor.position()
    }

    fn attribute(&self) -> Attribute {
        self.attr
    }
}

impl<G: CellGrid, C: CounterSource> fmt::Write for GridConsole<G, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryGrid, PitCounter};
    use core::fmt::Write;
    use proptest::prelude::*;

    fn console() -> GridConsole<MemoryGrid, PitCounter> {
        let mut console = GridConsole::new(MemoryGrid::new(), PitCounter::default());
        console.init();
        console
    }

    #[test]
    fn init_blanks_grid_and_homes_cursor() {
        let mut console = GridConsole::new(MemoryGrid::filled(Cell::from_raw(0x4E41)), PitCounter::default());
        console.set_color(Color::Red, Color::Green);
        console.init();
        assert_eq!(console.attribute(), Attribute::DEFAULT);
        assert!(console.grid().cells().iter().all(|&c| c == Cell::blank(Attribute::DEFAULT)));
        assert_eq!(console.cursor(), Position::ORIGIN);
        assert_eq!(console.grid().hardware_cursor(), Some(0));
    }

    #[test]
    fn text_lands_left_to_right_and_cursor_follows() {
        let mut console = console();
        console.print("Kernel# ");
        assert_eq!(console.grid().row_text(0).trim_end(), "Kernel#");
        assert_eq!(console.cursor(), Position { row: 0, col: 8 });
        assert_eq!(console.grid().hardware_cursor(), Some(8));
    }

    #[test]
    fn newline_and_carriage_return() {
        let mut console = console();
        console.print("abc\ndef\rX");
        assert_eq!(console.grid().row_text(0).trim_end(), "abc");
        assert_eq!(console.grid().row_text(1).trim_end(), "Xef");
        assert_eq!(console.cursor(), Position { row: 1, col: 1 });
    }

    #[test]
    fn wraps_at_last_column() {
        let mut console = console();
        for _ in 0..WIDTH {
            console.put_char(b'x');
        }
        assert_eq!(console.cursor(), Position { row: 1, col: 0 });
        console.put_char(b'y');
        assert_eq!(console.grid().cell(1, 0).byte, b'y');
    }

    #[test]
    fn backspace_erases_previous_cell_in_current_color() {
        let mut console = console();
        console.print("ab");
        console.set_color(Color::White, Color::Blue);
        console.put_char(BACKSPACE);
        assert_eq!(console.cursor(), Position { row: 0, col: 1 });
        assert_eq!(console.grid().cell(0, 1), Cell::blank(Attribute(0x1F)));
        assert_eq!(console.grid().cell(0, 0).byte, b'a');
    }

    #[test]
    fn backspace_at_column_zero_is_a_no_op() {
        let mut console = console();
        console.print("ab\n");
        let before = console.grid().clone();
        console.put_char(BACKSPACE);
        assert_eq!(console.cursor(), Position { row: 1, col: 0 });
        assert_eq!(console.grid().cells(), before.cells());
    }

    #[test]
    fn writing_one_line_too_many_evicts_the_first() {
        let mut console = console();
        for line in 0..=HEIGHT {
            writeln!(console, "line {line:02}").unwrap();
        }
        // The trailing newline of the last line scrolled once more.
        assert_eq!(console.grid().row_text(0).trim_end(), "line 02");
        assert_eq!(console.grid().row_text(HEIGHT - 2).trim_end(), "line 25");
        assert_eq!(console.grid().row_text(HEIGHT - 1).trim_end(), "");
        assert_eq!(console.cursor(), Position { row: HEIGHT - 1, col: 0 });
    }

    #[test]
    fn scroll_keeps_line_order_and_blanks_last_row_in_current_color() {
        let mut console = console();
        for line in 0..HEIGHT {
            write!(console, "{line}").unwrap();
            if line + 1 < HEIGHT {
                console.newline();
            }
        }
        assert_eq!(console.grid().row_text(0).trim_end(), "0");
        console.set_color(Color::Yellow, Color::Red);
        console.newline();
        for row in 0..HEIGHT - 1 {
            assert_eq!(console.grid().row_text(row).trim_end(), (row + 1).to_string());
        }
        let last = console.grid().cell(HEIGHT - 1, 0);
        assert_eq!(last, Cell::blank(Attribute::new(Color::Yellow, Color::Red)));
        assert_eq!(console.cursor().row, HEIGHT - 1);
    }

    #[test]
    fn writing_the_last_cell_scrolls_immediately() {
        let mut console = console();
        for _ in 0..CELLS - 1 {
            console.put_char(b'.');
        }
        assert_eq!(console.cursor(), Position { row: HEIGHT - 1, col: WIDTH - 1 });
        console.put_char(b'!');
        assert_eq!(console.cursor(), Position { row: HEIGHT - 1, col: 0 });
        assert_eq!(console.grid().cell(HEIGHT - 2, WIDTH - 1).byte, b'!');
        assert_eq!(console.grid().row_text(HEIGHT - 1).trim_end(), "");
    }

    #[test]
    fn set_color_alone_does_not_repaint() {
        let mut console = console();
        console.print("hello");
        console.set_color(Color::Black, Color::Cyan);
        assert!(console.grid().cells().iter().all(|c| c.attr == Attribute::DEFAULT));
    }

    #[test]
    fn set_color_then_clear_repaints_everything() {
        let mut console = console();
        console.print("hello");
        console.set_color(Color::Black, Color::Cyan);
        console.clear();
        let attr = Attribute::new(Color::Black, Color::Cyan);
        assert!(console.grid().cells().iter().all(|&c| c == Cell::blank(attr)));
        assert_eq!(console.cursor(), Position::ORIGIN);
    }

    #[test]
    fn flash_waits_on_the_counter() {
        let mut console = console();
        console.print("beep");
        console.flash();
        assert!(console.counter().ticks_consumed() >= u64::from(FLASH_HOLD_MS) * 1193);
        assert_eq!(console.grid().row_text(0).trim_end(), "beep");
    }

    #[test]
    fn flash_scope_is_per_cell() {
        assert_eq!(<GridConsole<MemoryGrid, PitCounter> as Screen>::FLASH_SCOPE, FlashScope::PerCell);
    }

    /// Model of the visible grid after printing `text` with no control bytes.
    fn expected_layout(text: &[u8]) -> Vec<u8> {
        let last_row = text.len() / WIDTH;
        let scrolls = last_row.saturating_sub(HEIGHT - 1);
        (0..CELLS)
            .map(|i| text.get(scrolls * WIDTH + i).copied().unwrap_or(b' '))
            .collect()
    }

    proptest! {
        #[test]
        fn printable_text_lays_out_with_wrap_and_scroll(text in "[ -~]{0,2300}") {
            let mut console = console();
            console.print(&text);
            let shown: Vec<u8> = console.grid().cells().iter().map(|c| c.byte).collect();
            prop_assert_eq!(shown, expected_layout(text.as_bytes()));
            let cursor = console.cursor();
            prop_assert!(cursor.row < HEIGHT && cursor.col < WIDTH);
            prop_assert_eq!(cursor.col, text.len() % WIDTH);
        }

        #[test]
        fn flash_restores_every_cell(raw in proptest::collection::vec(any::<u16>(), CELLS)) {
            let mut grid = MemoryGrid::new();
            for (i, &r) in raw.iter().enumerate() {
                grid.write_cell(i, Cell::from_raw(r));
            }
            let before = grid.clone();
            let mut console = GridConsole::new(grid, PitCounter::default());
            console.flash();
            prop_assert_eq!(console.grid().cells(), before.cells());
        }

        #[test]
        fn cursor_stays_in_bounds(bytes in proptest::collection::vec(any::<u8>(), 0..3000)) {
            let mut cursor = Cursor::new();
            for b in bytes {
                cursor.advance(b);
                let pos = cursor.position();
                prop_assert!(pos.row < HEIGHT && pos.col < WIDTH);
            }
        }
    }
}
