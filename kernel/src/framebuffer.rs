/* Text grid drawn into a linear framebuffer.
 *
 * For machines (or QEMU displays) without VGA text mode. The console logic
 * still sees an 80x25 `CellGrid`; this module keeps a shadow copy of the
 * cells, since pixels can't be read back as characters, and repaints one
 * 8x16 glyph box per cell write. Glyphs come from the 8x8 font with every
 * row drawn twice.
 *
 * Only 32 bpp framebuffers are supported, which is what Limine sets up.
 */

use exige_api::{Cell, CellGrid, CELLS, WIDTH};
use font8x8::legacy::BASIC_LEGACY;

const GLYPH_WIDTH: usize = 8;
const GLYPH_HEIGHT: usize = 16;
const BYTES_PER_PIXEL: usize = 4;

/// Rows at the bottom of a glyph box used for the cursor underline.
const CURSOR_ROWS: usize = 2;

/// Geometry of the framebuffer the bootloader set up.
#[derive(Clone, Copy)]
pub struct FramebufferInfo {
    pub ptr: *mut u8,
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
}

// The pointer is a fixed MMIO-like mapping, valid for the kernel's lifetime.
unsafe impl Send for FramebufferInfo {}
unsafe impl Sync for FramebufferInfo {}

/// Set once during boot.
pub static FRAMEBUFFER_INFO: spin::Once<FramebufferInfo> = spin::Once::new();

pub struct FramebufferGrid {
    info: FramebufferInfo,
    shadow: [Cell; CELLS],
    cursor: usize,
}

impl FramebufferGrid {
    pub fn new(info: FramebufferInfo) -> Self {
        FramebufferGrid { info, shadow: [Cell::from_raw(0); CELLS], cursor: 0 }
    }

    // Pixels outside the framebuffer are dropped, so a display smaller
    // than 640x400 shows a clipped grid instead of faulting.
    fn put_pixel(&mut self, x: usize, y: usize, rgb: u32) {
        if x >= self.info.width || y >= self.info.height {
            return;
        }
        let offset = y * self.info.pitch + x * BYTES_PER_PIXEL;
        // 0x00RRGGBB stored little-endian is the B, G, R, X byte order.
        unsafe { (self.info.ptr.add(offset) as *mut u32).write_volatile(rgb) };
    }

    fn draw(&mut self, index: usize) {
        let cell = self.shadow[index];
        let fg = cell.attr.foreground().rgb();
        let bg = cell.attr.background().rgb();
        let glyph = BASIC_LEGACY.get(usize::from(cell.byte)).copied().unwrap_or(BASIC_LEGACY[0]);
        let x0 = (index % WIDTH) * GLYPH_WIDTH;
        let y0 = (index / WIDTH) * GLYPH_HEIGHT;
        let underline = index == self.cursor;

        for y in 0..GLYPH_HEIGHT {
            let bits = glyph[y / 2];
            let cursor_row = underline && y >= GLYPH_HEIGHT - CURSOR_ROWS;
            for x in 0..GLYPH_WIDTH {
                let lit = cursor_row || bits & (1 << x) != 0;
                self.put_pixel(x0 + x, y0 + y, if lit { fg } else { bg });
            }
        }
    }
}

impl CellGrid for FramebufferGrid {
    fn write_cell(&mut self, index: usize, cell: Cell) {
        if index < CELLS {
            self.shadow[index] = cell;
            self.draw(index);
        }
    }

    fn read_cell(&self, index: usize) -> Cell {
        self.shadow.get(index).copied().unwrap_or(Cell::from_raw(0))
    }

    fn set_cursor(&mut self, index: u16) {
        let old = self.cursor;
        self.cursor = usize::from(index);
        if old < CELLS {
            self.draw(old);
        }
        if self.cursor < CELLS {
            self.draw(self.cursor);
        }
    }
}
