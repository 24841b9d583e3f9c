pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// Copy of the whole pixel grid, handed to hosts for rendering.
pub type Snapshot = [[bool; WIDTH]; HEIGHT];

/// The 64x32 monochrome pixel grid. Sprites land via XOR compositing;
/// the draw reports whether any pixel flipped from on to off.
pub struct FrameBuffer {
    pixels: [[bool; WIDTH]; HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: [[false; WIDTH]; HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; WIDTH]; HEIGHT];
    }

    /// XORs `sprite` onto the grid with its origin at (x mod 64, y mod 32),
    /// most significant bit leftmost. Rows and columns past the edge clip
    /// unless `wrap` is set. Returns true on any on-to-off transition.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8], wrap: bool) -> bool {
        let ox = x as usize % WIDTH;
        let oy = y as usize % HEIGHT;
        let mut collision = false;
        for (row, &byte) in sprite.iter().enumerate() {
            let mut py = oy + row;
            if py >= HEIGHT {
                if !wrap {
                    break;
                }
                py %= HEIGHT;
            }
            for bit in 0..8 {
                let mut px = ox + bit;
                if px >= WIDTH {
                    if !wrap {
                        break;
                    }
                    px %= WIDTH;
                }
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let lit = &mut self.pixels[py][px];
                if *lit {
                    collision = true;
                }
                *lit = !*lit;
            }
        }
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    pub fn snapshot(&self) -> Snapshot {
        self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
