use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use crate::framebuffer::{Snapshot, HEIGHT, WIDTH};

const OFF_COLOR: u32 = 0x000000;
const ON_COLOR: u32 = 0x007FFF;

/// minifb window that renders framebuffer snapshots. Carries no machine
/// state; any other renderer could stand in for it.
pub struct Screen {
    buffer: Vec<u32>,
    pub window: Window,
}

impl Screen {
    pub fn new() -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "chipvm - ESC to exit",
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale: Scale::X16,
                ..WindowOptions::default()
            },
        )?;
        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));
        Ok(Self {
            buffer: vec![0; WIDTH * HEIGHT],
            window,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    pub fn present(&mut self, frame: &Snapshot) -> Result<(), minifb::Error> {
        for (y, row) in frame.iter().enumerate() {
            for (x, &lit) in row.iter().enumerate() {
                self.buffer[y * WIDTH + x] = if lit { ON_COLOR } else { OFF_COLOR };
            }
        }
        self.window.update_with_buffer(&self.buffer, WIDTH, HEIGHT)
    }
}
