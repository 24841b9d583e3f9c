/// Sixteen latched key states indexed 0x0..=0xF. The host writes these
/// between cycles; the executor only reads them. Indices above 0xF are a
/// host-side bug and are ignored rather than faulted on.
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Self { keys: [false; 16] }
    }

    pub fn press(&mut self, key: u8) {
        if let Some(slot) = self.keys.get_mut(key as usize) {
            *slot = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(slot) = self.keys.get_mut(key as usize) {
            *slot = false;
        }
    }

    /// Key values read out of a register are clamped to their low nibble.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
