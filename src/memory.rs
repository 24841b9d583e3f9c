use crate::error::Chip8Error;

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const FONT_START: u16 = 0x50;
pub const GLYPH_LEN: u16 = 5;

type FontBytes = [u8; 5 * 16];

const DEFAULT_FONT: FontBytes = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// 4k of flat storage. Font data sits at 0x050..0x0A0 (0x000..0x050 is
/// empty by convention), programs at 0x200 and up.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEM_SIZE];
        let start = FONT_START as usize;
        bytes[start..start + DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);
        Self { bytes }
    }

    /// Addresses are masked to the 12-bit space, so a malformed operand
    /// yields a clamped access instead of a panic.
    pub fn get(&self, addr: u16) -> u8 {
        self.bytes[(addr & 0xFFF) as usize]
    }

    pub fn set(&mut self, addr: u16, val: u8) {
        self.bytes[(addr & 0xFFF) as usize] = val;
    }

    /// Copies the ROM verbatim to 0x200. On failure nothing is written.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        let max = MEM_SIZE - PROGRAM_START as usize;
        if rom.len() > max {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Address of the built-in glyph for a hex digit. Values above 0xF are
    /// clamped to their low nibble.
    pub fn glyph_addr(digit: u8) -> u16 {
        FONT_START + GLYPH_LEN * u16::from(digit & 0xF)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_is_loaded_at_0x50() {
        let mem = Memory::new();
        let zero: Vec<u8> = (0x50..0x55).map(|a| mem.get(a)).collect();
        assert_eq!(zero, [0xF0, 0x90, 0x90, 0x90, 0xF0]);
    }

    #[test]
    fn glyph_addr_clamps_to_low_nibble() {
        assert_eq!(Memory::glyph_addr(0x0), 0x50);
        assert_eq!(Memory::glyph_addr(0xF), 0x50 + 5 * 0xF);
        assert_eq!(Memory::glyph_addr(0x1A), Memory::glyph_addr(0xA));
    }

    #[test]
    fn accesses_are_masked_to_the_address_space() {
        let mut mem = Memory::new();
        mem.set(0x1234, 0xAB);
        assert_eq!(mem.get(0x234), 0xAB);
    }

    #[test]
    fn rom_of_maximum_size_loads() {
        let mut mem = Memory::new();
        let rom = vec![0x77; MEM_SIZE - 0x200];
        assert!(mem.load_rom(&rom).is_ok());
        assert_eq!(mem.get(0x200), 0x77);
        assert_eq!(mem.get(0xFFF), 0x77);
    }

    #[test]
    fn oversized_rom_is_rejected_without_touching_memory() {
        let mut mem = Memory::new();
        let rom = vec![0x77; MEM_SIZE - 0x200 + 1];
        assert!(matches!(
            mem.load_rom(&rom),
            Err(Chip8Error::RomTooLarge { size, max }) if size == max + 1
        ));
        assert_eq!(mem.get(0x200), 0x00);
        assert_eq!(mem.get(0xFFF), 0x00);
    }
}
