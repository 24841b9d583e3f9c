//! Pure decoding of 16-bit instruction words.
//!
//! The top nibble picks the operation family; within a family the fields
//! are fixed: X is nibble 2, Y is nibble 3, N the low nibble, NN the low
//! byte and NNN the low 12 bits. Decoding is total, so every bit pattern
//! maps to some variant, reserved patterns included.

/// A decoded instruction word. Words with no defined meaning come back as
/// `Unknown`, which executes as a logged no-op rather than a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    /// 00E0: turn every pixel off.
    ClearScreen,
    /// 00EE: pop the call stack into the program counter.
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN: push the program counter, then jump.
    Call(u16),
    /// 3XNN
    SkipEqImm(u8, u8),
    /// 4XNN
    SkipNeImm(u8, u8),
    /// 5XY0
    SkipEqReg(u8, u8),
    /// 6XNN
    SetImm(u8, u8),
    /// 7XNN: wraps, never touches VF.
    AddImm(u8, u8),
    /// 8XY0
    Assign(u8, u8),
    /// 8XY1
    Or(u8, u8),
    /// 8XY2
    And(u8, u8),
    /// 8XY3
    Xor(u8, u8),
    /// 8XY4: VF = carry.
    Add(u8, u8),
    /// 8XY5: Vx - Vy, VF = 1 when no borrow.
    Sub(u8, u8),
    /// 8XY6: VF = bit shifted out.
    ShiftRight(u8, u8),
    /// 8XY7: Vy - Vx, VF = 1 when no borrow.
    SubReverse(u8, u8),
    /// 8XYE: VF = bit shifted out.
    ShiftLeft(u8, u8),
    /// 9XY0
    SkipNeReg(u8, u8),
    /// ANNN
    SetIndex(u16),
    /// BNNN: jump to NNN + V0 (quirk-dependent).
    JumpOffset(u16),
    /// CXNN: random byte masked by NN.
    Random(u8, u8),
    /// DXYN: XOR an N-row sprite from memory[I..] at (Vx, Vy).
    Draw(u8, u8, u8),
    /// EX9E
    SkipKeyPressed(u8),
    /// EXA1
    SkipKeyReleased(u8),
    /// FX07
    ReadDelay(u8),
    /// FX0A: suspend until a key goes down, store it in Vx.
    WaitKey(u8),
    /// FX15
    SetDelay(u8),
    /// FX18
    SetSound(u8),
    /// FX1E: no flag effect.
    AddIndex(u8),
    /// FX29: I = font glyph address for the digit in Vx.
    FontGlyph(u8),
    /// FX33: three decimal digits of Vx to memory[I..I+3).
    StoreBcd(u8),
    /// FX55: V0..Vx to memory starting at I.
    StoreRegisters(u8),
    /// FX65: memory starting at I to V0..Vx.
    LoadRegisters(u8),
    /// Anything else; the raw word is kept for diagnostics.
    Unknown(u16),
}

fn x(word: u16) -> u8 {
    ((word >> 8) & 0xF) as u8
}

fn y(word: u16) -> u8 {
    ((word >> 4) & 0xF) as u8
}

fn n(word: u16) -> u8 {
    (word & 0xF) as u8
}

fn nn(word: u16) -> u8 {
    (word & 0xFF) as u8
}

fn nnn(word: u16) -> u16 {
    word & 0xFFF
}

impl OpCode {
    /// Decodes one instruction word. Pure: no state, no faults.
    pub fn decode(word: u16) -> Self {
        match word >> 12 {
            0x0 => match word {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::Return,
                // 0NNN machine-code calls have no machine to call into
                _ => Self::Unknown(word),
            },
            0x1 => Self::Jump(nnn(word)),
            0x2 => Self::Call(nnn(word)),
            0x3 => Self::SkipEqImm(x(word), nn(word)),
            0x4 => Self::SkipNeImm(x(word), nn(word)),
            0x5 if n(word) == 0 => Self::SkipEqReg(x(word), y(word)),
            0x6 => Self::SetImm(x(word), nn(word)),
            0x7 => Self::AddImm(x(word), nn(word)),
            0x8 => match n(word) {
                0x0 => Self::Assign(x(word), y(word)),
                0x1 => Self::Or(x(word), y(word)),
                0x2 => Self::And(x(word), y(word)),
                0x3 => Self::Xor(x(word), y(word)),
                0x4 => Self::Add(x(word), y(word)),
                0x5 => Self::Sub(x(word), y(word)),
                0x6 => Self::ShiftRight(x(word), y(word)),
                0x7 => Self::SubReverse(x(word), y(word)),
                0xE => Self::ShiftLeft(x(word), y(word)),
                _ => Self::Unknown(word),
            },
            0x9 if n(word) == 0 => Self::SkipNeReg(x(word), y(word)),
            0xA => Self::SetIndex(nnn(word)),
            0xB => Self::JumpOffset(nnn(word)),
            0xC => Self::Random(x(word), nn(word)),
            0xD => Self::Draw(x(word), y(word), n(word)),
            0xE => match nn(word) {
                0x9E => Self::SkipKeyPressed(x(word)),
                0xA1 => Self::SkipKeyReleased(x(word)),
                _ => Self::Unknown(word),
            },
            0xF => match nn(word) {
                0x07 => Self::ReadDelay(x(word)),
                0x0A => Self::WaitKey(x(word)),
                0x15 => Self::SetDelay(x(word)),
                0x18 => Self::SetSound(x(word)),
                0x1E => Self::AddIndex(x(word)),
                0x29 => Self::FontGlyph(x(word)),
                0x33 => Self::StoreBcd(x(word)),
                0x55 => Self::StoreRegisters(x(word)),
                0x65 => Self::LoadRegisters(x(word)),
                _ => Self::Unknown(word),
            },
            _ => Self::Unknown(word),
        }
    }
}
