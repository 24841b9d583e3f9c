use crate::error::Fault;
use crate::memory::PROGRAM_START;

pub const STACK_DEPTH: usize = 16;

/// Register number of the carry/borrow/collision flag.
pub const FLAG: u8 = 0xF;

/// V0..VF plus the index register and the program counter. Register
/// numbers are masked to their low nibble, so a malformed operand reads
/// or writes some real register rather than panicking.
pub struct Registers {
    v: [u8; 16],
    pub i: u16,
    pub pc: u16,
}

impl Registers {
    pub fn new() -> Self {
        Self {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
        }
    }

    pub fn get(&self, reg: u8) -> u8 {
        self.v[(reg & 0xF) as usize]
    }

    pub fn set(&mut self, reg: u8, value: u8) {
        self.v[(reg & 0xF) as usize] = value;
    }

    /// Writes VF in its role as the carry/borrow/collision flag. Always
    /// the last write of an instruction, so VF-as-operand reads see the
    /// pre-instruction value.
    pub fn set_flag(&mut self, value: u8) {
        self.v[FLAG as usize] = value;
    }

    /// Moves past the current instruction (or skips the next one). Keeps
    /// the counter inside the 12-bit address space.
    pub fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2) & 0xFFF;
    }

    pub fn snapshot_v(&self) -> [u8; 16] {
        self.v
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded return-address stack. Pushing a 17th frame or popping an empty
/// stack is a structural fault, not a panic.
pub struct Stack {
    frames: [u16; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            frames: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        if self.sp == STACK_DEPTH {
            return Err(Fault::StackOverflow);
        }
        self.frames[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.frames[self.sp])
    }

    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn frames(&self) -> [u16; STACK_DEPTH] {
        self.frames
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
