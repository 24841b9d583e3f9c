use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::decode::OpCode;
use crate::error::{Chip8Error, Fault};
use crate::framebuffer::{FrameBuffer, Snapshot};
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::quirks::Quirks;
use crate::registers::{Registers, Stack, STACK_DEPTH};
use crate::timer::Timers;

/// Whether the instruction stream is advancing or suspended on FX0A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// FX0A executed; the next fresh key press lands in `dest` and resumes
    /// execution. Timers keep ticking while suspended.
    WaitingForKey { dest: u8 },
}

/// Read-only view of the CPU for debuggers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub pc: u16,
    pub i: u16,
    pub v: [u8; 16],
    pub stack: [u16; STACK_DEPTH],
    pub sp: usize,
}

/// The whole machine: memory, registers, call stack, framebuffer, keypad,
/// timers and the execution mode. The host drives it through `step`,
/// `tick_timers`, the key latch and the framebuffer snapshot; nothing else
/// mutates it.
pub struct Emulator {
    mem: Memory,
    regs: Registers,
    stack: Stack,
    fb: FrameBuffer,
    keypad: Keypad,
    timers: Timers,
    mode: Mode,
    quirks: Quirks,
    rng: StdRng,
}

impl Emulator {
    pub fn new(quirks: Quirks) -> Self {
        Self::with_seed(quirks, rand::thread_rng().gen())
    }

    /// Deterministic machine: CXNN draws from a stream fixed by `seed`.
    pub fn with_seed(quirks: Quirks, seed: u64) -> Self {
        Self {
            mem: Memory::new(),
            regs: Registers::new(),
            stack: Stack::new(),
            fb: FrameBuffer::new(),
            keypad: Keypad::new(),
            timers: Timers::new(),
            mode: Mode::Running,
            quirks,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        self.mem.load_rom(rom)
    }

    pub fn framebuffer(&self) -> Snapshot {
        self.fb.snapshot()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Latches a key down. A fresh press (not a held key) also satisfies a
    /// pending FX0A wait.
    pub fn key_press(&mut self, key: u8) {
        if key > 0xF {
            return;
        }
        let was_down = self.keypad.is_pressed(key);
        self.keypad.press(key);
        if was_down {
            return;
        }
        if let Mode::WaitingForKey { dest } = self.mode {
            self.regs.set(dest, key);
            self.mode = Mode::Running;
        }
    }

    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// The 60 Hz entry point. The host calls this on its wall-clock
    /// schedule, never per instruction.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn cpu_state(&self) -> CpuState {
        CpuState {
            pc: self.regs.pc,
            i: self.regs.i,
            v: self.regs.snapshot_v(),
            stack: self.stack.frames(),
            sp: self.stack.depth(),
        }
    }

    /// One fetch-decode-execute cycle. A no-op while waiting on FX0A.
    pub fn step(&mut self) -> Result<(), Fault> {
        if let Mode::WaitingForKey { .. } = self.mode {
            return Ok(());
        }
        let word = self.fetch();
        let op = OpCode::decode(word);
        debug!("{:03X}: {word:04X} {op:?}", self.regs.pc.wrapping_sub(2));
        self.execute(op)
    }

    /// Reads the word at PC and moves PC past it, so jump and call targets
    /// are absolute rather than relative to the pre-advance counter.
    fn fetch(&mut self) -> u16 {
        let hi = self.mem.get(self.regs.pc);
        let lo = self.mem.get(self.regs.pc.wrapping_add(1));
        self.regs.advance_pc();
        u16::from(hi) << 8 | u16::from(lo)
    }

    /// Applies one decoded opcode to the machine state. PC has already
    /// moved past the instruction; only jumps, calls, returns and skips
    /// touch it here.
    pub fn execute(&mut self, op: OpCode) -> Result<(), Fault> {
        match op {
            OpCode::ClearScreen => self.fb.clear(),
            OpCode::Return => {
                self.regs.pc = self.stack.pop()?;
            }
            OpCode::Jump(addr) => self.regs.pc = addr,
            OpCode::Call(addr) => {
                self.stack.push(self.regs.pc)?;
                self.regs.pc = addr;
            }
            OpCode::SkipEqImm(x, nn) => {
                if self.regs.get(x) == nn {
                    self.regs.advance_pc();
                }
            }
            OpCode::SkipNeImm(x, nn) => {
                if self.regs.get(x) != nn {
                    self.regs.advance_pc();
                }
            }
            OpCode::SkipEqReg(x, y) => {
                if self.regs.get(x) == self.regs.get(y) {
                    self.regs.advance_pc();
                }
            }
            OpCode::SkipNeReg(x, y) => {
                if self.regs.get(x) != self.regs.get(y) {
                    self.regs.advance_pc();
                }
            }
            OpCode::SetImm(x, nn) => self.regs.set(x, nn),
            OpCode::AddImm(x, nn) => {
                let sum = self.regs.get(x).wrapping_add(nn);
                self.regs.set(x, sum);
            }
            OpCode::Assign(x, y) => self.regs.set(x, self.regs.get(y)),
            OpCode::Or(x, y) => self.regs.set(x, self.regs.get(x) | self.regs.get(y)),
            OpCode::And(x, y) => self.regs.set(x, self.regs.get(x) & self.regs.get(y)),
            OpCode::Xor(x, y) => self.regs.set(x, self.regs.get(x) ^ self.regs.get(y)),
            OpCode::Add(x, y) => {
                let (sum, carry) = self.regs.get(x).overflowing_add(self.regs.get(y));
                self.regs.set(x, sum);
                self.regs.set_flag(carry as u8);
            }
            OpCode::Sub(x, y) => {
                let (vx, vy) = (self.regs.get(x), self.regs.get(y));
                self.regs.set(x, vx.wrapping_sub(vy));
                self.regs.set_flag((vx >= vy) as u8);
            }
            OpCode::SubReverse(x, y) => {
                let (vx, vy) = (self.regs.get(x), self.regs.get(y));
                self.regs.set(x, vy.wrapping_sub(vx));
                self.regs.set_flag((vy >= vx) as u8);
            }
            OpCode::ShiftRight(x, y) => {
                let value = self.regs.get(self.shift_source(x, y));
                self.regs.set(x, value >> 1);
                self.regs.set_flag(value & 1);
            }
            OpCode::ShiftLeft(x, y) => {
                let value = self.regs.get(self.shift_source(x, y));
                self.regs.set(x, value << 1);
                self.regs.set_flag(value >> 7);
            }
            OpCode::SetIndex(addr) => self.regs.i = addr,
            OpCode::JumpOffset(addr) => {
                let offset = if self.quirks.jump_offset_vx {
                    self.regs.get(((addr >> 8) & 0xF) as u8)
                } else {
                    self.regs.get(0)
                };
                self.regs.pc = addr.wrapping_add(u16::from(offset)) & 0xFFF;
            }
            OpCode::Random(x, nn) => {
                let byte: u8 = self.rng.gen();
                self.regs.set(x, byte & nn);
            }
            OpCode::Draw(x, y, n) => {
                let mut sprite = [0u8; 15];
                for row in 0..usize::from(n) {
                    sprite[row] = self.mem.get(self.regs.i.wrapping_add(row as u16));
                }
                let collision = self.fb.draw_sprite(
                    self.regs.get(x),
                    self.regs.get(y),
                    &sprite[..usize::from(n)],
                    self.quirks.sprite_wrap,
                );
                self.regs.set_flag(collision as u8);
            }
            OpCode::SkipKeyPressed(x) => {
                if self.keypad.is_pressed(self.regs.get(x)) {
                    self.regs.advance_pc();
                }
            }
            OpCode::SkipKeyReleased(x) => {
                if !self.keypad.is_pressed(self.regs.get(x)) {
                    self.regs.advance_pc();
                }
            }
            OpCode::ReadDelay(x) => self.regs.set(x, self.timers.delay),
            OpCode::WaitKey(x) => self.mode = Mode::WaitingForKey { dest: x },
            OpCode::SetDelay(x) => self.timers.delay = self.regs.get(x),
            OpCode::SetSound(x) => self.timers.sound = self.regs.get(x),
            OpCode::AddIndex(x) => {
                self.regs.i = self.regs.i.wrapping_add(u16::from(self.regs.get(x)));
            }
            OpCode::FontGlyph(x) => self.regs.i = Memory::glyph_addr(self.regs.get(x)),
            OpCode::StoreBcd(x) => {
                let value = self.regs.get(x);
                self.mem.set(self.regs.i, value / 100);
                self.mem.set(self.regs.i.wrapping_add(1), value / 10 % 10);
                self.mem.set(self.regs.i.wrapping_add(2), value % 10);
            }
            OpCode::StoreRegisters(x) => {
                for reg in 0..=x {
                    let addr = self.regs.i.wrapping_add(u16::from(reg));
                    self.mem.set(addr, self.regs.get(reg));
                }
            }
            OpCode::LoadRegisters(x) => {
                for reg in 0..=x {
                    let addr = self.regs.i.wrapping_add(u16::from(reg));
                    self.regs.set(reg, self.mem.get(addr));
                }
            }
            OpCode::Unknown(word) => {
                // permissive hardware behavior: advance and keep going
                warn!("unknown opcode {word:04X}, continuing");
            }
        }
        Ok(())
    }

    fn shift_source(&self, x: u8, y: u8) -> u8 {
        if self.quirks.shift_in_place {
            x
        } else {
            y
        }
    }

    #[cfg(test)]
    pub(crate) fn mem_mut(&mut self) -> &mut Memory {
        &mut self.mem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FONT_START;

    fn emu() -> Emulator {
        Emulator::with_seed(Quirks::default(), 0)
    }

    fn run(emu: &mut Emulator, ops: &[OpCode]) {
        for &op in ops {
            emu.execute(op).unwrap();
        }
    }

    #[test]
    fn set_then_add_wraps_and_leaves_vf_alone() {
        for nn in [0x00u8, 0x7F, 0x80, 0xEA, 0xFF] {
            let mut emu = emu();
            emu.execute(OpCode::SetImm(0xF, 0x55)).unwrap();
            run(
                &mut emu,
                &[OpCode::SetImm(0x2, nn), OpCode::AddImm(0x2, nn)],
            );
            assert_eq!(emu.cpu_state().v[0x2], nn.wrapping_add(nn));
            assert_eq!(emu.cpu_state().v[0xF], 0x55);
        }
    }

    #[test]
    fn clear_screen_blanks_any_prior_framebuffer() {
        let mut emu = emu();
        emu.mem_mut().set(0x300, 0xFF);
        run(
            &mut emu,
            &[
                OpCode::SetIndex(0x300),
                OpCode::Draw(0x0, 0x1, 1),
                OpCode::ClearScreen,
            ],
        );
        assert!(emu.framebuffer().iter().flatten().all(|&pixel| !pixel));
    }

    #[test]
    fn call_then_return_restores_the_pc() {
        let mut emu = emu();
        emu.execute(OpCode::Call(0x400)).unwrap();
        assert_eq!(emu.cpu_state().pc, 0x400);
        assert_eq!(emu.cpu_state().sp, 1);
        emu.execute(OpCode::Return).unwrap();
        assert_eq!(emu.cpu_state().pc, 0x200);
        assert_eq!(emu.cpu_state().sp, 0);
    }

    #[test]
    fn seventeenth_nested_call_faults() {
        let mut emu = emu();
        for _ in 0..16 {
            emu.execute(OpCode::Call(0x300)).unwrap();
        }
        assert_eq!(emu.execute(OpCode::Call(0x300)), Err(Fault::StackOverflow));
    }

    #[test]
    fn return_without_call_faults() {
        let mut emu = emu();
        assert_eq!(emu.execute(OpCode::Return), Err(Fault::StackUnderflow));
    }

    #[test]
    fn skips_advance_pc_by_two_when_taken() {
        let mut emu = emu();
        run(
            &mut emu,
            &[OpCode::SetImm(0x1, 0x42), OpCode::SkipEqImm(0x1, 0x42)],
        );
        assert_eq!(emu.cpu_state().pc, 0x202);
        emu.execute(OpCode::SkipEqImm(0x1, 0x43)).unwrap();
        assert_eq!(emu.cpu_state().pc, 0x202);
        emu.execute(OpCode::SkipNeImm(0x1, 0x43)).unwrap();
        assert_eq!(emu.cpu_state().pc, 0x204);
        emu.execute(OpCode::SkipEqReg(0x1, 0x2)).unwrap();
        assert_eq!(emu.cpu_state().pc, 0x204);
        emu.execute(OpCode::SkipNeReg(0x1, 0x2)).unwrap();
        assert_eq!(emu.cpu_state().pc, 0x206);
    }

    #[test]
    fn alu_add_sets_carry_flag() {
        let mut emu = emu();
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x1, 0xFF),
                OpCode::SetImm(0x2, 0x02),
                OpCode::Add(0x1, 0x2),
            ],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0x01);
        assert_eq!(emu.cpu_state().v[0xF], 1);
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x1, 0x01),
                OpCode::SetImm(0x2, 0x02),
                OpCode::Add(0x1, 0x2),
            ],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0x03);
        assert_eq!(emu.cpu_state().v[0xF], 0);
    }

    #[test]
    fn alu_sub_flags_signal_no_borrow() {
        let mut emu = emu();
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x1, 0x05),
                OpCode::SetImm(0x2, 0x03),
                OpCode::Sub(0x1, 0x2),
            ],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0x02);
        assert_eq!(emu.cpu_state().v[0xF], 1);
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x1, 0x03),
                OpCode::SetImm(0x2, 0x05),
                OpCode::SubReverse(0x1, 0x2),
            ],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0x02);
        assert_eq!(emu.cpu_state().v[0xF], 1);
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x1, 0x03),
                OpCode::SetImm(0x2, 0x05),
                OpCode::Sub(0x1, 0x2),
            ],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0xFE);
        assert_eq!(emu.cpu_state().v[0xF], 0);
    }

    #[test]
    fn bitwise_ops_combine_vx_and_vy() {
        let mut emu = emu();
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x1, 0b0110),
                OpCode::SetImm(0x2, 0b0011),
                OpCode::Or(0x1, 0x2),
            ],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0b0111);
        run(
            &mut emu,
            &[OpCode::SetImm(0x1, 0b0110), OpCode::And(0x1, 0x2)],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0b0010);
        run(
            &mut emu,
            &[OpCode::SetImm(0x1, 0b0110), OpCode::Xor(0x1, 0x2)],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0b0101);
    }

    #[test]
    fn shifts_read_vy_by_default() {
        let mut emu = emu();
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x1, 0x00),
                OpCode::SetImm(0x2, 0b1000_0011),
                OpCode::ShiftRight(0x1, 0x2),
            ],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0b0100_0001);
        assert_eq!(emu.cpu_state().v[0xF], 1);
        run(
            &mut emu,
            &[OpCode::SetImm(0x1, 0x00), OpCode::ShiftLeft(0x1, 0x2)],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0b0000_0110);
        assert_eq!(emu.cpu_state().v[0xF], 1);
    }

    #[test]
    fn shifts_read_vx_under_the_quirk() {
        let mut emu = Emulator::with_seed(
            Quirks {
                shift_in_place: true,
                ..Quirks::default()
            },
            0,
        );
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x1, 0b0000_0010),
                OpCode::SetImm(0x2, 0xFF),
                OpCode::ShiftRight(0x1, 0x2),
            ],
        );
        assert_eq!(emu.cpu_state().v[0x1], 0b0000_0001);
        assert_eq!(emu.cpu_state().v[0xF], 0);
    }

    #[test]
    fn jump_offset_uses_v0_by_default() {
        let mut emu = emu();
        run(
            &mut emu,
            &[OpCode::SetImm(0x0, 0x05), OpCode::JumpOffset(0x300)],
        );
        assert_eq!(emu.cpu_state().pc, 0x305);
    }

    #[test]
    fn jump_offset_uses_vx_under_the_quirk() {
        let mut emu = Emulator::with_seed(
            Quirks {
                jump_offset_vx: true,
                ..Quirks::default()
            },
            0,
        );
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x0, 0x05),
                OpCode::SetImm(0x3, 0x10),
                OpCode::JumpOffset(0x300),
            ],
        );
        assert_eq!(emu.cpu_state().pc, 0x310);
    }

    #[test]
    fn random_respects_the_mask() {
        let mut emu = emu();
        for _ in 0..32 {
            emu.execute(OpCode::Random(0x1, 0x0F)).unwrap();
            assert!(emu.cpu_state().v[0x1] <= 0x0F);
        }
    }

    #[test]
    fn seeded_machines_draw_identical_random_streams() {
        let mut a = Emulator::with_seed(Quirks::default(), 42);
        let mut b = Emulator::with_seed(Quirks::default(), 42);
        for _ in 0..8 {
            a.execute(OpCode::Random(0x1, 0xFF)).unwrap();
            b.execute(OpCode::Random(0x1, 0xFF)).unwrap();
            assert_eq!(a.cpu_state().v[0x1], b.cpu_state().v[0x1]);
        }
    }

    #[test]
    fn draw_xors_and_reports_collision() {
        let mut emu = emu();
        emu.mem_mut().set(0x300, 0xFF);
        run(
            &mut emu,
            &[OpCode::SetIndex(0x300), OpCode::Draw(0x0, 0x1, 1)],
        );
        let frame = emu.framebuffer();
        assert!(frame[0][..8].iter().all(|&pixel| pixel));
        assert_eq!(emu.cpu_state().v[0xF], 0);

        emu.execute(OpCode::Draw(0x0, 0x1, 1)).unwrap();
        let frame = emu.framebuffer();
        assert!(frame[0][..8].iter().all(|&pixel| !pixel));
        assert_eq!(emu.cpu_state().v[0xF], 1);
    }

    #[test]
    fn bcd_of_234_writes_its_digits() {
        let mut emu = emu();
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x1, 234),
                OpCode::SetIndex(0x300),
                OpCode::StoreBcd(0x1),
            ],
        );
        let state = emu.cpu_state();
        assert_eq!(state.i, 0x300);
        let mem = emu.mem_mut();
        assert_eq!(
            [mem.get(0x300), mem.get(0x301), mem.get(0x302)],
            [2, 3, 4]
        );
    }

    #[test]
    fn font_glyph_for_digit_zero() {
        let mut emu = emu();
        emu.execute(OpCode::FontGlyph(0x1)).unwrap();
        assert_eq!(emu.cpu_state().i, FONT_START);
        let mem = emu.mem_mut();
        let glyph: Vec<u8> = (FONT_START..FONT_START + 5).map(|a| mem.get(a)).collect();
        assert_eq!(glyph, [0xF0, 0x90, 0x90, 0x90, 0xF0]);
    }

    #[test]
    fn register_block_store_and_load_round_trip() {
        let mut emu = emu();
        run(
            &mut emu,
            &[
                OpCode::SetImm(0x0, 0x11),
                OpCode::SetImm(0x1, 0x22),
                OpCode::SetImm(0x2, 0x33),
                OpCode::SetIndex(0x300),
                OpCode::StoreRegisters(0x2),
                OpCode::SetImm(0x0, 0x00),
                OpCode::SetImm(0x1, 0x00),
                OpCode::SetImm(0x2, 0x00),
                OpCode::LoadRegisters(0x2),
            ],
        );
        let v = emu.cpu_state().v;
        assert_eq!(&v[..4], [0x11, 0x22, 0x33, 0x00]);
        // I itself is left where it was
        assert_eq!(emu.cpu_state().i, 0x300);
    }

    #[test]
    fn timer_moves_go_through_vx() {
        let mut emu = emu();
        run(
            &mut emu,
            &[OpCode::SetImm(0x1, 60), OpCode::SetDelay(0x1), OpCode::SetSound(0x1)],
        );
        assert!(emu.sound_active());
        emu.execute(OpCode::ReadDelay(0x2)).unwrap();
        assert_eq!(emu.cpu_state().v[0x2], 60);
    }

    #[test]
    fn timers_only_move_on_ticks_not_instructions() {
        let mut emu = emu();
        run(&mut emu, &[OpCode::SetImm(0x1, 60), OpCode::SetDelay(0x1)]);
        for _ in 0..100 {
            emu.execute(OpCode::SetImm(0x2, 0x01)).unwrap();
        }
        emu.execute(OpCode::ReadDelay(0x3)).unwrap();
        assert_eq!(emu.cpu_state().v[0x3], 60);
        for _ in 0..60 {
            emu.tick_timers();
        }
        emu.execute(OpCode::ReadDelay(0x3)).unwrap();
        assert_eq!(emu.cpu_state().v[0x3], 0);
    }

    #[test]
    fn add_index_has_no_flag_effect() {
        let mut emu = emu();
        run(
            &mut emu,
            &[
                OpCode::SetImm(0xF, 0x77),
                OpCode::SetImm(0x1, 0x10),
                OpCode::SetIndex(0x300),
                OpCode::AddIndex(0x1),
            ],
        );
        assert_eq!(emu.cpu_state().i, 0x310);
        assert_eq!(emu.cpu_state().v[0xF], 0x77);
    }

    #[test]
    fn key_skips_follow_the_latch() {
        let mut emu = emu();
        emu.execute(OpCode::SetImm(0x1, 0xA)).unwrap();
        emu.key_press(0xA);
        emu.execute(OpCode::SkipKeyPressed(0x1)).unwrap();
        assert_eq!(emu.cpu_state().pc, 0x202);
        emu.key_release(0xA);
        emu.execute(OpCode::SkipKeyReleased(0x1)).unwrap();
        assert_eq!(emu.cpu_state().pc, 0x204);
    }

    #[test]
    fn wait_key_suspends_until_a_fresh_press() {
        let mut emu = emu();
        // FX0A at 0x200, then an infinite loop we should never reach
        emu.load_rom(&[0xF1, 0x0A, 0x12, 0x02]).unwrap();
        emu.step().unwrap();
        assert_eq!(emu.mode(), Mode::WaitingForKey { dest: 0x1 });
        let pc = emu.cpu_state().pc;

        // suspended: stepping goes nowhere, timers keep ticking
        emu.tick_timers();
        emu.step().unwrap();
        assert_eq!(emu.cpu_state().pc, pc);

        emu.key_press(0xB);
        assert_eq!(emu.mode(), Mode::Running);
        assert_eq!(emu.cpu_state().v[0x1], 0xB);
    }

    #[test]
    fn held_key_does_not_satisfy_wait() {
        let mut emu = emu();
        emu.key_press(0x5);
        emu.load_rom(&[0xF1, 0x0A]).unwrap();
        emu.step().unwrap();
        // the host relatches the held key every frame
        emu.key_press(0x5);
        assert_eq!(emu.mode(), Mode::WaitingForKey { dest: 0x1 });
        emu.key_release(0x5);
        emu.key_press(0x5);
        assert_eq!(emu.mode(), Mode::Running);
        assert_eq!(emu.cpu_state().v[0x1], 0x5);
    }

    #[test]
    fn unknown_opcode_is_a_logged_no_op() {
        let mut emu = emu();
        emu.load_rom(&[0x01, 0x23, 0x61, 0x42]).unwrap();
        emu.step().unwrap();
        assert_eq!(emu.cpu_state().pc, 0x202);
        emu.step().unwrap();
        assert_eq!(emu.cpu_state().v[0x1], 0x42);
    }

    #[test]
    fn fetch_advances_before_dispatch() {
        let mut emu = emu();
        // CALL 0x206: the pushed return address must point past the call
        emu.load_rom(&[0x22, 0x06]).unwrap();
        emu.step().unwrap();
        let state = emu.cpu_state();
        assert_eq!(state.pc, 0x206);
        assert_eq!(state.stack[0], 0x202);
    }
}
