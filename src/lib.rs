//! A CHIP-8 virtual machine.
//!
//! The core is the fetch-decode-execute engine in [`emulator`], built on
//! the memory/register model in [`memory`] and [`registers`]. Everything
//! else is a thin I/O adapter: [`display`] draws framebuffer snapshots in
//! a minifb window, [`keyboard`] latches host keys into the 16-key pad and
//! [`sound`] beeps while the sound timer runs.
//!
//! Hosts drive the machine through four calls: `step` for one instruction,
//! `tick_timers` on a 60 Hz schedule, `key_press`/`key_release` between
//! cycles and `framebuffer` for rendering. The instruction rate and the
//! timer rate are independent clocks; conflating them is the classic
//! emulator bug.

pub use emulator::{CpuState, Emulator, Mode};
pub use error::{Chip8Error, Fault};
pub use quirks::Quirks;

pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod framebuffer;
pub mod keyboard;
pub mod keypad;
pub mod memory;
pub mod quirks;
pub mod registers;
pub mod sound;
pub mod timer;
