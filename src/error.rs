use thiserror::Error;

use crate::registers::STACK_DEPTH;

/// Fatal structural faults raised during execution. The machine never
/// recovers from these on its own; the host decides whether to halt or
/// reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("call stack overflow: more than {STACK_DEPTH} nested subroutine calls")]
    StackOverflow,
    #[error("call stack underflow: return with no subroutine call in flight")]
    StackUnderflow,
}

/// Errors surfaced while getting a program into the machine, reported
/// before any state is touched.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("ROM is {size} bytes, but only {max} fit above 0x200")]
    RomTooLarge { size: usize, max: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
