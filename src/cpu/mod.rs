//! 6502 CPU emulation for the NES.
//!
//! Table-driven: [`opcodes::OPCODES`] describes every opcode byte and a parallel effect table in
//! `instructions` carries out the operation. Memory and I/O go through the [`Bus`](crate::bus::Bus)
//! trait, so the core runs against the real console bus or a flat test memory alike.

mod addressing;
pub mod cpu;
pub mod flags;
mod instructions;
pub mod opcodes;
mod trace;


pub use cpu::{Cpu, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use opcodes::{AddressingMode, OPCODES, Opcode};
