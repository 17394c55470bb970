//! Effective-address resolution for the 13 addressing modes.
//!
//! See [CPU addressing modes](https://www.nesdev.org/wiki/CPU_addressing_modes).

use crate::{
    bus::Bus,
    cpu::{cpu::Cpu, opcodes::AddressingMode},
};

pub(crate) fn pages_differ(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

impl<B: Bus> Cpu<B> {
    /// Resolve the operand of the instruction at PC.
    ///
    /// Reads operand bytes through the bus but leaves registers untouched. Returns the effective
    /// address and whether indexing crossed a page. Implicit and accumulator modes yield 0.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> (u16, bool) {
        let operand = self.pc.wrapping_add(1);

        match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator => (0, false),
            AddressingMode::Immediate => (operand, false),
            AddressingMode::ZeroPage => (self.bus.read(operand) as u16, false),
            AddressingMode::ZeroPageX => (self.bus.read(operand).wrapping_add(self.x) as u16, false),
            AddressingMode::ZeroPageY => (self.bus.read(operand).wrapping_add(self.y) as u16, false),
            AddressingMode::Relative => {
                let offset = self.bus.read(operand) as i8;
                let next = self.pc.wrapping_add(2);
                (next.wrapping_add(offset as u16), false)
            }
            AddressingMode::Absolute => (self.read_word(operand), false),
            AddressingMode::AbsoluteX => {
                let base = self.read_word(operand);
                let addr = base.wrapping_add(self.x as u16);
                (addr, pages_differ(base, addr))
            }
            AddressingMode::AbsoluteY => {
                let base = self.read_word(operand);
                let addr = base.wrapping_add(self.y as u16);
                (addr, pages_differ(base, addr))
            }
            AddressingMode::Indirect => {
                // JMP ($xxFF) fetches the high byte from $xx00
                let ptr = self.read_word(operand);
                (self.read_word_in_page(ptr), false)
            }
            AddressingMode::IndexedIndirect => {
                let ptr = self.bus.read(operand).wrapping_add(self.x);
                (self.read_word_in_page(ptr as u16), false)
            }
            AddressingMode::IndirectIndexed => {
                let ptr = self.bus.read(operand);
                let base = self.read_word_in_page(ptr as u16);
                let addr = base.wrapping_add(self.y as u16);
                (addr, pages_differ(base, addr))
            }
        }
    }
}
