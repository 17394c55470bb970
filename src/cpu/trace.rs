//! nestest-style disassembly of the instruction at PC.

use crate::{
    bus::Bus,
    cpu::{
        cpu::Cpu,
        opcodes::{AddressingMode, OPCODES},
    },
};

impl<B: Bus> Cpu<B> {
    /// Format the instruction about to execute the way nestest.log does:
    ///
    /// ```text
    /// C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7
    /// ```
    ///
    /// Operand bytes are fetched through the bus. The log's PPU column and the `= xx` memory
    /// annotations are left out.
    pub fn trace_line(&mut self) -> String {
        let pc = self.pc;
        let opcode = self.bus.read(pc);
        let op = &OPCODES[opcode as usize];

        let bytes: Vec<u8> = (0..op.len as u16)
            .map(|i| self.bus.read(pc.wrapping_add(i)))
            .collect();
        let hex = bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");

        let lo = bytes.get(1).copied().unwrap_or(0);
        let word = u16::from_le_bytes([lo, bytes.get(2).copied().unwrap_or(0)]);
        let operand = match op.mode {
            AddressingMode::Implicit => String::new(),
            AddressingMode::Accumulator => "A".to_string(),
            AddressingMode::Immediate => format!("#${lo:02X}"),
            AddressingMode::ZeroPage => format!("${lo:02X}"),
            AddressingMode::ZeroPageX => format!("${lo:02X},X"),
            AddressingMode::ZeroPageY => format!("${lo:02X},Y"),
            AddressingMode::Relative => {
                let target = pc.wrapping_add(2).wrapping_add(lo as i8 as u16);
                format!("${target:04X}")
            }
            AddressingMode::Absolute => format!("${word:04X}"),
            AddressingMode::AbsoluteX => format!("${word:04X},X"),
            AddressingMode::AbsoluteY => format!("${word:04X},Y"),
            AddressingMode::Indirect => format!("(${word:04X})"),
            AddressingMode::IndexedIndirect => format!("(${lo:02X},X)"),
            AddressingMode::IndirectIndexed => format!("(${lo:02X}),Y"),
        };

        format!(
            "{:04X}  {:<9}{:>4} {:<28}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, hex, op.mnemonic, operand, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }
}
