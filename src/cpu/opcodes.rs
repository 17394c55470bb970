//! The 256-entry opcode table.
//!
//! Each opcode byte maps to a mnemonic (diagnostics only), an addressing mode, a base cycle
//! count, the extra cycle charged when an indexed read crosses a page, and the instruction
//! length. Undocumented opcodes keep their NMOS length and timing but execute as no-ops; their
//! mnemonics carry a `*` the way nestest prints them. `$EB` is the one undocumented opcode with a
//! real effect: it is an alias of `SBC #imm`.

/// 6502 addressing modes. See [CPU addressing modes](https://www.nesdev.org/wiki/CPU_addressing_modes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    /// Signed 8-bit offset from the following instruction.
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// `JMP ($xxxx)` only; reproduces the page-wrap bug.
    Indirect,
    /// `($zz,X)`
    IndexedIndirect,
    /// `($zz),Y`
    IndirectIndexed,
}

impl AddressingMode {
    /// Instruction length in bytes, opcode included.
    pub const fn len(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    pub cycles: u8,
    /// Added to `cycles` when the effective address lands on another page.
    pub page_cycles: u8,
    pub len: u8,
}

const fn op(mnemonic: &'static str, mode: AddressingMode, cycles: u8, page_cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        page_cycles,
        len: mode.len(),
    }
}

const IMP: AddressingMode = AddressingMode::Implicit;
const ACC: AddressingMode = AddressingMode::Accumulator;
const IMM: AddressingMode = AddressingMode::Immediate;
const ZP0: AddressingMode = AddressingMode::ZeroPage;
const ZPX: AddressingMode = AddressingMode::ZeroPageX;
const ZPY: AddressingMode = AddressingMode::ZeroPageY;
const REL: AddressingMode = AddressingMode::Relative;
const ABS: AddressingMode = AddressingMode::Absolute;
const ABX: AddressingMode = AddressingMode::AbsoluteX;
const ABY: AddressingMode = AddressingMode::AbsoluteY;
const IND: AddressingMode = AddressingMode::Indirect;
const IZX: AddressingMode = AddressingMode::IndexedIndirect;
const IZY: AddressingMode = AddressingMode::IndirectIndexed;

#[rustfmt::skip]
pub static OPCODES: [Opcode; 256] = [
    // 0x00
    op("BRK", IMP, 7, 0), op("ORA", IZX, 6, 0), op("*KIL", IMP, 2, 0), op("*SLO", IZX, 8, 0),
    op("*NOP", ZP0, 3, 0), op("ORA", ZP0, 3, 0), op("ASL", ZP0, 5, 0), op("*SLO", ZP0, 5, 0),
    op("PHP", IMP, 3, 0), op("ORA", IMM, 2, 0), op("ASL", ACC, 2, 0), op("*ANC", IMM, 2, 0),
    op("*NOP", ABS, 4, 0), op("ORA", ABS, 4, 0), op("ASL", ABS, 6, 0), op("*SLO", ABS, 6, 0),
    // 0x10
    op("BPL", REL, 2, 1), op("ORA", IZY, 5, 1), op("*KIL", IMP, 2, 0), op("*SLO", IZY, 8, 0),
    op("*NOP", ZPX, 4, 0), op("ORA", ZPX, 4, 0), op("ASL", ZPX, 6, 0), op("*SLO", ZPX, 6, 0),
    op("CLC", IMP, 2, 0), op("ORA", ABY, 4, 1), op("*NOP", IMP, 2, 0), op("*SLO", ABY, 7, 0),
    op("*NOP", ABX, 4, 1), op("ORA", ABX, 4, 1), op("ASL", ABX, 7, 0), op("*SLO", ABX, 7, 0),
    // 0x20
    op("JSR", ABS, 6, 0), op("AND", IZX, 6, 0), op("*KIL", IMP, 2, 0), op("*RLA", IZX, 8, 0),
    op("BIT", ZP0, 3, 0), op("AND", ZP0, 3, 0), op("ROL", ZP0, 5, 0), op("*RLA", ZP0, 5, 0),
    op("PLP", IMP, 4, 0), op("AND", IMM, 2, 0), op("ROL", ACC, 2, 0), op("*ANC", IMM, 2, 0),
    op("BIT", ABS, 4, 0), op("AND", ABS, 4, 0), op("ROL", ABS, 6, 0), op("*RLA", ABS, 6, 0),
    // 0x30
    op("BMI", REL, 2, 1), op("AND", IZY, 5, 1), op("*KIL", IMP, 2, 0), op("*RLA", IZY, 8, 0),
    op("*NOP", ZPX, 4, 0), op("AND", ZPX, 4, 0), op("ROL", ZPX, 6, 0), op("*RLA", ZPX, 6, 0),
    op("SEC", IMP, 2, 0), op("AND", ABY, 4, 1), op("*NOP", IMP, 2, 0), op("*RLA", ABY, 7, 0),
    op("*NOP", ABX, 4, 1), op("AND", ABX, 4, 1), op("ROL", ABX, 7, 0), op("*RLA", ABX, 7, 0),
    // 0x40
    op("RTI", IMP, 6, 0), op("EOR", IZX, 6, 0), op("*KIL", IMP, 2, 0), op("*SRE", IZX, 8, 0),
    op("*NOP", ZP0, 3, 0), op("EOR", ZP0, 3, 0), op("LSR", ZP0, 5, 0), op("*SRE", ZP0, 5, 0),
    op("PHA", IMP, 3, 0), op("EOR", IMM, 2, 0), op("LSR", ACC, 2, 0), op("*ALR", IMM, 2, 0),
    op("JMP", ABS, 3, 0), op("EOR", ABS, 4, 0), op("LSR", ABS, 6, 0), op("*SRE", ABS, 6, 0),
    // 0x50
    op("BVC", REL, 2, 1), op("EOR", IZY, 5, 1), op("*KIL", IMP, 2, 0), op("*SRE", IZY, 8, 0),
    op("*NOP", ZPX, 4, 0), op("EOR", ZPX, 4, 0), op("LSR", ZPX, 6, 0), op("*SRE", ZPX, 6, 0),
    op("CLI", IMP, 2, 0), op("EOR", ABY, 4, 1), op("*NOP", IMP, 2, 0), op("*SRE", ABY, 7, 0),
    op("*NOP", ABX, 4, 1), op("EOR", ABX, 4, 1), op("LSR", ABX, 7, 0), op("*SRE", ABX, 7, 0),
    // 0x60
    op("RTS", IMP, 6, 0), op("ADC", IZX, 6, 0), op("*KIL", IMP, 2, 0), op("*RRA", IZX, 8, 0),
    op("*NOP", ZP0, 3, 0), op("ADC", ZP0, 3, 0), op("ROR", ZP0, 5, 0), op("*RRA", ZP0, 5, 0),
    op("PLA", IMP, 4, 0), op("ADC", IMM, 2, 0), op("ROR", ACC, 2, 0), op("*ARR", IMM, 2, 0),
    op("JMP", IND, 5, 0), op("ADC", ABS, 4, 0), op("ROR", ABS, 6, 0), op("*RRA", ABS, 6, 0),
    // 0x70
    op("BVS", REL, 2, 1), op("ADC", IZY, 5, 1), op("*KIL", IMP, 2, 0), op("*RRA", IZY, 8, 0),
    op("*NOP", ZPX, 4, 0), op("ADC", ZPX, 4, 0), op("ROR", ZPX, 6, 0), op("*RRA", ZPX, 6, 0),
    op("SEI", IMP, 2, 0), op("ADC", ABY, 4, 1), op("*NOP", IMP, 2, 0), op("*RRA", ABY, 7, 0),
    op("*NOP", ABX, 4, 1), op("ADC", ABX, 4, 1), op("ROR", ABX, 7, 0), op("*RRA", ABX, 7, 0),
    // 0x80
    op("*NOP", IMM, 2, 0), op("STA", IZX, 6, 0), op("*NOP", IMM, 2, 0), op("*SAX", IZX, 6, 0),
    op("STY", ZP0, 3, 0), op("STA", ZP0, 3, 0), op("STX", ZP0, 3, 0), op("*SAX", ZP0, 3, 0),
    op("DEY", IMP, 2, 0), op("*NOP", IMM, 2, 0), op("TXA", IMP, 2, 0), op("*XAA", IMM, 2, 0),
    op("STY", ABS, 4, 0), op("STA", ABS, 4, 0), op("STX", ABS, 4, 0), op("*SAX", ABS, 4, 0),
    // 0x90
    op("BCC", REL, 2, 1), op("STA", IZY, 6, 0), op("*KIL", IMP, 2, 0), op("*AHX", IZY, 6, 0),
    op("STY", ZPX, 4, 0), op("STA", ZPX, 4, 0), op("STX", ZPY, 4, 0), op("*SAX", ZPY, 4, 0),
    op("TYA", IMP, 2, 0), op("STA", ABY, 5, 0), op("TXS", IMP, 2, 0), op("*TAS", ABY, 5, 0),
    op("*SHY", ABX, 5, 0), op("STA", ABX, 5, 0), op("*SHX", ABY, 5, 0), op("*AHX", ABY, 5, 0),
    // 0xA0
    op("LDY", IMM, 2, 0), op("LDA", IZX, 6, 0), op("LDX", IMM, 2, 0), op("*LAX", IZX, 6, 0),
    op("LDY", ZP0, 3, 0), op("LDA", ZP0, 3, 0), op("LDX", ZP0, 3, 0), op("*LAX", ZP0, 3, 0),
    op("TAY", IMP, 2, 0), op("LDA", IMM, 2, 0), op("TAX", IMP, 2, 0), op("*LAX", IMM, 2, 0),
    op("LDY", ABS, 4, 0), op("LDA", ABS, 4, 0), op("LDX", ABS, 4, 0), op("*LAX", ABS, 4, 0),
    // 0xB0
    op("BCS", REL, 2, 1), op("LDA", IZY, 5, 1), op("*KIL", IMP, 2, 0), op("*LAX", IZY, 5, 1),
    op("LDY", ZPX, 4, 0), op("LDA", ZPX, 4, 0), op("LDX", ZPY, 4, 0), op("*LAX", ZPY, 4, 0),
    op("CLV", IMP, 2, 0), op("LDA", ABY, 4, 1), op("TSX", IMP, 2, 0), op("*LAS", ABY, 4, 1),
    op("LDY", ABX, 4, 1), op("LDA", ABX, 4, 1), op("LDX", ABY, 4, 1), op("*LAX", ABY, 4, 1),
    // 0xC0
    op("CPY", IMM, 2, 0), op("CMP", IZX, 6, 0), op("*NOP", IMM, 2, 0), op("*DCP", IZX, 8, 0),
    op("CPY", ZP0, 3, 0), op("CMP", ZP0, 3, 0), op("DEC", ZP0, 5, 0), op("*DCP", ZP0, 5, 0),
    op("INY", IMP, 2, 0), op("CMP", IMM, 2, 0), op("DEX", IMP, 2, 0), op("*AXS", IMM, 2, 0),
    op("CPY", ABS, 4, 0), op("CMP", ABS, 4, 0), op("DEC", ABS, 6, 0), op("*DCP", ABS, 6, 0),
    // 0xD0
    op("BNE", REL, 2, 1), op("CMP", IZY, 5, 1), op("*KIL", IMP, 2, 0), op("*DCP", IZY, 8, 0),
    op("*NOP", ZPX, 4, 0), op("CMP", ZPX, 4, 0), op("DEC", ZPX, 6, 0), op("*DCP", ZPX, 6, 0),
    op("CLD", IMP, 2, 0), op("CMP", ABY, 4, 1), op("*NOP", IMP, 2, 0), op("*DCP", ABY, 7, 0),
    op("*NOP", ABX, 4, 1), op("CMP", ABX, 4, 1), op("DEC", ABX, 7, 0), op("*DCP", ABX, 7, 0),
    // 0xE0
    op("CPX", IMM, 2, 0), op("SBC", IZX, 6, 0), op("*NOP", IMM, 2, 0), op("*ISB", IZX, 8, 0),
    op("CPX", ZP0, 3, 0), op("SBC", ZP0, 3, 0), op("INC", ZP0, 5, 0), op("*ISB", ZP0, 5, 0),
    op("INX", IMP, 2, 0), op("SBC", IMM, 2, 0), op("NOP", IMP, 2, 0), op("*SBC", IMM, 2, 0),
    op("CPX", ABS, 4, 0), op("SBC", ABS, 4, 0), op("INC", ABS, 6, 0), op("*ISB", ABS, 6, 0),
    // 0xF0
    op("BEQ", REL, 2, 1), op("SBC", IZY, 5, 1), op("*KIL", IMP, 2, 0), op("*ISB", IZY, 8, 0),
    op("*NOP", ZPX, 4, 0), op("SBC", ZPX, 4, 0), op("INC", ZPX, 6, 0), op("*ISB", ZPX, 6, 0),
    op("SED", IMP, 2, 0), op("SBC", ABY, 4, 1), op("*NOP", IMP, 2, 0), op("*ISB", ABY, 7, 0),
    op("*NOP", ABX, 4, 1), op("SBC", ABX, 4, 1), op("INC", ABX, 7, 0), op("*ISB", ABX, 7, 0),
];
