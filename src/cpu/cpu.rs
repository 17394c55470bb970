use log::{Level, debug, log_enabled, trace};

use crate::{
    bus::Bus,
    cpu::{
        flags::{FLAG_BREAK, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_UNUSED, FLAG_ZERO, STATUS_RESET},
        opcodes::OPCODES,
    },
};

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles taken by an interrupt sequence (NMI or IRQ).
const INTERRUPT_CYCLES: u64 = 7;

/// CPU cycles an OAM DMA halts the processor for, before the odd-cycle alignment.
const OAM_DMA_CYCLES: u64 = 513;

pub struct Cpu<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    /// Total cycles since power-on; nestest's CYC column.
    pub cycles: u64,
    /// Cycles the CPU still has to sit out (OAM DMA).
    pub stall: u64,
    pub nmi_pending: bool,
    pub irq_pending: bool,
    pub bus: B,
}

impl<B: Bus> Cpu<B> {
    /// Build a CPU on `bus` and run the reset sequence, so the reset vector must already be mapped.
    pub fn new(bus: B) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: 0,
            cycles: 0,
            stall: 0,
            nmi_pending: false,
            irq_pending: false,
            bus,
        };
        cpu.reset();
        cpu
    }

    pub fn reset(&mut self) {
        self.pc = self.read_word(RESET_VECTOR);

        self.sp = 0xFD; // the reset sequence performs three phantom pushes from $00
        self.status = STATUS_RESET;

        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.stall = 0;
        self.nmi_pending = false;
        self.irq_pending = false;

        self.cycles = 7;
        debug!("CPU reset, PC=${:04X}", self.pc);
    }

    /// Run one unit of work and return the cycles it took.
    ///
    /// A unit is a pending DMA stall, an interrupt sequence, or a single instruction, checked in
    /// that order. NMI wins over IRQ; IRQ is masked by the I flag.
    pub fn step(&mut self) -> u64 {
        if self.stall > 0 {
            let stalled = self.stall;
            self.cycles += stalled;
            self.stall = 0;
            return stalled;
        }

        let start = self.cycles;

        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt(NMI_VECTOR);
        } else if self.irq_pending && self.status & FLAG_INTERRUPT_DISABLE == 0 {
            self.irq_pending = false;
            self.interrupt(IRQ_VECTOR);
        } else {
            self.execute();
        }

        self.cycles - start
    }

    pub fn request_nmi(&mut self) {
        self.nmi_pending = true;
    }

    pub fn request_irq(&mut self) {
        self.irq_pending = true;
    }

    fn execute(&mut self) {
        if log_enabled!(Level::Trace) {
            trace!("{}", self.trace_line());
        }

        let opcode = self.bus.read(self.pc);
        let op = &OPCODES[opcode as usize];

        let (addr, page_crossed) = self.resolve(op.mode);
        self.pc = self.pc.wrapping_add(op.len as u16);
        self.cycles += op.cycles as u64;
        if page_crossed {
            self.cycles += op.page_cycles as u64;
        }

        Self::EFFECTS[opcode as usize](self, addr);

        if self.bus.poll_oam_dma() {
            self.stall += OAM_DMA_CYCLES + (self.cycles & 1);
            debug!("OAM DMA, stalling {} cycles", self.stall);
        }
    }

    /// Push PC and P (B clear, bit 5 set), mask IRQs and jump through `vector`.
    fn interrupt(&mut self, vector: u16) {
        self.push_word(self.pc);
        self.push((self.status & !FLAG_BREAK) | FLAG_UNUSED);
        self.status |= FLAG_INTERRUPT_DISABLE;
        self.pc = self.read_word(vector);
        self.cycles += INTERRUPT_CYCLES;
    }

    pub(crate) fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.bus.read(addr) as u16;
        let hi = self.bus.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Read a little-endian word whose high byte comes from the same page as the low byte.
    pub(crate) fn read_word_in_page(&mut self, addr: u16) -> u16 {
        let lo = self.bus.read(addr) as u16;
        let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let hi = self.bus.read(hi_addr) as u16;
        (hi << 8) | lo
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.bus.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.bus.read(0x0100 | self.sp as u16)
    }

    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    pub(crate) fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    pub(crate) fn flag(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    pub(crate) fn update_zero_and_negative_flags(&mut self, result: u8) {
        self.set_flag(FLAG_ZERO, result == 0);
        self.set_flag(FLAG_NEGATIVE, result & 0x80 != 0);
    }
}
