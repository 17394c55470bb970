//! Instruction effects and the opcode-indexed dispatch table.
//!
//! Every effect receives the resolved effective address; the PC has already moved past the
//! instruction and the base cycles are already charged. Only branches add cycles here.

use crate::{
    bus::Bus,
    cpu::{
        addressing::pages_differ,
        cpu::{Cpu, IRQ_VECTOR},
        flags::{
            FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE,
            FLAG_OVERFLOW, FLAG_UNUSED, FLAG_ZERO,
        },
    },
};

pub(crate) type Effect<B> = fn(&mut Cpu<B>, u16);

impl<B: Bus> Cpu<B> {
    #[rustfmt::skip]
    pub(crate) const EFFECTS: [Effect<B>; 256] = [
        // 0x00
        Self::brk, Self::ora, Self::nop, Self::nop, Self::nop, Self::ora, Self::asl, Self::nop,
        Self::php, Self::ora, Self::asl_acc, Self::nop, Self::nop, Self::ora, Self::asl, Self::nop,
        // 0x10
        Self::bpl, Self::ora, Self::nop, Self::nop, Self::nop, Self::ora, Self::asl, Self::nop,
        Self::clc, Self::ora, Self::nop, Self::nop, Self::nop, Self::ora, Self::asl, Self::nop,
        // 0x20
        Self::jsr, Self::and, Self::nop, Self::nop, Self::bit, Self::and, Self::rol, Self::nop,
        Self::plp, Self::and, Self::rol_acc, Self::nop, Self::bit, Self::and, Self::rol, Self::nop,
        // 0x30
        Self::bmi, Self::and, Self::nop, Self::nop, Self::nop, Self::and, Self::rol, Self::nop,
        Self::sec, Self::and, Self::nop, Self::nop, Self::nop, Self::and, Self::rol, Self::nop,
        // 0x40
        Self::rti, Self::eor, Self::nop, Self::nop, Self::nop, Self::eor, Self::lsr, Self::nop,
        Self::pha, Self::eor, Self::lsr_acc, Self::nop, Self::jmp, Self::eor, Self::lsr, Self::nop,
        // 0x50
        Self::bvc, Self::eor, Self::nop, Self::nop, Self::nop, Self::eor, Self::lsr, Self::nop,
        Self::cli, Self::eor, Self::nop, Self::nop, Self::nop, Self::eor, Self::lsr, Self::nop,
        // 0x60
        Self::rts, Self::adc, Self::nop, Self::nop, Self::nop, Self::adc, Self::ror, Self::nop,
        Self::pla, Self::adc, Self::ror_acc, Self::nop, Self::jmp, Self::adc, Self::ror, Self::nop,
        // 0x70
        Self::bvs, Self::adc, Self::nop, Self::nop, Self::nop, Self::adc, Self::ror, Self::nop,
        Self::sei, Self::adc, Self::nop, Self::nop, Self::nop, Self::adc, Self::ror, Self::nop,
        // 0x80
        Self::nop, Self::sta, Self::nop, Self::nop, Self::sty, Self::sta, Self::stx, Self::nop,
        Self::dey, Self::nop, Self::txa, Self::nop, Self::sty, Self::sta, Self::stx, Self::nop,
        // 0x90
        Self::bcc, Self::sta, Self::nop, Self::nop, Self::sty, Self::sta, Self::stx, Self::nop,
        Self::tya, Self::sta, Self::txs, Self::nop, Self::nop, Self::sta, Self::nop, Self::nop,
        // 0xA0
        Self::ldy, Self::lda, Self::ldx, Self::nop, Self::ldy, Self::lda, Self::ldx, Self::nop,
        Self::tay, Self::lda, Self::tax, Self::nop, Self::ldy, Self::lda, Self::ldx, Self::nop,
        // 0xB0
        Self::bcs, Self::lda, Self::nop, Self::nop, Self::ldy, Self::lda, Self::ldx, Self::nop,
        Self::clv, Self::lda, Self::tsx, Self::nop, Self::ldy, Self::lda, Self::ldx, Self::nop,
        // 0xC0
        Self::cpy, Self::cmp, Self::nop, Self::nop, Self::cpy, Self::cmp, Self::dec, Self::nop,
        Self::iny, Self::cmp, Self::dex, Self::nop, Self::cpy, Self::cmp, Self::dec, Self::nop,
        // 0xD0
        Self::bne, Self::cmp, Self::nop, Self::nop, Self::nop, Self::cmp, Self::dec, Self::nop,
        Self::cld, Self::cmp, Self::nop, Self::nop, Self::nop, Self::cmp, Self::dec, Self::nop,
        // 0xE0
        Self::cpx, Self::sbc, Self::nop, Self::nop, Self::cpx, Self::sbc, Self::inc, Self::nop,
        Self::inx, Self::sbc, Self::nop, Self::sbc, Self::cpx, Self::sbc, Self::inc, Self::nop,
        // 0xF0
        Self::beq, Self::sbc, Self::nop, Self::nop, Self::nop, Self::sbc, Self::inc, Self::nop,
        Self::sed, Self::sbc, Self::nop, Self::nop, Self::nop, Self::sbc, Self::inc, Self::nop,
    ];

    // Loads, stores, transfers

    fn lda(&mut self, addr: u16) {
        self.a = self.bus.read(addr);
        self.update_zero_and_negative_flags(self.a);
    }

    fn ldx(&mut self, addr: u16) {
        self.x = self.bus.read(addr);
        self.update_zero_and_negative_flags(self.x);
    }

    fn ldy(&mut self, addr: u16) {
        self.y = self.bus.read(addr);
        self.update_zero_and_negative_flags(self.y);
    }

    fn sta(&mut self, addr: u16) {
        self.bus.write(addr, self.a);
    }

    fn stx(&mut self, addr: u16) {
        self.bus.write(addr, self.x);
    }

    fn sty(&mut self, addr: u16) {
        self.bus.write(addr, self.y);
    }

    fn tax(&mut self, _: u16) {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
    }

    fn tay(&mut self, _: u16) {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
    }

    fn txa(&mut self, _: u16) {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
    }

    fn tya(&mut self, _: u16) {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
    }

    fn tsx(&mut self, _: u16) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }

    // TXS leaves the flags alone
    fn txs(&mut self, _: u16) {
        self.sp = self.x;
    }

    // Arithmetic and logic

    fn adc(&mut self, addr: u16) {
        let value = self.bus.read(addr);
        self.add_with_carry(value);
    }

    /// SBC is ADC of the one's complement; carry means "no borrow".
    fn sbc(&mut self, addr: u16) {
        let value = self.bus.read(addr);
        self.add_with_carry(!value);
    }

    fn add_with_carry(&mut self, value: u8) {
        let sum = self.a as u16 + value as u16 + self.flag(FLAG_CARRY) as u16;
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        // Overflow when both inputs share a sign the result does not have.
        self.set_flag(FLAG_OVERFLOW, (self.a ^ result) & (value ^ result) & 0x80 != 0);

        self.a = result;
        self.update_zero_and_negative_flags(self.a);
    }

    fn and(&mut self, addr: u16) {
        self.a &= self.bus.read(addr);
        self.update_zero_and_negative_flags(self.a);
    }

    fn ora(&mut self, addr: u16) {
        self.a |= self.bus.read(addr);
        self.update_zero_and_negative_flags(self.a);
    }

    fn eor(&mut self, addr: u16) {
        self.a ^= self.bus.read(addr);
        self.update_zero_and_negative_flags(self.a);
    }

    fn bit(&mut self, addr: u16) {
        let value = self.bus.read(addr);
        self.set_flag(FLAG_ZERO, self.a & value == 0);
        self.set_flag(FLAG_OVERFLOW, value & FLAG_OVERFLOW != 0);
        self.set_flag(FLAG_NEGATIVE, value & FLAG_NEGATIVE != 0);
    }

    fn compare(&mut self, register: u8, addr: u16) {
        let value = self.bus.read(addr);
        self.set_flag(FLAG_CARRY, register >= value);
        self.update_zero_and_negative_flags(register.wrapping_sub(value));
    }

    fn cmp(&mut self, addr: u16) {
        self.compare(self.a, addr);
    }

    fn cpx(&mut self, addr: u16) {
        self.compare(self.x, addr);
    }

    fn cpy(&mut self, addr: u16) {
        self.compare(self.y, addr);
    }

    // Increments and decrements

    fn inc(&mut self, addr: u16) {
        let value = self.bus.read(addr).wrapping_add(1);
        self.bus.write(addr, value);
        self.update_zero_and_negative_flags(value);
    }

    fn dec(&mut self, addr: u16) {
        let value = self.bus.read(addr).wrapping_sub(1);
        self.bus.write(addr, value);
        self.update_zero_and_negative_flags(value);
    }

    fn inx(&mut self, _: u16) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    fn iny(&mut self, _: u16) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    fn dex(&mut self, _: u16) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    fn dey(&mut self, _: u16) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }

    // Shifts and rotates

    fn shift_left(&mut self, value: u8, carry_in: bool) -> u8 {
        let result = (value << 1) | carry_in as u8;
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);
        result
    }

    fn shift_right(&mut self, value: u8, carry_in: bool) -> u8 {
        let result = (value >> 1) | ((carry_in as u8) << 7);
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);
        result
    }

    fn asl_acc(&mut self, _: u16) {
        self.a = self.shift_left(self.a, false);
    }

    fn asl(&mut self, addr: u16) {
        let value = self.bus.read(addr);
        let result = self.shift_left(value, false);
        self.bus.write(addr, result);
    }

    fn lsr_acc(&mut self, _: u16) {
        self.a = self.shift_right(self.a, false);
    }

    fn lsr(&mut self, addr: u16) {
        let value = self.bus.read(addr);
        let result = self.shift_right(value, false);
        self.bus.write(addr, result);
    }

    fn rol_acc(&mut self, _: u16) {
        let carry = self.flag(FLAG_CARRY);
        self.a = self.shift_left(self.a, carry);
    }

    fn rol(&mut self, addr: u16) {
        let carry = self.flag(FLAG_CARRY);
        let value = self.bus.read(addr);
        let result = self.shift_left(value, carry);
        self.bus.write(addr, result);
    }

    fn ror_acc(&mut self, _: u16) {
        let carry = self.flag(FLAG_CARRY);
        self.a = self.shift_right(self.a, carry);
    }

    fn ror(&mut self, addr: u16) {
        let carry = self.flag(FLAG_CARRY);
        let value = self.bus.read(addr);
        let result = self.shift_right(value, carry);
        self.bus.write(addr, result);
    }

    // Control flow

    fn jmp(&mut self, addr: u16) {
        self.pc = addr;
    }

    /// Pushes the address of the last byte of the JSR.
    fn jsr(&mut self, addr: u16) {
        self.push_word(self.pc.wrapping_sub(1));
        self.pc = addr;
    }

    fn rts(&mut self, _: u16) {
        self.pc = self.pop_word().wrapping_add(1);
    }

    fn rti(&mut self, _: u16) {
        let status = self.pop();
        self.status = (status & !FLAG_BREAK) | FLAG_UNUSED;
        self.pc = self.pop_word();
    }

    /// BRK skips a padding byte, so the pushed return address is the opcode address + 2.
    fn brk(&mut self, _: u16) {
        self.push_word(self.pc.wrapping_add(1));
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);
        self.status |= FLAG_INTERRUPT_DISABLE;
        self.pc = self.read_word(IRQ_VECTOR);
    }

    fn branch(&mut self, condition: bool, target: u16) {
        if !condition {
            return;
        }
        self.cycles += 1;
        if pages_differ(self.pc, target) {
            self.cycles += 1;
        }
        self.pc = target;
    }

    fn bcc(&mut self, addr: u16) {
        self.branch(!self.flag(FLAG_CARRY), addr);
    }

    fn bcs(&mut self, addr: u16) {
        self.branch(self.flag(FLAG_CARRY), addr);
    }

    fn beq(&mut self, addr: u16) {
        self.branch(self.flag(FLAG_ZERO), addr);
    }

    fn bne(&mut self, addr: u16) {
        self.branch(!self.flag(FLAG_ZERO), addr);
    }

    fn bmi(&mut self, addr: u16) {
        self.branch(self.flag(FLAG_NEGATIVE), addr);
    }

    fn bpl(&mut self, addr: u16) {
        self.branch(!self.flag(FLAG_NEGATIVE), addr);
    }

    fn bvc(&mut self, addr: u16) {
        self.branch(!self.flag(FLAG_OVERFLOW), addr);
    }

    fn bvs(&mut self, addr: u16) {
        self.branch(self.flag(FLAG_OVERFLOW), addr);
    }

    // Stack

    fn pha(&mut self, _: u16) {
        self.push(self.a);
    }

    fn php(&mut self, _: u16) {
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);
    }

    fn pla(&mut self, _: u16) {
        self.a = self.pop();
        self.update_zero_and_negative_flags(self.a);
    }

    fn plp(&mut self, _: u16) {
        let status = self.pop();
        self.status = (status & !FLAG_BREAK) | FLAG_UNUSED;
    }

    // Flags

    fn clc(&mut self, _: u16) {
        self.set_flag(FLAG_CARRY, false);
    }

    fn sec(&mut self, _: u16) {
        self.set_flag(FLAG_CARRY, true);
    }

    fn cli(&mut self, _: u16) {
        self.set_flag(FLAG_INTERRUPT_DISABLE, false);
    }

    fn sei(&mut self, _: u16) {
        self.set_flag(FLAG_INTERRUPT_DISABLE, true);
    }

    fn cld(&mut self, _: u16) {
        self.set_flag(FLAG_DECIMAL, false);
    }

    fn sed(&mut self, _: u16) {
        self.set_flag(FLAG_DECIMAL, true);
    }

    fn clv(&mut self, _: u16) {
        self.set_flag(FLAG_OVERFLOW, false);
    }

    /// Official NOP and every undocumented opcode except `$EB`.
    fn nop(&mut self, _: u16) {}
}
