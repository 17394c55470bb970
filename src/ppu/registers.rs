//! CPU-facing registers `$2000-$2007` and OAM DMA.
//!
//! See [PPU registers](https://www.nesdev.org/wiki/PPU_registers) and
//! [PPU scrolling](https://www.nesdev.org/wiki/PPU_scrolling) for the `t`/`v`/`x`/`w` bit layouts.

use crate::{
    cartridge::Cartridge,
    ppu::ppu::{CTRL_INCREMENT_32, CTRL_NMI, Ppu, STATUS_VBLANK},
};

impl Ppu {
    /// Read register `reg` (the CPU address masked to `0..=7`).
    pub fn read_register(&mut self, reg: u16, cart: &Cartridge) -> u8 {
        match reg {
            2 => self.read_status(),
            4 => self.oam[self.oam_addr as usize],
            7 => self.read_data(cart),
            // write-only ports
            _ => self.open_bus,
        }
    }

    /// Write register `reg` (the CPU address masked to `0..=7`).
    pub fn write_register(&mut self, reg: u16, data: u8, cart: &mut Cartridge) {
        self.open_bus = data;
        match reg {
            0 => self.write_ctrl(data),
            1 => self.mask = data,
            2 => {} // PPUSTATUS is read-only
            3 => self.oam_addr = data,
            4 => {
                self.oam[self.oam_addr as usize] = data;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            5 => self.write_scroll(data),
            6 => self.write_addr(data),
            7 => {
                self.write(self.v, data, cart);
                self.increment_v();
            }
            _ => unreachable!("PPU register index {reg} out of range"),
        }
    }

    /// Copy a 256-byte CPU page into OAM starting at OAMADDR (`$4014`).
    pub fn oam_dma(&mut self, page: &[u8; 256]) {
        for &byte in page {
            self.oam[self.oam_addr as usize] = byte;
            self.oam_addr = self.oam_addr.wrapping_add(1);
        }
    }

    // t: ...GH.. ........ <- d: ......GH
    fn write_ctrl(&mut self, data: u8) {
        let nmi_was_enabled = self.ctrl & CTRL_NMI != 0;
        self.ctrl = data;
        self.t = (self.t & 0xF3FF) | ((data as u16 & 0x03) << 10);

        if !nmi_was_enabled && data & CTRL_NMI != 0 && self.status & STATUS_VBLANK != 0 {
            self.nmi_requested = true;
        }
    }

    /// Bits 7-5 of the status register, the low five bits of the last register write. Clears
    /// vblank and the write toggle.
    fn read_status(&mut self) -> u8 {
        let result = (self.status & 0xE0) | (self.open_bus & 0x1F);
        self.status &= !STATUS_VBLANK;
        self.write_latch = false;
        result
    }

    fn write_scroll(&mut self, data: u8) {
        let d = data as u16;
        if !self.write_latch {
            // t: ....... ...ABCDE <- d: ABCDE...
            // x:              FGH <- d: .....FGH
            self.t = (self.t & 0xFFE0) | (d >> 3);
            self.fine_x = data & 0x07;
        } else {
            // t: FGH..AB CDE..... <- d: ABCDEFGH
            self.t = (self.t & 0x8C1F) | ((d & 0x07) << 12) | ((d & 0xF8) << 2);
        }
        self.write_latch = !self.write_latch;
    }

    fn write_addr(&mut self, data: u8) {
        let d = data as u16;
        if !self.write_latch {
            // t: .CDEFGH ........ <- d: ..CDEFGH, bit 14 cleared
            self.t = (self.t & 0x80FF) | ((d & 0x3F) << 8);
        } else {
            self.t = (self.t & 0xFF00) | d;
            self.v = self.t;
        }
        self.write_latch = !self.write_latch;
    }

    /// Reads below the palette come out one read late through the internal buffer. Palette
    /// reads are immediate and refill the buffer from the nametable underneath.
    fn read_data(&mut self, cart: &Cartridge) -> u8 {
        let addr = self.v & 0x3FFF;
        let result = if addr >= 0x3F00 {
            self.read_buffer = self.read(addr - 0x1000, cart);
            self.read(addr, cart)
        } else {
            let buffered = self.read_buffer;
            self.read_buffer = self.read(addr, cart);
            buffered
        };
        self.increment_v();
        result
    }

    fn increment_v(&mut self) {
        let step = if self.ctrl & CTRL_INCREMENT_32 != 0 { 32 } else { 1 };
        self.v = self.v.wrapping_add(step) & 0x7FFF;
    }
}
