//! Memory bus and address decoding for the NES.
//!
//! Maps CPU addresses to RAM, PPU registers, OAM DMA, the controller port and the cartridge.
//! See [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map).

use log::debug;

use crate::{cartridge::Cartridge, controller::Controller, ppu::Ppu};

/// Trait for memory-mapped I/O and bus access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);

    /// Returns true once after a write to `$4014` started an OAM DMA, so the CPU can stall.
    fn poll_oam_dma(&mut self) -> bool {
        false
    }
}

/// Main NES bus: RAM, PPU, cartridge, and controller.
pub struct NesBus {
    pub ram: [u8; 2048],
    pub cart: Cartridge,
    pub ppu: Ppu,
    pub controller: Controller,
    dma_pending: bool,
}

impl NesBus {
    /// Create a new bus with the given cartridge.
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; 2048],
            cart,
            ppu: Ppu::new(),
            controller: Controller::new(),
            dma_pending: false,
        }
    }

    /// Copy CPU page `$XX00-$XXFF` into OAM.
    fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let mut data = [0u8; 256];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = self.read(base | i as u16);
        }
        self.ppu.oam_dma(&data);
        self.dma_pending = true;
        debug!("OAM DMA from ${base:04X}");
    }
}

impl Bus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            // Internal RAM (mirrored 4x in 0x0000-0x1FFF)
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            // PPU registers $2000-$3FFF (mirrored every 8 bytes)
            0x2000..=0x3FFF => self.ppu.read_register(addr & 0x0007, &self.cart),
            0x4016 => self.controller.read(),
            // APU, second controller, expansion
            0x4000..=0x5FFF => 0,
            0x6000..=0x7FFF => self.cart.read_wram(addr),
            // Cartridge PRG ROM
            0x8000..=0xFFFF => self.cart.read(addr),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            0x2000..=0x3FFF => self.ppu.write_register(addr & 0x0007, data, &mut self.cart),
            0x4014 => self.oam_dma(data),
            0x4016 => self.controller.write(data),
            0x4000..=0x5FFF => {}
            0x6000..=0x7FFF => self.cart.write_wram(addr, data),
            // Mapper space; NROM ignores these
            0x8000..=0xFFFF => self.cart.write(addr, data),
        }
    }

    fn poll_oam_dma(&mut self) -> bool {
        std::mem::take(&mut self.dma_pending)
    }
}
