//! The console: one CPU and one PPU on a shared clock.
//!
//! Each CPU step is followed by three PPU dots per CPU cycle it took. NMI requests raised by
//! the PPU during those dots are handed to the CPU, which services them before its next
//! instruction.

use log::info;

use crate::{
    bus::NesBus,
    cartridge::Cartridge,
    controller::Button,
    cpu::Cpu,
    ppu::{Frame, Ppu},
};

/// PPU dots per CPU cycle (NTSC).
pub const PPU_DOTS_PER_CPU_CYCLE: u64 = 3;

pub struct Console {
    cpu: Cpu<NesBus>,
}

impl Console {
    /// Insert `cart` and power on: the CPU starts at the reset vector.
    pub fn new(cart: Cartridge) -> Self {
        let cpu = Cpu::new(NesBus::new(cart));
        info!("power on, PC=${:04X}", cpu.pc);
        Self { cpu }
    }

    /// Press the reset button.
    pub fn reset(&mut self) {
        self.cpu.bus.ppu.reset();
        self.cpu.reset();
        info!("reset, PC=${:04X}", self.cpu.pc);
    }

    /// Run one CPU step and the matching PPU dots. `on_frame` is called with every frame
    /// finished during those dots. Returns the CPU cycles consumed.
    pub fn step<F: FnMut(&Frame)>(&mut self, mut on_frame: F) -> u64 {
        let cycles = self.cpu.step();

        let bus = &mut self.cpu.bus;
        for _ in 0..cycles * PPU_DOTS_PER_CPU_CYCLE {
            if bus.ppu.tick(&bus.cart) {
                on_frame(bus.ppu.frame());
            }
        }

        if bus.ppu.poll_nmi() {
            self.cpu.request_nmi();
        }
        cycles
    }

    /// Step until the PPU finishes a frame and return it.
    pub fn run_frame(&mut self) -> &Frame {
        let mut done = false;
        while !done {
            self.step(|_| done = true);
        }
        self.cpu.bus.ppu.frame()
    }

    /// Start execution at `pc` instead of the reset vector (nestest's automated mode uses `$C000`).
    pub fn set_pc(&mut self, pc: u16) {
        self.cpu.pc = pc;
    }

    pub fn press(&mut self, button: Button) {
        self.cpu.bus.controller.press(button);
    }

    pub fn release(&mut self, button: Button) {
        self.cpu.bus.controller.release(button);
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.cpu.bus.controller.set(button, pressed);
    }

    pub fn frame(&self) -> &Frame {
        self.cpu.bus.ppu.frame()
    }

    pub fn frame_count(&self) -> u64 {
        self.cpu.bus.ppu.frame_count
    }

    pub fn cpu(&self) -> &Cpu<NesBus> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu<NesBus> {
        &mut self.cpu
    }

    pub fn ppu(&self) -> &Ppu {
        &self.cpu.bus.ppu
    }
}
