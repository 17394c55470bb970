//! Tandem: a cycle-accurate NES (Nintendo Entertainment System) core written in Rust.
//!
//! Implements the NES chipset as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): the Ricoh 2A03 CPU, the
//! 2C02 PPU, NROM cartridges, and controller I/O. The CPU and PPU share one clock: every CPU
//! cycle is followed by exactly three PPU dots.
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): RAM, PPU, OAM DMA,
//!   controller, cartridge
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading; [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0)
//! - **controller** – [Controller reading](https://www.nesdev.org/wiki/Controller_reading): $4016 strobe, shift-out
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU): table-driven decode, [NMI](https://www.nesdev.org/wiki/NMI), nestest trace
//! - **ppu** – [PPU rendering](https://www.nesdev.org/wiki/PPU_rendering), [scrolling](https://www.nesdev.org/wiki/PPU_scrolling), 256×240
//! - **nes** – the console: steps the CPU and keeps the PPU three dots per cycle behind it
//! - **logger** – stderr `log` backend with coloured level tags

pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod logger;
pub mod nes;
pub mod ppu;

pub use cartridge::{Cartridge, CartridgeError, Mirroring};
pub use controller::Button;
pub use nes::Console;
pub use ppu::{FRAME_HEIGHT, FRAME_WIDTH, Frame};
