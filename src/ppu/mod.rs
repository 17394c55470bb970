//! PPU (Picture Processing Unit) emulation for the NES.
//!
//! See [PPU](https://www.nesdev.org/wiki/PPU), [PPU registers](https://www.nesdev.org/wiki/PPU_registers),
//! [PPU memory map](https://www.nesdev.org/wiki/PPU_memory_map) and
//! [PPU rendering](https://www.nesdev.org/wiki/PPU_rendering). The PPU is stepped one dot at a
//! time: 341 dots per scanline, 262 scanlines per frame, with the background fetched through
//! the loopy `v`/`t` scroll registers and up to 8 sprites per line.

mod memory;
pub mod palette;
pub mod ppu;
mod registers;
mod render;

#[cfg(test)]
mod tests;

pub use memory::mirror_nametable;
pub use palette::NES_PALETTE_RGB;
pub use ppu::Ppu;

pub const FRAME_WIDTH: usize = 256;
pub const FRAME_HEIGHT: usize = 240;

/// One finished picture: row-major `0x00RRGGBB` pixels.
pub type Frame = [u32; FRAME_WIDTH * FRAME_HEIGHT];
