//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: PRG/CHR data, work RAM, nametable mirroring, and the selected mapper.
//! - **ines**: parses iNES (.nes) images into a [`Cartridge`].
//! - **mapper**: the `Mapper` capability and the boards it is implemented for (NROM).

pub mod cartridge;
pub mod ines;
pub mod mapper;

pub use cartridge::{Cartridge, CartridgeError, WRAM_SIZE};
pub use mapper::Mirroring;
