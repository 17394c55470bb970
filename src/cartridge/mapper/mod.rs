//! NES mappers for PRG/CHR memory mapping.
//!
//! The set of boards is closed: [`Board`] is chosen once from the iNES mapper number when the
//! cartridge is built and never changes afterwards.

use crate::cartridge::CartridgeError;

/// Nametable mirroring mode for PPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// $2000 = $2400 and $2800 = $2C00 (vertical arrangement).
    Horizontal,
    /// $2000 = $2800 and $2400 = $2C00 (horizontal arrangement).
    Vertical,
}

pub mod mapper;
pub mod mapper0;

pub use mapper::Mapper;
pub use mapper0::Mapper0;

/// Every mapper this core can run, one variant per supported iNES mapper number.
pub enum Board {
    Nrom(Mapper0),
}

impl Board {
    /// Select the board for `mapper_id`. Unknown numbers are a configuration error.
    pub fn new(mapper_id: u8, prg_rom: Vec<u8>, chr: Vec<u8>) -> Result<Self, CartridgeError> {
        match mapper_id {
            0 => Ok(Board::Nrom(Mapper0::new(prg_rom, chr)?)),
            id => Err(CartridgeError::UnsupportedMapper(id)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Board::Nrom(_) => "NROM",
        }
    }
}

impl Mapper for Board {
    fn read(&self, addr: u16) -> u8 {
        match self {
            Board::Nrom(m) => m.read(addr),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match self {
            Board::Nrom(m) => m.write(addr, data),
        }
    }
}
