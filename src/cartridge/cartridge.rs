//! NES cartridge: PRG/CHR data behind a mapper, 8 KiB work RAM, and nametable mirroring.
//!
//! CPU reads PRG via the bus at $8000–$FFFF and work RAM at $6000–$7FFF; the PPU reads CHR at
//! $0000–$1FFF (pattern tables). Only work RAM (and CHR RAM, when the board has it) is writable.

use std::io;
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::cartridge::ines;
use crate::cartridge::mapper::{Board, Mapper, Mirroring};

/// Work RAM at $6000–$7FFF.
pub const WRAM_SIZE: usize = 0x2000;

/// Errors raised while building a cartridge. All of them happen before the console exists.
#[derive(Debug, Error)]
pub enum CartridgeError {
    /// I/O error occurred while reading the ROM file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The image has an invalid format or structure
    #[error("invalid ROM format: {0}")]
    InvalidFormat(String),

    /// No board is implemented for this iNES mapper number
    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u8),
}

/// Cartridge: holds the mapper, work RAM and mirroring mode.
pub struct Cartridge {
    pub mirroring: Mirroring,
    pub wram: [u8; WRAM_SIZE],
    board: Board,
}

impl Cartridge {
    /// Build a cartridge from raw PRG/CHR data. The mapper is selected here, once.
    pub fn new(
        prg_rom: Vec<u8>,
        chr_rom: Vec<u8>,
        mapper_id: u8,
        mirroring: Mirroring,
    ) -> Result<Self, CartridgeError> {
        let prg_len = prg_rom.len();
        let chr_len = chr_rom.len();
        let board = Board::new(mapper_id, prg_rom, chr_rom)?;
        debug!(
            "mapper {} ({}), PRG {} KiB, CHR {} KiB, {:?} mirroring",
            mapper_id,
            board.name(),
            prg_len / 1024,
            chr_len / 1024,
            mirroring
        );
        Ok(Self {
            mirroring,
            wram: [0; WRAM_SIZE],
            board,
        })
    }

    /// Load an iNES file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let cart = ines::parse(&data)?;
        info!("loaded {}", path.display());
        Ok(cart)
    }

    /// Read: PRG space ($8000–$FFFF) or CHR ($0000–$1FFF) depending on addr. Mapper dispatches.
    pub fn read(&self, addr: u16) -> u8 {
        self.board.read(addr)
    }

    /// Write: CHR RAM (if present) or mapper registers. PRG ROM is R/O.
    pub fn write(&mut self, addr: u16, data: u8) {
        self.board.write(addr, data);
    }

    pub fn read_wram(&self, addr: u16) -> u8 {
        self.wram[(addr as usize - 0x6000) % WRAM_SIZE]
    }

    pub fn write_wram(&mut self, addr: u16, data: u8) {
        self.wram[(addr as usize - 0x6000) % WRAM_SIZE] = data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mapper_is_rejected() {
        let err = Cartridge::new(vec![0; 0x4000], vec![0; 0x2000], 4, Mirroring::Vertical)
            .err()
            .unwrap();
        assert!(matches!(err, CartridgeError::UnsupportedMapper(4)));
    }

    #[test]
    fn work_ram_is_read_write() {
        let mut cart =
            Cartridge::new(vec![0; 0x4000], vec![0; 0x2000], 0, Mirroring::Horizontal).unwrap();
        cart.write_wram(0x6000, 0x12);
        cart.write_wram(0x7FFF, 0x34);
        assert_eq!(cart.read_wram(0x6000), 0x12);
        assert_eq!(cart.read_wram(0x7FFF), 0x34);
    }
}
