//! iNES image parsing.
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic
//! "NES\x1A", PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mapper and
//! mirroring), an optional 512-byte trainer, then PRG ROM, then CHR ROM.

use crate::cartridge::{Cartridge, CartridgeError, Mirroring};

const NES_MAGIC: [u8; 4] = *b"NES\x1A";
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const PRG_ROM_PAGE_SIZE: usize = 16 * 1024;
const CHR_ROM_PAGE_SIZE: usize = 8 * 1024;

/// The fields of the 16-byte header this core cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub prg_pages: u8,
    pub chr_pages: u8,
    pub mapper_id: u8,
    pub mirroring: Mirroring,
    pub has_trainer: bool,
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_SIZE {
            return Err(CartridgeError::InvalidFormat(format!(
                "file is {} bytes, shorter than the iNES header",
                data.len()
            )));
        }
        if data[0..4] != NES_MAGIC {
            return Err(CartridgeError::InvalidFormat("missing NES\\x1A magic".into()));
        }
        let flags6 = data[6];
        let flags7 = data[7];
        // Mapper number: low nibble in flags 6, high nibble in flags 7.
        let mapper_id = (flags6 >> 4) | (flags7 & 0xF0);
        // Flags 6 bit 0: 0 = horizontal, 1 = vertical (board solder pads for NROM).
        let mirroring = if flags6 & 1 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        Ok(Self {
            prg_pages: data[4],
            chr_pages: data[5],
            mapper_id,
            mirroring,
            has_trainer: flags6 & 0x04 != 0,
        })
    }
}

/// Parse a whole iNES image into a cartridge. The trainer, if any, is skipped.
pub fn parse(data: &[u8]) -> Result<Cartridge, CartridgeError> {
    let header = Header::parse(data)?;

    let prg_start = HEADER_SIZE + if header.has_trainer { TRAINER_SIZE } else { 0 };
    let prg_end = prg_start + header.prg_pages as usize * PRG_ROM_PAGE_SIZE;
    let chr_end = prg_end + header.chr_pages as usize * CHR_ROM_PAGE_SIZE;
    if data.len() < chr_end {
        return Err(CartridgeError::InvalidFormat(format!(
            "image truncated: header declares {} bytes, file has {}",
            chr_end,
            data.len()
        )));
    }

    Cartridge::new(
        data[prg_start..prg_end].to_vec(),
        data[prg_end..chr_end].to_vec(),
        header.mapper_id,
        header.mirroring,
    )
}
