//! Mapper 0 (NROM): no bank switching, 16/32KB PRG, 8KB CHR.

use crate::cartridge::{CartridgeError, mapper::Mapper};

const PRG_BANK: usize = 16 * 1024;
const CHR_SIZE: usize = 8 * 1024;

/// NROM mapper: fixed PRG and CHR, 16KB PRG mirrored into $C000.
pub struct Mapper0 {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    /// Board carries 8KB CHR RAM instead of CHR ROM.
    chr_ram: bool,
}

impl Mapper0 {
    /// Create Mapper0 with given PRG and CHR ROM. An empty CHR gives the board 8KB of CHR RAM.
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>) -> Result<Self, CartridgeError> {
        if prg_rom.len() != PRG_BANK && prg_rom.len() != 2 * PRG_BANK {
            return Err(CartridgeError::InvalidFormat(format!(
                "NROM expects 16KB or 32KB PRG ROM, got {} bytes",
                prg_rom.len()
            )));
        }
        let chr_ram = chr.is_empty();
        let chr = if chr_ram { vec![0; CHR_SIZE] } else { chr };
        if chr.len() != CHR_SIZE {
            return Err(CartridgeError::InvalidFormat(format!(
                "NROM expects 8KB CHR ROM, got {} bytes",
                chr.len()
            )));
        }
        Ok(Self {
            prg_rom,
            chr,
            chr_ram,
        })
    }

    pub fn has_chr_ram(&self) -> bool {
        self.chr_ram
    }
}

impl Mapper for Mapper0 {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            // CHR: $0000-$1FFF
            0x0000..=0x1FFF => self.chr[addr as usize],
            // PRG ROM: $8000-$FFFF, mirror if 16KB
            0x8000..=0xFFFF => self.prg_rom[(addr - 0x8000) as usize % self.prg_rom.len()],
            _ => panic!("NROM read outside cartridge space: ${:04X}", addr),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => {
                if self.chr_ram {
                    self.chr[addr as usize] = data;
                }
            }
            0x8000..=0xFFFF => {} // PRG ROM: no writes
            _ => panic!("NROM write outside cartridge space: ${:04X}", addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prg(banks: usize) -> Vec<u8> {
        (0..banks * PRG_BANK).map(|i| (i >> 8) as u8).collect()
    }

    #[test]
    fn half_size_prg_is_mirrored_into_upper_bank() {
        let m = Mapper0::new(prg(1), vec![0; CHR_SIZE]).unwrap();
        assert_eq!(m.read(0x8123), m.read(0xC123));
        assert_eq!(m.read(0xFFFF), 0x3F);
    }

    #[test]
    fn full_size_prg_maps_directly() {
        let m = Mapper0::new(prg(2), vec![0; CHR_SIZE]).unwrap();
        assert_eq!(m.read(0x8000), 0x00);
        assert_eq!(m.read(0xC000), 0x40);
    }

    #[test]
    fn rom_writes_are_ignored() {
        let mut chr = vec![0; CHR_SIZE];
        chr[0x10] = 0xAB;
        let mut m = Mapper0::new(prg(1), chr).unwrap();
        m.write(0x8000, 0xFF);
        m.write(0x0010, 0x00);
        assert_eq!(m.read(0x8000), 0x00);
        assert_eq!(m.read(0x0010), 0xAB);
    }

    #[test]
    fn empty_chr_becomes_writable_ram() {
        let mut m = Mapper0::new(prg(1), Vec::new()).unwrap();
        assert!(m.has_chr_ram());
        m.write(0x1FFF, 0x5A);
        assert_eq!(m.read(0x1FFF), 0x5A);
    }

    #[test]
    fn odd_prg_size_is_rejected() {
        assert!(Mapper0::new(vec![0; 1000], Vec::new()).is_err());
    }
}
