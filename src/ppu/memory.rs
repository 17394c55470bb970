//! The PPU's own 14-bit address space.
//!
//! `$0000-$1FFF` pattern tables (cartridge CHR), `$2000-$3EFF` nametables folded onto 2 KiB of
//! VRAM by the cartridge's mirroring, `$3F00-$3FFF` palette RAM. Addresses wrap at `$4000`.

use crate::{
    cartridge::{Cartridge, Mirroring},
    ppu::ppu::Ppu,
};

/// Map a nametable address (`$2000-$3EFF`) to an index into the 2 KiB VRAM.
///
/// Horizontal mirroring pairs tables 0/1 and 2/3; vertical pairs 0/2 and 1/3.
pub fn mirror_nametable(addr: u16, mirroring: Mirroring) -> usize {
    let offset = (addr as usize - 0x2000) % 0x1000;
    let table = offset / 0x400;
    let physical = match mirroring {
        Mirroring::Horizontal => table / 2,
        Mirroring::Vertical => table % 2,
    };
    physical * 0x400 + offset % 0x400
}

/// `$3F10/$3F14/$3F18/$3F1C` are the same cells as `$3F00/$3F04/$3F08/$3F0C`.
fn palette_index(addr: u16) -> usize {
    let index = addr as usize % 32;
    if index >= 16 && index % 4 == 0 {
        index - 16
    } else {
        index
    }
}

impl Ppu {
    pub(crate) fn read(&self, addr: u16, cart: &Cartridge) -> u8 {
        let addr = addr % 0x4000;
        match addr {
            0x0000..=0x1FFF => cart.read(addr),
            0x2000..=0x3EFF => self.vram[mirror_nametable(addr, cart.mirroring)],
            _ => self.palette[palette_index(addr)],
        }
    }

    pub(crate) fn write(&mut self, addr: u16, data: u8, cart: &mut Cartridge) {
        let addr = addr % 0x4000;
        match addr {
            // CHR RAM only; the mapper drops writes to CHR ROM
            0x0000..=0x1FFF => cart.write(addr, data),
            0x2000..=0x3EFF => self.vram[mirror_nametable(addr, cart.mirroring)] = data,
            _ => self.palette[palette_index(addr)] = data,
        }
    }

    /// Palette RAM lookup for the renderer; `index` is the 5-bit colour index.
    pub(crate) fn read_palette(&self, index: u8) -> u8 {
        self.palette[palette_index(index as u16)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_mirroring_shares_top_and_bottom_pairs() {
        let m = Mirroring::Horizontal;
        assert_eq!(mirror_nametable(0x2000, m), 0x000);
        assert_eq!(mirror_nametable(0x2400, m), 0x000);
        assert_eq!(mirror_nametable(0x2800, m), 0x400);
        assert_eq!(mirror_nametable(0x2C05, m), 0x405);
    }

    #[test]
    fn vertical_mirroring_shares_left_and_right_pairs() {
        let m = Mirroring::Vertical;
        assert_eq!(mirror_nametable(0x2000, m), 0x000);
        assert_eq!(mirror_nametable(0x2400, m), 0x400);
        assert_eq!(mirror_nametable(0x2800, m), 0x000);
        assert_eq!(mirror_nametable(0x2FFF, m), 0x7FF);
    }

    #[test]
    fn upper_nametable_region_mirrors_lower() {
        for m in [Mirroring::Horizontal, Mirroring::Vertical] {
            assert_eq!(mirror_nametable(0x3000, m), mirror_nametable(0x2000, m));
            assert_eq!(mirror_nametable(0x3EFF, m), mirror_nametable(0x2EFF, m));
        }
    }

    #[test]
    fn sprite_backdrop_entries_alias_background() {
        assert_eq!(palette_index(0x3F10), 0x00);
        assert_eq!(palette_index(0x3F14), 0x04);
        assert_eq!(palette_index(0x3F1C), 0x0C);
        assert_eq!(palette_index(0x3F11), 0x11);
        assert_eq!(palette_index(0x3F2F), 0x0F);
    }
}
