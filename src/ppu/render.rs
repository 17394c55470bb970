//! Background fetch pipeline, sprite evaluation and the pixel multiplexer.
//!
//! See [PPU rendering](https://www.nesdev.org/wiki/PPU_rendering) and
//! [PPU sprite evaluation](https://www.nesdev.org/wiki/PPU_sprite_evaluation).

use crate::{
    cartridge::Cartridge,
    ppu::ppu::{
        CTRL_BACKGROUND_TABLE, CTRL_SPRITE_8X16, CTRL_SPRITE_TABLE, MASK_BACKGROUND_LEFT,
        MASK_SHOW_BACKGROUND, MASK_SHOW_SPRITES, MASK_SPRITES_LEFT, Ppu, STATUS_SPRITE_OVERFLOW,
        STATUS_SPRITE_ZERO_HIT, SpriteSlot,
    },
};

fn is_opaque(pixel: u8) -> bool {
    pixel % 4 != 0
}

impl Ppu {
    /// The 8-dot fetch cycle over dots 1-256 and 321-336, plus the scroll updates at 256/257.
    pub(crate) fn fetch_background(&mut self, cart: &Cartridge) {
        if matches!(self.dot, 1..=256 | 321..=336) {
            self.bg_shift <<= 4;
            match self.dot % 8 {
                1 => self.nametable_latch = self.read(0x2000 | (self.v & 0x0FFF), cart),
                3 => self.attribute_latch = self.fetch_attribute(cart),
                5 => self.pattern_low_latch = self.read(self.background_row_addr(), cart),
                7 => self.pattern_high_latch = self.read(self.background_row_addr() + 8, cart),
                0 => {
                    self.bg_shift |= self.compose_tile() as u64;
                    self.increment_x();
                }
                _ => {}
            }
        }

        if self.dot == 256 {
            self.increment_y();
        }
        if self.dot == 257 {
            self.copy_x();
        }
    }

    /// Two palette bits for the 16×16 area under `v`.
    fn fetch_attribute(&self, cart: &Cartridge) -> u8 {
        let v = self.v;
        let addr = 0x23C0 | (v & 0x0C00) | ((v >> 4) & 0x38) | ((v >> 2) & 0x07);
        let shift = ((v >> 4) & 0x04) | (v & 0x02);
        (self.read(addr, cart) >> shift) & 0x03
    }

    fn background_row_addr(&self) -> u16 {
        let table = if self.ctrl & CTRL_BACKGROUND_TABLE != 0 { 0x1000 } else { 0 };
        let fine_y = (self.v >> 12) & 0x07;
        table + self.nametable_latch as u16 * 16 + fine_y
    }

    /// Pack the latched tile row into eight 4-bit pixels, leftmost first.
    fn compose_tile(&self) -> u32 {
        let palette = self.attribute_latch << 2;
        let mut low = self.pattern_low_latch;
        let mut high = self.pattern_high_latch;
        let mut tile = 0u32;
        for _ in 0..8 {
            let p0 = (low & 0x80) >> 7;
            let p1 = (high & 0x80) >> 6;
            low <<= 1;
            high <<= 1;
            tile = (tile << 4) | (palette | p1 | p0) as u32;
        }
        tile
    }

    fn background_pixel(&self, x: u16) -> u8 {
        if self.mask & MASK_SHOW_BACKGROUND == 0 || (x < 8 && self.mask & MASK_BACKGROUND_LEFT == 0) {
            return 0;
        }
        let tile = (self.bg_shift >> 32) as u32;
        ((tile >> ((7 - self.fine_x as u32) * 4)) & 0x0F) as u8
    }

    /// First opaque sprite pixel at `x` and the slot it came from.
    fn sprite_pixel(&self, x: u16) -> Option<(u8, usize)> {
        if self.mask & MASK_SHOW_SPRITES == 0 || (x < 8 && self.mask & MASK_SPRITES_LEFT == 0) {
            return None;
        }
        self.sprites[..self.sprite_count]
            .iter()
            .enumerate()
            .find_map(|(slot, sprite)| {
                let column = x.checked_sub(sprite.x as u16).filter(|&c| c < 8)?;
                let shift = 4 * (7 - column as u32);
                let pixel = ((sprite.pattern >> shift) & 0x0F) as u8;
                is_opaque(pixel).then_some((pixel, slot))
            })
    }

    /// Mix background and sprite for the current dot and store the result.
    pub(crate) fn render_pixel(&mut self) {
        let x = self.dot - 1;
        let bg = self.background_pixel(x);
        let sprite = self.sprite_pixel(x);

        let color = match (is_opaque(bg), sprite) {
            (false, None) => 0,
            (false, Some((pixel, _))) => pixel | 0x10,
            (true, None) => bg,
            (true, Some((pixel, slot))) => {
                let sprite = self.sprites[slot];
                if sprite.index == 0 && x < 255 {
                    self.status |= STATUS_SPRITE_ZERO_HIT;
                }
                if sprite.priority == 0 { pixel | 0x10 } else { bg }
            }
        };

        let index = self.read_palette(color);
        self.put_pixel(index);
    }

    /// Pick the first 8 OAM entries that cover this scanline and fetch their pattern rows.
    pub(crate) fn evaluate_sprites(&mut self, cart: &Cartridge) {
        let height: i32 = if self.ctrl & CTRL_SPRITE_8X16 != 0 { 16 } else { 8 };
        let mut count = 0;

        for index in 0..64 {
            let entry = &self.oam[index * 4..index * 4 + 4];
            let (y, tile, attr, x) = (entry[0], entry[1], entry[2], entry[3]);

            let row = self.scanline as i32 - y as i32;
            if !(0..height).contains(&row) {
                continue;
            }

            if count < 8 {
                self.sprites[count] = SpriteSlot {
                    x,
                    pattern: self.sprite_pattern(tile, attr, row as u16, cart),
                    priority: (attr >> 5) & 1,
                    index: index as u8,
                };
            }
            count += 1;
        }

        if count > 8 {
            count = 8;
            self.status |= STATUS_SPRITE_OVERFLOW;
        }
        self.sprite_count = count;
    }

    pub(crate) fn sprite_pattern(&self, tile: u8, attr: u8, row: u16, cart: &Cartridge) -> u32 {
        let flip_v = attr & 0x80 != 0;
        let flip_h = attr & 0x40 != 0;

        let addr = if self.ctrl & CTRL_SPRITE_8X16 == 0 {
            let row = if flip_v { 7 - row } else { row };
            let table = if self.ctrl & CTRL_SPRITE_TABLE != 0 { 0x1000 } else { 0 };
            table + tile as u16 * 16 + row
        } else {
            let mut row = if flip_v { 15 - row } else { row };
            let table = (tile & 1) as u16 * 0x1000;
            let mut tile = (tile & 0xFE) as u16;
            if row > 7 {
                tile += 1;
                row -= 8;
            }
            table + tile * 16 + row
        };

        let palette = (attr & 0x03) << 2;
        let mut low = self.read(addr, cart);
        let mut high = self.read(addr + 8, cart);
        let mut pattern = 0u32;
        for _ in 0..8 {
            let (p0, p1) = if flip_h {
                let bits = (low & 1, (high & 1) << 1);
                low >>= 1;
                high >>= 1;
                bits
            } else {
                let bits = ((low >> 7) & 1, (high >> 6) & 2);
                low <<= 1;
                high <<= 1;
                bits
            };
            pattern = (pattern << 4) | (palette | p1 | p0) as u32;
        }
        pattern
    }

    /// Coarse X += 1, switching horizontal nametable on wrap.
    fn increment_x(&mut self) {
        if self.v & 0x001F == 31 {
            self.v &= !0x001F;
            self.v ^= 0x0400;
        } else {
            self.v += 1;
        }
    }

    /// Fine Y += 1, carrying into coarse Y. Row 29 wraps and switches vertical nametable;
    /// rows 30-31 (attribute memory) wrap without switching.
    pub(crate) fn increment_y(&mut self) {
        if self.v & 0x7000 != 0x7000 {
            self.v += 0x1000;
            return;
        }
        self.v &= !0x7000;
        let mut y = (self.v & 0x03E0) >> 5;
        match y {
            29 => {
                y = 0;
                self.v ^= 0x0800;
            }
            31 => y = 0,
            _ => y += 1,
        }
        self.v = (self.v & !0x03E0) | (y << 5);
    }

    // v: ....A.. ...BCDEF <- t: ....A.. ...BCDEF
    pub(crate) fn copy_x(&mut self) {
        self.v = (self.v & 0xFBE0) | (self.t & 0x041F);
    }

    // v: GHIA.BC DEF..... <- t: GHIA.BC DEF.....
    pub(crate) fn copy_y(&mut self) {
        self.v = (self.v & 0x841F) | (self.t & 0x7BE0);
    }
}
