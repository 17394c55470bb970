//! NES PPU (Picture Processing Unit) state and dot clock.
//!
//! Registers live in `registers`, the fetch pipeline and pixel output in `render`, and the PPU
//! bus in `memory`. This file owns the state and decides what each dot does.

use crate::{
    cartridge::Cartridge,
    ppu::{FRAME_HEIGHT, FRAME_WIDTH, Frame},
};

pub const DOTS_PER_SCANLINE: u16 = 341;
pub const VBLANK_SCANLINE: u16 = 241;
pub const PRE_RENDER_SCANLINE: u16 = 261;

// PPUCTRL ($2000)
pub const CTRL_INCREMENT_32: u8 = 1 << 2;
pub const CTRL_SPRITE_TABLE: u8 = 1 << 3;
pub const CTRL_BACKGROUND_TABLE: u8 = 1 << 4;
pub const CTRL_SPRITE_8X16: u8 = 1 << 5;
pub const CTRL_NMI: u8 = 1 << 7;

// PPUMASK ($2001)
pub const MASK_GREYSCALE: u8 = 1 << 0;
pub const MASK_BACKGROUND_LEFT: u8 = 1 << 1;
pub const MASK_SPRITES_LEFT: u8 = 1 << 2;
pub const MASK_SHOW_BACKGROUND: u8 = 1 << 3;
pub const MASK_SHOW_SPRITES: u8 = 1 << 4;

// PPUSTATUS ($2002)
pub const STATUS_SPRITE_OVERFLOW: u8 = 1 << 5;
pub const STATUS_SPRITE_ZERO_HIT: u8 = 1 << 6;
pub const STATUS_VBLANK: u8 = 1 << 7;

/// OAM (Object Attribute Memory): 64 sprites × 4 bytes. Each entry: Y, tile, attr, X.
pub const OAM_LEN: usize = 256;

/// A sprite selected for the next scanline.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SpriteSlot {
    pub x: u8,
    /// Eight 4-bit pixels, leftmost in the top nibble: `palette << 2 | pattern bits`.
    pub pattern: u32,
    /// Attribute bit 5: 0 in front of the background, 1 behind.
    pub priority: u8,
    /// OAM entry number; entry 0 drives sprite-0 hit.
    pub index: u8,
}

/// PPU state: timing, scroll registers, VRAM, palettes, OAM, and framebuffer.
pub struct Ppu {
    pub ctrl: u8,
    pub mask: u8,
    pub status: u8,
    pub oam_addr: u8,

    /// Current VRAM address (15 bits).
    pub v: u16,
    /// Temporary VRAM address; the top-left of the screen (15 bits).
    pub t: u16,
    /// Fine X scroll (3 bits).
    pub fine_x: u8,
    /// Shared $2005/$2006 write toggle; false means the next write is the first.
    pub write_latch: bool,

    /// 0..=261
    pub scanline: u16,
    /// 0..=340
    pub dot: u16,
    /// Completed frames since power-on.
    pub frame_count: u64,

    pub(crate) oam: [u8; OAM_LEN],
    pub(crate) vram: [u8; 0x800],
    pub(crate) palette: [u8; 32],

    /// Last value written to any register; what write-only ports read back as.
    pub(crate) open_bus: u8,
    /// $2007 read buffer.
    pub(crate) read_buffer: u8,
    pub(crate) nmi_requested: bool,

    pub(crate) nametable_latch: u8,
    pub(crate) attribute_latch: u8,
    pub(crate) pattern_low_latch: u8,
    pub(crate) pattern_high_latch: u8,
    /// Two tiles of background, 4 bits per pixel; the pixel on screen is in the upper half.
    pub(crate) bg_shift: u64,

    pub(crate) sprites: [SpriteSlot; 8],
    pub(crate) sprite_count: usize,

    frame: Box<Frame>,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    /// Create a PPU at scanline 0, dot 0 with all memories cleared.
    pub fn new() -> Self {
        Self {
            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            v: 0,
            t: 0,
            fine_x: 0,
            write_latch: false,
            scanline: 0,
            dot: 0,
            frame_count: 0,
            oam: [0; OAM_LEN],
            vram: [0; 0x800],
            palette: [0; 32],
            open_bus: 0,
            read_buffer: 0,
            nmi_requested: false,
            nametable_latch: 0,
            attribute_latch: 0,
            pattern_low_latch: 0,
            pattern_high_latch: 0,
            bg_shift: 0,
            sprites: [SpriteSlot::default(); 8],
            sprite_count: 0,
            frame: Box::new([0; FRAME_WIDTH * FRAME_HEIGHT]),
        }
    }

    /// Reset button: registers and timing go back to power-on values, memories are kept.
    pub fn reset(&mut self) {
        self.ctrl = 0;
        self.mask = 0;
        self.oam_addr = 0;
        self.t = 0;
        self.fine_x = 0;
        self.write_latch = false;
        self.read_buffer = 0;
        self.nmi_requested = false;
        self.scanline = 0;
        self.dot = 0;
        self.sprite_count = 0;
    }

    /// Advance one dot. Returns true when the pre-render line wraps to scanline 0, which is
    /// when the frame buffer holds a finished picture.
    pub fn tick(&mut self, cart: &Cartridge) -> bool {
        match self.scanline {
            0..=239 => self.visible_dot(cart),
            VBLANK_SCANLINE if self.dot == 1 => self.enter_vblank(),
            PRE_RENDER_SCANLINE => self.pre_render_dot(cart),
            _ => {}
        }

        self.dot += 1;
        if self.dot == DOTS_PER_SCANLINE {
            self.dot = 0;
            self.scanline += 1;
            if self.scanline > PRE_RENDER_SCANLINE {
                self.scanline = 0;
                self.frame_count += 1;
                return true;
            }
        }
        false
    }

    /// Take the pending NMI request, if any.
    pub fn poll_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_requested)
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn oam(&self) -> &[u8; OAM_LEN] {
        &self.oam
    }

    pub fn rendering_enabled(&self) -> bool {
        self.mask & (MASK_SHOW_BACKGROUND | MASK_SHOW_SPRITES) != 0
    }

    fn visible_dot(&mut self, cart: &Cartridge) {
        if !self.rendering_enabled() {
            if (1..=256).contains(&self.dot) {
                let backdrop = self.read_palette(0);
                self.put_pixel(backdrop);
            }
            return;
        }

        if (1..=256).contains(&self.dot) {
            self.render_pixel();
        }
        self.fetch_background(cart);
        if self.dot == 257 {
            self.evaluate_sprites(cart);
        }
    }

    fn pre_render_dot(&mut self, cart: &Cartridge) {
        if self.dot == 1 {
            self.status &= !(STATUS_VBLANK | STATUS_SPRITE_ZERO_HIT | STATUS_SPRITE_OVERFLOW);
        }
        if self.dot == 257 {
            self.sprite_count = 0;
        }
        if !self.rendering_enabled() {
            return;
        }

        self.fetch_background(cart);
        if (280..=304).contains(&self.dot) {
            self.copy_y();
        }
    }

    fn enter_vblank(&mut self) {
        self.status |= STATUS_VBLANK;
        if self.ctrl & CTRL_NMI != 0 {
            self.nmi_requested = true;
        }
    }

    /// Store palette colour `index` at the pixel for the current dot.
    pub(crate) fn put_pixel(&mut self, index: u8) {
        let x = (self.dot - 1) as usize;
        let y = self.scanline as usize;
        let index = if self.mask & MASK_GREYSCALE != 0 {
            index & 0x30
        } else {
            index
        };
        self.frame[y * FRAME_WIDTH + x] = crate::ppu::NES_PALETTE_RGB[(index & 0x3F) as usize];
    }
}
