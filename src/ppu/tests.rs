use crate::{
    cartridge::{Cartridge, Mirroring},
    ppu::{
        FRAME_WIDTH, NES_PALETTE_RGB,
        ppu::{DOTS_PER_SCANLINE, Ppu, STATUS_SPRITE_OVERFLOW, STATUS_SPRITE_ZERO_HIT, STATUS_VBLANK},
    },
};

const DOTS_PER_FRAME: usize = DOTS_PER_SCANLINE as usize * 262;

/// NROM board with CHR RAM so tests can write patterns.
fn new_cart() -> Cartridge {
    Cartridge::new(vec![0; 0x4000], vec![], 0, Mirroring::Vertical).unwrap()
}

fn set_addr(ppu: &mut Ppu, cart: &mut Cartridge, addr: u16) {
    ppu.write_register(6, (addr >> 8) as u8, cart);
    ppu.write_register(6, addr as u8, cart);
}

fn poke(ppu: &mut Ppu, cart: &mut Cartridge, addr: u16, data: &[u8]) {
    set_addr(ppu, cart, addr);
    for &byte in data {
        ppu.write_register(7, byte, cart);
    }
}

fn run_frame(ppu: &mut Ppu, cart: &Cartridge) {
    while !ppu.tick(cart) {}
}

fn tick_n(ppu: &mut Ppu, cart: &Cartridge, dots: usize) {
    for _ in 0..dots {
        ppu.tick(cart);
    }
}

fn pixel(ppu: &Ppu, x: usize, y: usize) -> u32 {
    ppu.frame()[y * FRAME_WIDTH + x]
}

/// Tile 1 is solid colour 1; nametable 0 is all tile 1; backdrop $0F, colour 1 $16,
/// sprite colour 1 $2A. OAM is parked off screen and `t`/`v` are back at 0.
fn solid_background() -> (Ppu, Cartridge) {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    poke(&mut ppu, &mut cart, 0x0010, &[0xFF; 8]);
    poke(&mut ppu, &mut cart, 0x2000, &[0x01; 960]);
    poke(&mut ppu, &mut cart, 0x3F00, &[0x0F, 0x16]);
    poke(&mut ppu, &mut cart, 0x3F11, &[0x2A]);
    ppu.oam_dma(&[0xFF; 256]);
    set_addr(&mut ppu, &mut cart, 0x0000);
    (ppu, cart)
}

fn place_sprite(ppu: &mut Ppu, index: usize, y: u8, tile: u8, attr: u8, x: u8) {
    ppu.oam[index * 4..index * 4 + 4].copy_from_slice(&[y, tile, attr, x]);
}

#[test]
fn ctrl_write_sets_nametable_bits_of_t() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    ppu.write_register(0, 0x03, &mut cart);
    assert_eq!(ppu.t & 0x0C00, 0x0C00);
    ppu.write_register(0, 0x01, &mut cart);
    assert_eq!(ppu.t & 0x0C00, 0x0400);
}

#[test]
fn scroll_and_addr_writes_follow_loopy_layout() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();

    ppu.write_register(0, 0x00, &mut cart);
    ppu.read_register(2, &cart);
    ppu.write_register(5, 0x7D, &mut cart);
    assert_eq!(ppu.t, 0x000F);
    assert_eq!(ppu.fine_x, 0x05);
    assert!(ppu.write_latch);

    ppu.write_register(5, 0x5E, &mut cart);
    assert_eq!(ppu.t, 0x616F);
    assert!(!ppu.write_latch);

    ppu.write_register(6, 0x3D, &mut cart);
    assert_eq!(ppu.t, 0x3D6F);
    ppu.write_register(6, 0xF0, &mut cart);
    assert_eq!(ppu.t, 0x3DF0);
    assert_eq!(ppu.v, 0x3DF0);
}

#[test]
fn status_read_resets_write_toggle() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();

    ppu.write_register(6, 0x3F, &mut cart);
    ppu.read_register(2, &cart);
    ppu.write_register(6, 0x21, &mut cart);
    ppu.write_register(6, 0x00, &mut cart);

    assert_eq!(ppu.v, 0x2100);
}

#[test]
fn status_read_mixes_last_write_and_clears_vblank() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    ppu.status = STATUS_VBLANK;
    ppu.write_register(1, 0x1E, &mut cart);

    assert_eq!(ppu.read_register(2, &cart), 0x9E);
    assert_eq!(ppu.read_register(2, &cart), 0x1E);
}

#[test]
fn write_only_ports_read_back_last_write() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    ppu.write_register(0, 0x55, &mut cart);

    assert_eq!(ppu.read_register(0, &cart), 0x55);
    assert_eq!(ppu.read_register(5, &cart), 0x55);
}

#[test]
fn oam_data_write_increments_address() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    ppu.write_register(3, 0x10, &mut cart);
    ppu.write_register(4, 0xAA, &mut cart);
    ppu.write_register(4, 0xBB, &mut cart);

    assert_eq!(ppu.oam[0x10], 0xAA);
    assert_eq!(ppu.oam[0x11], 0xBB);
    assert_eq!(ppu.oam_addr, 0x12);
    ppu.write_register(3, 0x11, &mut cart);
    assert_eq!(ppu.read_register(4, &cart), 0xBB);
}

#[test]
fn oam_dma_starts_at_oam_addr_and_wraps() {
    let mut ppu = Ppu::new();
    let mut page = [0u8; 256];
    for (i, byte) in page.iter_mut().enumerate() {
        *byte = i as u8;
    }
    ppu.oam_addr = 0x04;
    ppu.oam_dma(&page);

    assert_eq!(ppu.oam[0x04], 0x00);
    assert_eq!(ppu.oam[0xFF], 0xFB);
    assert_eq!(ppu.oam[0x00], 0xFC);
    assert_eq!(ppu.oam_addr, 0x04);
}

#[test]
fn data_reads_are_buffered_below_palette() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    poke(&mut ppu, &mut cart, 0x2005, &[0xAB, 0xCD]);

    set_addr(&mut ppu, &mut cart, 0x2005);
    assert_eq!(ppu.read_register(7, &cart), 0x00);
    assert_eq!(ppu.read_register(7, &cart), 0xAB);
    assert_eq!(ppu.read_register(7, &cart), 0xCD);
}

#[test]
fn palette_reads_are_immediate_and_mirrored() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    poke(&mut ppu, &mut cart, 0x3F10, &[0x2A]);

    set_addr(&mut ppu, &mut cart, 0x3F00);
    assert_eq!(ppu.read_register(7, &cart), 0x2A);
}

#[test]
fn data_increment_follows_ctrl() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    ppu.write_register(0, 0x04, &mut cart);
    poke(&mut ppu, &mut cart, 0x2000, &[0x01, 0x02]);

    assert_eq!(ppu.v, 0x2040);
    assert_eq!(ppu.vram[0x20], 0x02);
}

#[test]
fn nametable_writes_alias_under_mirroring() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart(); // vertical
    poke(&mut ppu, &mut cart, 0x2801, &[0x77]);

    set_addr(&mut ppu, &mut cart, 0x2001);
    ppu.read_register(7, &cart);
    assert_eq!(ppu.read_register(7, &cart), 0x77);
}

#[test]
fn one_frame_is_262_scanlines_of_341_dots() {
    let mut ppu = Ppu::new();
    let cart = new_cart();

    let completed = (0..DOTS_PER_FRAME).filter(|_| ppu.tick(&cart)).count();

    assert_eq!(completed, 1);
    assert_eq!((ppu.scanline, ppu.dot), (0, 0));
    assert_eq!(ppu.frame_count, 1);
}

#[test]
fn vblank_sets_at_241_and_requests_nmi() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    ppu.write_register(0, 0x80, &mut cart);

    tick_n(&mut ppu, &cart, 241 * 341 + 1);
    assert_eq!(ppu.status & STATUS_VBLANK, 0);
    assert!(!ppu.poll_nmi());

    ppu.tick(&cart);
    assert_ne!(ppu.status & STATUS_VBLANK, 0);
    assert!(ppu.poll_nmi());
    assert!(!ppu.poll_nmi());

    tick_n(&mut ppu, &cart, 20 * 341);
    assert_eq!((ppu.scanline, ppu.dot), (261, 2));
    assert_eq!(ppu.status & STATUS_VBLANK, 0);
}

#[test]
fn vblank_without_nmi_enable_requests_nothing() {
    let mut ppu = Ppu::new();
    let cart = new_cart();
    run_frame(&mut ppu, &cart);
    assert!(!ppu.poll_nmi());
}

#[test]
fn enabling_nmi_during_vblank_raises_nmi() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    ppu.status = STATUS_VBLANK;

    ppu.write_register(0, 0x80, &mut cart);
    assert!(ppu.poll_nmi());

    // Already enabled: rewriting does not raise another.
    ppu.write_register(0, 0x80, &mut cart);
    assert!(!ppu.poll_nmi());
}

#[test]
fn rendering_disabled_outputs_backdrop() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    poke(&mut ppu, &mut cart, 0x3F00, &[0x21]);

    run_frame(&mut ppu, &cart);

    assert!(ppu.frame().iter().all(|&p| p == NES_PALETTE_RGB[0x21]));
}

#[test]
fn greyscale_masks_colour_index() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    poke(&mut ppu, &mut cart, 0x3F00, &[0x21]);
    ppu.write_register(1, 0x01, &mut cart);

    run_frame(&mut ppu, &cart);

    assert_eq!(pixel(&ppu, 0, 0), NES_PALETTE_RGB[0x20]);
}

#[test]
fn background_tiles_are_drawn() {
    let (mut ppu, mut cart) = solid_background();
    ppu.write_register(1, 0x0A, &mut cart);

    run_frame(&mut ppu, &cart);
    run_frame(&mut ppu, &cart);

    assert_eq!(pixel(&ppu, 0, 0), NES_PALETTE_RGB[0x16]);
    assert_eq!(pixel(&ppu, 128, 120), NES_PALETTE_RGB[0x16]);
    assert_eq!(pixel(&ppu, 255, 239), NES_PALETTE_RGB[0x16]);
}

#[test]
fn left_column_mask_hides_background() {
    let (mut ppu, mut cart) = solid_background();
    ppu.write_register(1, 0x08, &mut cart);

    run_frame(&mut ppu, &cart);
    run_frame(&mut ppu, &cart);

    assert_eq!(pixel(&ppu, 0, 10), NES_PALETTE_RGB[0x0F]);
    assert_eq!(pixel(&ppu, 7, 10), NES_PALETTE_RGB[0x0F]);
    assert_eq!(pixel(&ppu, 8, 10), NES_PALETTE_RGB[0x16]);
}

#[test]
fn sprite_zero_hit_on_opaque_overlap() {
    let (mut ppu, mut cart) = solid_background();
    place_sprite(&mut ppu, 0, 20, 0x01, 0x00, 30);
    ppu.write_register(1, 0x1E, &mut cart);

    tick_n(&mut ppu, &cart, 20 * 341);
    assert_eq!(ppu.status & STATUS_SPRITE_ZERO_HIT, 0);

    tick_n(&mut ppu, &cart, 10 * 341);
    assert_ne!(ppu.status & STATUS_SPRITE_ZERO_HIT, 0);
}

#[test]
fn sprite_zero_hit_needs_opaque_background() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    poke(&mut ppu, &mut cart, 0x0010, &[0xFF; 8]);
    ppu.oam_dma(&[0xFF; 256]);
    set_addr(&mut ppu, &mut cart, 0x0000);
    place_sprite(&mut ppu, 0, 20, 0x01, 0x00, 30);
    ppu.write_register(1, 0x1E, &mut cart);

    tick_n(&mut ppu, &cart, 240 * 341);
    assert_eq!(ppu.status & STATUS_SPRITE_ZERO_HIT, 0);
}

#[test]
fn more_than_eight_sprites_sets_overflow() {
    let (mut ppu, mut cart) = solid_background();
    for i in 0..9 {
        place_sprite(&mut ppu, i, 50, 0x01, 0x00, (i * 10) as u8);
    }
    ppu.write_register(1, 0x18, &mut cart);

    tick_n(&mut ppu, &cart, 50 * 341 + 257);
    assert_eq!(ppu.status & STATUS_SPRITE_OVERFLOW, 0);

    ppu.tick(&cart);
    assert_ne!(ppu.status & STATUS_SPRITE_OVERFLOW, 0);
    assert_eq!(ppu.sprite_count, 8);
    assert_eq!(ppu.sprites[7].index, 7);
}

#[test]
fn sprite_priority_decides_over_opaque_background() {
    let (mut ppu, mut cart) = solid_background();
    place_sprite(&mut ppu, 1, 50, 0x01, 0x20, 100); // behind
    place_sprite(&mut ppu, 2, 50, 0x01, 0x00, 200); // in front
    ppu.write_register(1, 0x1E, &mut cart);

    run_frame(&mut ppu, &cart);

    assert_eq!(pixel(&ppu, 100, 55), NES_PALETTE_RGB[0x16]);
    assert_eq!(pixel(&ppu, 200, 55), NES_PALETTE_RGB[0x2A]);
    assert_eq!(pixel(&ppu, 200, 50), NES_PALETTE_RGB[0x16]);
    assert_eq!(pixel(&ppu, 200, 59), NES_PALETTE_RGB[0x16]);
}

#[test]
fn sprite_horizontal_flip_reverses_row() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    poke(&mut ppu, &mut cart, 0x0020, &[0x80, 0, 0, 0, 0, 0, 0, 0]); // tile 2: one pixel, left

    let plain = ppu.sprite_pattern(0x02, 0x00, 0, &cart);
    let flipped = ppu.sprite_pattern(0x02, 0x40, 0, &cart);
    assert_eq!(plain, 0x1000_0000);
    assert_eq!(flipped, 0x0000_0001);
}

#[test]
fn tall_sprites_use_tile_pair_and_flip_vertically() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    poke(&mut ppu, &mut cart, 0x1020, &[0x80]); // $1000 table, tile 2, row 0, low plane
    poke(&mut ppu, &mut cart, 0x103F, &[0x80]); // $1000 table, tile 3, row 7, high plane
    ppu.write_register(0, 0x20, &mut cart);

    assert_eq!(ppu.sprite_pattern(0x03, 0x00, 0, &cart), 0x1000_0000);
    assert_eq!(ppu.sprite_pattern(0x03, 0x00, 15, &cart), 0x2000_0000);
    assert_eq!(ppu.sprite_pattern(0x03, 0x80, 0, &cart), 0x2000_0000);
    assert_eq!(ppu.sprite_pattern(0x03, 0x80, 15, &cart), 0x1000_0000);

    // even tile numbers select the $0000 table, which is empty here
    assert_eq!(ppu.sprite_pattern(0x02, 0x00, 0, &cart), 0);
}

#[test]
fn fine_x_and_attribute_reach_background_pixels() {
    let mut ppu = Ppu::new();
    let mut cart = new_cart();
    poke(&mut ppu, &mut cart, 0x0010, &[0x80; 8]); // tile 1: left column only
    let mut nametable = vec![0x01; 960];
    nametable.extend([0x55; 64]); // every quadrant on palette 1
    poke(&mut ppu, &mut cart, 0x2000, &nametable);
    poke(&mut ppu, &mut cart, 0x3F00, &[0x0F]);
    poke(&mut ppu, &mut cart, 0x3F05, &[0x30]);
    ppu.oam_dma(&[0xFF; 256]);
    set_addr(&mut ppu, &mut cart, 0x0000);
    ppu.write_register(5, 0x03, &mut cart);
    ppu.write_register(5, 0x00, &mut cart);
    ppu.write_register(1, 0x0A, &mut cart);

    run_frame(&mut ppu, &cart);
    run_frame(&mut ppu, &cart);

    for x in [5, 13, 21] {
        assert_eq!(pixel(&ppu, x, 0), NES_PALETTE_RGB[0x30]);
        assert_eq!(pixel(&ppu, x, 100), NES_PALETTE_RGB[0x30]);
    }
    assert_eq!(pixel(&ppu, 0, 0), NES_PALETTE_RGB[0x0F]);
    assert_eq!(pixel(&ppu, 4, 0), NES_PALETTE_RGB[0x0F]);
    assert_eq!(pixel(&ppu, 6, 0), NES_PALETTE_RGB[0x0F]);
}

#[test]
fn coarse_x_wraps_into_next_nametable() {
    let mut ppu = Ppu::new();
    let cart = new_cart();

    ppu.dot = 8;
    ppu.v = 31;
    ppu.fetch_background(&cart);
    assert_eq!(ppu.v, 0x0400);

    ppu.v = 0x041F;
    ppu.fetch_background(&cart);
    assert_eq!(ppu.v, 0x0000);

    ppu.v = 0x0005;
    ppu.fetch_background(&cart);
    assert_eq!(ppu.v, 0x0006);
}

#[test]
fn increment_y_wraps_rows() {
    let mut ppu = Ppu::new();

    ppu.v = 0x7000 | (29 << 5);
    ppu.increment_y();
    assert_eq!(ppu.v, 0x0800);

    ppu.v = 0x7000 | (31 << 5);
    ppu.increment_y();
    assert_eq!(ppu.v, 0x0000);

    ppu.v = 0x1000;
    ppu.increment_y();
    assert_eq!(ppu.v, 0x2000);
}

#[test]
fn copy_x_and_copy_y_split_t() {
    let mut ppu = Ppu::new();
    ppu.t = 0x7FFF;

    ppu.copy_x();
    assert_eq!(ppu.v, 0x041F);

    ppu.copy_y();
    assert_eq!(ppu.v, 0x7FFF);
}
