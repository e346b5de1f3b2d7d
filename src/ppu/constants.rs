// PPU constants

/// Size of one nametable in bytes (1KB)
pub(super) const NAMETABLE_SIZE: usize = 1024;

/// Size of palette RAM in bytes
pub(super) const PALETTE_SIZE: usize = 32;

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// OAM size: 64 sprites x 4 bytes
pub(super) const OAM_SIZE: usize = 256;

/// Secondary OAM: up to 8 sprites for one scanline
pub(super) const SECONDARY_OAM_SIZE: usize = 32;

// ========================================
// Timing (NTSC)
// ========================================

/// Dots per scanline
pub(super) const DOTS_PER_SCANLINE: u16 = 341;

/// Scanlines per frame
pub(super) const SCANLINES_PER_FRAME: u16 = 262;

/// Last visible scanline
pub(super) const LAST_VISIBLE_SCANLINE: u16 = 239;

/// Post-render idle scanline
pub(super) const POSTRENDER_SCANLINE: u16 = 240;

/// First vblank scanline; vblank begins at dot 1
pub(super) const VBLANK_SCANLINE: u16 = 241;

/// Pre-render scanline
pub(super) const PRERENDER_SCANLINE: u16 = 261;

// ========================================
// PPUSTATUS bits
// ========================================

/// Vertical blank flag (bit 7)
pub(super) const STATUS_VBLANK: u8 = 0x80;

/// Sprite zero hit flag (bit 6)
pub(super) const STATUS_SPRITE_ZERO_HIT: u8 = 0x40;

/// Sprite overflow flag (bit 5); cleared but never raised here
pub(super) const STATUS_SPRITE_OVERFLOW: u8 = 0x20;

// ========================================
// PPUCTRL bits
// ========================================

/// NMI on vblank enable (bit 7)
pub(super) const CTRL_NMI_ENABLE: u8 = 0x80;

/// Background pattern table select (bit 4)
pub(super) const CTRL_BG_TABLE: u8 = 0x10;

/// Sprite pattern table select (bit 3), 8x8 mode only
pub(super) const CTRL_SPRITE_TABLE: u8 = 0x08;

/// VRAM address increment select: 1 or 32 (bit 2)
pub(super) const CTRL_INCREMENT_32: u8 = 0x04;

// ========================================
// PPUMASK bits
// ========================================

/// Show background (bit 3)
pub(super) const MASK_SHOW_BACKGROUND: u8 = 0x08;

/// Show sprites (bit 4)
pub(super) const MASK_SHOW_SPRITES: u8 = 0x10;

/// Grayscale output (bit 0)
pub(super) const MASK_GRAYSCALE: u8 = 0x01;
