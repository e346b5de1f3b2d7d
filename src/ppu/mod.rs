// PPU module - Ricoh 2C02 Picture Processing Unit
//
// A dot-driven implementation: `step` executes exactly one PPU dot, the
// console calls it three times per CPU cycle. Rendering follows the
// hardware pipeline - background tiles stream through shift registers
// fed by an 8-dot fetch cadence, sprites are evaluated into secondary
// OAM and latched per scanline, and pixels are muxed out on dots 1-256
// of the visible lines.
//
// ## Frame layout (NTSC)
//
// - Scanlines 0-239: visible, 256 pixels each
// - Scanline 240: post-render idle
// - Scanlines 241-260: vertical blank (flag set at 241 dot 1)
// - Scanline 261: pre-render (flags cleared at dot 1, vertical scroll
//   restored during dots 280-304)
//
// ## Register map ($2000-$2007, mirrored through $3FFF)
//
// | Address | Name       | Access  | Description                    |
// |---------|------------|---------|--------------------------------|
// | $2000   | PPUCTRL    | Write   | NMI enable, table selects      |
// | $2001   | PPUMASK    | Write   | Rendering enables, grayscale   |
// | $2002   | PPUSTATUS  | Read    | Flags; read clears vblank + w  |
// | $2003   | OAMADDR    | Write   | OAM address port               |
// | $2004   | OAMDATA    | R/W     | OAM data port                  |
// | $2005   | PPUSCROLL  | Write x2| Scroll position                |
// | $2006   | PPUADDR    | Write x2| VRAM address                   |
// | $2007   | PPUDATA    | R/W     | VRAM data port (buffered read) |

mod constants;
mod memory;
mod registers;
mod rendering;

pub use constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::cartridge::{Mapper, Mirroring};
use constants::*;
use std::cell::RefCell;
use std::rc::Rc;

/// PPU structure: registers, VRAM, OAM and the rendering pipeline state
pub struct Ppu {
    // ========================================
    // Registers ($2000-$2007)
    // ========================================
    /// $2000: PPUCTRL
    ///
    /// Bit layout:
    /// - 7: Generate NMI at start of vblank
    /// - 6: Master/slave (unused)
    /// - 5: Sprite size (8x16 stored but not rendered)
    /// - 4: Background pattern table ($0000/$1000)
    /// - 3: Sprite pattern table ($0000/$1000)
    /// - 2: VRAM increment (1 or 32)
    /// - 1-0: Base nametable, latched into t
    pub(crate) ppuctrl: u8,

    /// $2001: PPUMASK - rendering enables, grayscale, emphasis
    pub(crate) ppumask: u8,

    /// $2002: PPUSTATUS - vblank, sprite zero hit, sprite overflow
    pub(crate) ppustatus: u8,

    /// $2003: OAMADDR
    pub(crate) oam_addr: u8,

    // ========================================
    // Internal scroll/address registers
    // ========================================
    /// v: current VRAM address (15 bits)
    ///
    /// Bit layout: `fine_y(3) | nametable(2) | coarse_y(5) | coarse_x(5)`.
    /// Doubles as the live scroll position while rendering.
    pub(crate) v: u16,

    /// t: latched VRAM address, same layout as v
    ///
    /// The "top-left of the screen" address that $2000/$2005/$2006
    /// writes assemble; copied into v at defined dots.
    pub(crate) t: u16,

    /// Fine X scroll (3 bits), the pixel offset within a tile
    pub(crate) fine_x: u8,

    /// w: shared first/second write toggle for $2005 and $2006
    ///
    /// One boolean on the PPU, not per-register state. Reading $2002
    /// resets it.
    pub(crate) write_latch: bool,

    /// $2007 read buffer: non-palette reads lag one access behind
    pub(crate) read_buffer: u8,

    // ========================================
    // Memory
    // ========================================
    /// 2KB of nametable VRAM, addressed through the mirroring mode
    pub(crate) nametables: [u8; NAMETABLE_SIZE * 2],

    /// 32 bytes of palette RAM with the $3F10/$14/$18/$1C aliases
    pub(crate) palette_ram: [u8; PALETTE_SIZE],

    /// Fallback mirroring when no mapper is attached
    pub(crate) mirroring: Mirroring,

    /// CHR access and live mirroring, shared with the CPU bus
    pub(crate) mapper: Option<Rc<RefCell<Box<dyn Mapper>>>>,

    /// Primary OAM: 64 sprites x (Y, tile, attributes, X)
    pub(crate) oam: [u8; OAM_SIZE],

    // ========================================
    // Timing
    // ========================================
    /// Current dot within the scanline, 0-340
    pub(crate) dot: u16,

    /// Current scanline, 0-261
    pub(crate) scanline: u16,

    /// Frames completed since power-on
    pub(crate) frame: u64,

    /// Raised at (241,1) when NMI is enabled; consumed by the console
    pub(crate) nmi_pending: bool,

    // ========================================
    // Background pipeline
    // ========================================
    /// Pattern shift registers: high byte renders, low byte preloads
    pub(crate) bg_pattern_shift_low: u16,
    pub(crate) bg_pattern_shift_high: u16,

    /// Attribute shift registers, one palette bit each, byte-expanded
    pub(crate) bg_attr_shift_low: u16,
    pub(crate) bg_attr_shift_high: u16,

    /// Latches for the tile being fetched this 8-dot cycle
    pub(crate) bg_nametable_byte: u8,
    pub(crate) bg_attribute_bits: u8,
    pub(crate) bg_pattern_low: u8,
    pub(crate) bg_pattern_high: u8,

    // ========================================
    // Sprite pipeline
    // ========================================
    /// Secondary OAM: the up-to-8 sprites picked for the next scanline
    pub(crate) secondary_oam: [u8; SECONDARY_OAM_SIZE],

    /// Sprites copied into secondary OAM by the evaluation in flight
    pub(crate) pending_sprite_count: usize,

    /// Number of latched sprites active on the line being drawn
    pub(crate) sprite_count: usize,

    /// Latched pattern bytes for the active scanline, flips pre-applied
    pub(crate) sprite_pattern_low: [u8; 8],
    pub(crate) sprite_pattern_high: [u8; 8],

    /// Latched attribute bytes
    pub(crate) sprite_attributes: [u8; 8],

    /// Latched X positions
    pub(crate) sprite_x: [u8; 8],

    /// Whether secondary OAM slot 0 holds the copy of OAM sprite 0
    pub(crate) sprite_0_present: bool,

    /// sprite_0_present for the evaluation in flight, moved into place
    /// when the latches load at dot 257
    pub(crate) pending_sprite_0: bool,

    // ========================================
    // Output
    // ========================================
    /// 256x240 frame of palette indices (0-63)
    pub(crate) frame_buffer: [u8; SCREEN_WIDTH * SCREEN_HEIGHT],
}

impl Ppu {
    /// Create a new PPU in its power-on state
    pub fn new() -> Self {
        Ppu {
            ppuctrl: 0,
            ppumask: 0,
            ppustatus: 0,
            oam_addr: 0,

            v: 0,
            t: 0,
            fine_x: 0,
            write_latch: false,
            read_buffer: 0,

            nametables: [0; NAMETABLE_SIZE * 2],
            palette_ram: [0; PALETTE_SIZE],
            mirroring: Mirroring::Horizontal,
            mapper: None,

            oam: [0; OAM_SIZE],

            dot: 0,
            scanline: 0,
            frame: 0,
            nmi_pending: false,

            bg_pattern_shift_low: 0,
            bg_pattern_shift_high: 0,
            bg_attr_shift_low: 0,
            bg_attr_shift_high: 0,
            bg_nametable_byte: 0,
            bg_attribute_bits: 0,
            bg_pattern_low: 0,
            bg_pattern_high: 0,

            secondary_oam: [0xFF; SECONDARY_OAM_SIZE],
            pending_sprite_count: 0,
            sprite_count: 0,
            sprite_pattern_low: [0; 8],
            sprite_pattern_high: [0; 8],
            sprite_attributes: [0; 8],
            sprite_x: [0xFF; 8],
            sprite_0_present: false,
            pending_sprite_0: false,

            frame_buffer: [0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    /// Reset registers and pipeline state
    ///
    /// Mirroring is not reset; it belongs to the cartridge.
    pub fn reset(&mut self) {
        let mapper = self.mapper.take();
        let mirroring = self.mirroring;
        *self = Ppu::new();
        self.mapper = mapper;
        self.mirroring = mirroring;
    }

    /// Attach the cartridge mapper for CHR access and live mirroring
    pub fn set_mapper(&mut self, mapper: Rc<RefCell<Box<dyn Mapper>>>) {
        self.mirroring = mapper.borrow().mirroring();
        self.mapper = Some(mapper);
    }

    /// Set the fallback mirroring used when no mapper is attached
    pub fn set_mirroring(&mut self, mirroring: Mirroring) {
        self.mirroring = mirroring;
    }

    /// Write one byte into OAM, used by the $4014 DMA engine
    pub fn write_oam(&mut self, addr: u8, value: u8) {
        self.oam[addr as usize] = value;
    }

    /// Read one byte from OAM
    pub fn read_oam(&self, addr: u8) -> u8 {
        self.oam[addr as usize]
    }

    /// The rendered frame as palette indices, row-major 256x240
    pub fn frame(&self) -> &[u8] {
        &self.frame_buffer
    }

    /// Whether an NMI is waiting for the CPU
    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// Consume the pending NMI, returning whether one was raised
    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_pending)
    }

    /// Current scanline, 0-261
    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    /// Current dot within the scanline, 0-340
    pub fn dot(&self) -> u16 {
        self.dot
    }

    /// Frames completed since power-on
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    // ========================================
    // Dot-driven execution
    // ========================================

    /// Execute one PPU dot
    ///
    /// Processes the events scheduled at the current (scanline, dot),
    /// then advances the counters. Returns true when a frame completed
    /// (the counters wrapped back to scanline 0).
    pub fn step(&mut self) -> bool {
        match self.scanline {
            0..=LAST_VISIBLE_SCANLINE => self.scanline_dot(false),
            POSTRENDER_SCANLINE => {}
            VBLANK_SCANLINE => {
                if self.dot == 1 {
                    self.ppustatus |= STATUS_VBLANK;
                    if self.ppuctrl & CTRL_NMI_ENABLE != 0 {
                        self.nmi_pending = true;
                    }
                }
            }
            PRERENDER_SCANLINE => {
                if self.dot == 1 {
                    self.ppustatus &=
                        !(STATUS_VBLANK | STATUS_SPRITE_ZERO_HIT | STATUS_SPRITE_OVERFLOW);
                    self.nmi_pending = false;
                }

                self.scanline_dot(true);

                if (280..=304).contains(&self.dot) && self.rendering_enabled() {
                    self.copy_vertical_scroll();
                }
            }
            _ => {}
        }

        self.dot += 1;
        if self.dot >= DOTS_PER_SCANLINE {
            self.dot = 0;
            self.scanline += 1;
            if self.scanline >= SCANLINES_PER_FRAME {
                self.scanline = 0;
                self.frame += 1;
                return true;
            }
        }

        false
    }

    /// Events shared by visible scanlines and the pre-render line
    fn scanline_dot(&mut self, prerender: bool) {
        let rendering = self.rendering_enabled();

        // Sprite schedule: clear secondary OAM, scan primary OAM, then
        // latch patterns. The scan targets the line these latches will
        // paint - the next one down (the pre-render line feeds line 0).
        if rendering {
            match self.dot {
                1 => self.clear_secondary_oam(),
                64 => self.evaluate_sprites(),
                257 => self.load_sprite_latches(),
                _ => {}
            }
        }

        // Background pipeline
        if rendering {
            if (2..=257).contains(&self.dot) || (322..=337).contains(&self.dot) {
                self.shift_background_registers();
            }

            match self.dot {
                1..=256 | 321..=336 => {
                    // 8-dot fetch cadence: NT, AT, pattern low, pattern
                    // high, then reload and step coarse X
                    match (self.dot - 1) % 8 {
                        0 => {
                            self.load_background_shifters();
                            self.fetch_nametable_byte();
                        }
                        2 => self.fetch_attribute_byte(),
                        4 => self.fetch_pattern_low(),
                        6 => self.fetch_pattern_high(),
                        7 => self.increment_scroll_x(),
                        _ => {}
                    }

                    if self.dot == 256 {
                        self.increment_scroll_y();
                    }
                }
                257 => self.copy_horizontal_scroll(),
                _ => {}
            }
        }

        // Every visible line emits exactly 256 pixels, rendering or not
        if !prerender && (1..=256).contains(&self.dot) {
            self.render_pixel();
        }
    }

    /// Whether background or sprite rendering is enabled
    pub(crate) fn rendering_enabled(&self) -> bool {
        self.ppumask & (MASK_SHOW_BACKGROUND | MASK_SHOW_SPRITES) != 0
    }

    /// Whether background rendering is enabled
    pub(crate) fn show_background(&self) -> bool {
        self.ppumask & MASK_SHOW_BACKGROUND != 0
    }

    /// Whether sprite rendering is enabled
    pub(crate) fn show_sprites(&self) -> bool {
        self.ppumask & MASK_SHOW_SPRITES != 0
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
