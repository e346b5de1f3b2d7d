// PPU test suites, split by concern

mod memory;
mod timing;

use super::Ppu;
use crate::cartridge::{create_mapper, Cartridge, Mirroring, PRG_RAM_SIZE};
use std::cell::RefCell;
use std::rc::Rc;

/// A PPU wired to an NROM board with 8KB of CHR-RAM, so tests can
/// write pattern data through the PPU bus.
pub(super) fn ppu_with_chr_ram() -> Ppu {
    let cartridge = Cartridge {
        header: crate::cartridge::INesHeader {
            prg_banks: 1,
            chr_banks: 0,
            flags6: 0,
            flags7: 0,
        },
        prg_rom: vec![0; 16 * 1024],
        chr_mem: vec![0; 8 * 1024],
        chr_is_ram: true,
        prg_ram: vec![0; PRG_RAM_SIZE],
        mirroring: Mirroring::Horizontal,
    };
    let mapper = Rc::new(RefCell::new(create_mapper(cartridge).unwrap()));

    let mut ppu = Ppu::new();
    ppu.set_mapper(mapper);
    ppu
}

/// Step until the counters read exactly (scanline, dot)
///
/// The events scheduled at that position have not run yet when this
/// returns; the next `step` executes them.
pub(super) fn step_to(ppu: &mut Ppu, scanline: u16, dot: u16) {
    let mut guard = 0u32;
    while !(ppu.scanline == scanline && ppu.dot == dot) {
        ppu.step();
        guard += 1;
        assert!(guard < 200_000, "PPU never reached ({}, {})", scanline, dot);
    }
}
