// PPU address space: nametable mirroring, palette aliasing, mirrors

use crate::cartridge::Mirroring;
use crate::ppu::Ppu;

#[test]
fn test_horizontal_mirroring() {
    let mut ppu = Ppu::new();
    ppu.set_mirroring(Mirroring::Horizontal);

    ppu.write_ppu_memory(0x2000, 0x11);
    assert_eq!(ppu.read_ppu_memory(0x2400), 0x11, "$2000 and $2400 share");

    ppu.write_ppu_memory(0x2800, 0x22);
    assert_eq!(ppu.read_ppu_memory(0x2C00), 0x22, "$2800 and $2C00 share");
    assert_eq!(ppu.read_ppu_memory(0x2000), 0x11, "the pairs stay distinct");
}

#[test]
fn test_vertical_mirroring() {
    let mut ppu = Ppu::new();
    ppu.set_mirroring(Mirroring::Vertical);

    ppu.write_ppu_memory(0x2000, 0x33);
    assert_eq!(ppu.read_ppu_memory(0x2800), 0x33, "$2000 and $2800 share");

    ppu.write_ppu_memory(0x2400, 0x44);
    assert_eq!(ppu.read_ppu_memory(0x2C00), 0x44, "$2400 and $2C00 share");
}

#[test]
fn test_single_screen_mirroring() {
    let mut ppu = Ppu::new();
    ppu.set_mirroring(Mirroring::SingleScreenLower);

    ppu.write_ppu_memory(0x2000, 0x55);
    for base in [0x2400u16, 0x2800, 0x2C00] {
        assert_eq!(ppu.read_ppu_memory(base), 0x55, "all tables collapse");
    }

    ppu.set_mirroring(Mirroring::SingleScreenUpper);
    assert_ne!(
        ppu.read_ppu_memory(0x2000),
        0x55,
        "the upper screen is the other physical table"
    );
}

#[test]
fn test_nametable_mirror_region() {
    let mut ppu = Ppu::new();

    ppu.write_ppu_memory(0x2005, 0x66);
    assert_eq!(
        ppu.read_ppu_memory(0x3005),
        0x66,
        "$3000-$3EFF mirrors $2000-$2EFF"
    );

    ppu.write_ppu_memory(0x3105, 0x77);
    assert_eq!(ppu.read_ppu_memory(0x2105), 0x77);
}

#[test]
fn test_palette_aliases() {
    let mut ppu = Ppu::new();

    // $3F10/$3F14/$3F18/$3F1C fold onto $3F00/$3F04/$3F08/$3F0C
    ppu.write_ppu_memory(0x3F10, 0x0A);
    assert_eq!(ppu.read_ppu_memory(0x3F00), 0x0A);

    ppu.write_ppu_memory(0x3F04, 0x0B);
    assert_eq!(ppu.read_ppu_memory(0x3F14), 0x0B);

    // Non-multiple-of-4 sprite entries are their own bytes
    ppu.write_ppu_memory(0x3F11, 0x0C);
    assert_ne!(ppu.read_ppu_memory(0x3F01), 0x0C);
}

#[test]
fn test_palette_region_mirrors_every_32() {
    let mut ppu = Ppu::new();

    ppu.write_ppu_memory(0x3F01, 0x21);
    assert_eq!(ppu.read_ppu_memory(0x3F21), 0x21);
    assert_eq!(ppu.read_ppu_memory(0x3FE1), 0x21);
}

#[test]
fn test_pattern_table_reaches_mapper_chr() {
    let mut ppu = super::ppu_with_chr_ram();

    ppu.write_ppu_memory(0x0000, 0xAB);
    ppu.write_ppu_memory(0x1FFF, 0xCD);

    assert_eq!(ppu.read_ppu_memory(0x0000), 0xAB);
    assert_eq!(ppu.read_ppu_memory(0x1FFF), 0xCD);
}

#[test]
fn test_no_mapper_pattern_reads_zero() {
    let ppu = Ppu::new();
    assert_eq!(ppu.read_ppu_memory(0x0000), 0);
    assert_eq!(ppu.read_ppu_memory(0x1FFF), 0);
}

#[test]
fn test_mapper_mirroring_is_live() {
    // MMC1 changes the nametable arrangement at runtime; the PPU must
    // see the new mode on the next access.
    use crate::cartridge::{create_mapper, Cartridge, Mapper, PRG_RAM_SIZE};
    use std::cell::RefCell;
    use std::rc::Rc;

    let cartridge = Cartridge {
        header: crate::cartridge::INesHeader {
            prg_banks: 2,
            chr_banks: 0,
            flags6: 0x10, // mapper 1
            flags7: 0,
        },
        prg_rom: vec![0; 32 * 1024],
        chr_mem: vec![0; 8 * 1024],
        chr_is_ram: true,
        prg_ram: vec![0; PRG_RAM_SIZE],
        mirroring: Mirroring::Horizontal,
    };
    let mapper = Rc::new(RefCell::new(create_mapper(cartridge).unwrap()));

    let mut ppu = Ppu::new();
    ppu.set_mapper(Rc::clone(&mapper));

    // Power-on control is one-screen lower: everything collapses
    ppu.write_ppu_memory(0x2000, 0x99);
    assert_eq!(ppu.read_ppu_memory(0x2C00), 0x99);

    // Serial-load control = vertical mirroring
    for bit in [0u8, 1, 0, 0, 0] {
        mapper.borrow_mut().cpu_write(0x8000, bit);
    }

    ppu.write_ppu_memory(0x2400, 0x77);
    assert_eq!(
        ppu.read_ppu_memory(0x2C00),
        0x77,
        "vertical pairs $2400 with $2C00"
    );
    assert_ne!(
        ppu.read_ppu_memory(0x2000),
        0x77,
        "and splits it from $2000"
    );
}
