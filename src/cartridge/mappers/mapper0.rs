// Mapper 0 (NROM) - No bank switching
//
// Memory Layout:
// - CPU $6000-$7FFF: 8KB PRG-RAM
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (mirror of the first bank on 16KB boards)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
//
// Mirroring is fixed by the header; nothing on the board reacts to
// writes in ROM space.

use crate::cartridge::{Cartridge, Mapper, Mirroring, PRG_RAM_SIZE};

/// Mapper 0 implementation (NROM)
///
/// The launch-era board: PRG-ROM wired straight to the CPU bus, CHR
/// wired straight to the PPU bus, no registers.
pub struct Mapper0 {
    /// PRG-ROM data (16KB or 32KB)
    prg_rom: Vec<u8>,
    /// CHR-ROM or CHR-RAM data (8KB)
    chr_mem: Vec<u8>,
    /// Whether CHR memory is writable
    chr_is_ram: bool,
    /// 8KB PRG-RAM at $6000-$7FFF
    prg_ram: Vec<u8>,
    /// Fixed mirroring from the header
    mirroring: Mirroring,
}

impl Mapper0 {
    /// Create a new Mapper0 instance from a cartridge
    pub fn new(cartridge: Cartridge) -> Self {
        Mapper0 {
            prg_rom: cartridge.prg_rom,
            chr_mem: cartridge.chr_mem,
            chr_is_ram: cartridge.chr_is_ram,
            prg_ram: cartridge.prg_ram,
            mirroring: cartridge.mirroring,
        }
    }
}

impl Mapper for Mapper0 {
    fn cpu_read(&self, addr: u16) -> u8 {
        match addr {
            0x6000..=0x7FFF => self.prg_ram[(addr as usize - 0x6000) % PRG_RAM_SIZE],
            0x8000..=0xFFFF => {
                // Modulo handles the 16KB mirror; a no-op for 32KB boards
                let index = (addr - 0x8000) as usize;
                self.prg_rom[index % self.prg_rom.len()]
            }
            _ => panic!(
                "fatal: CPU read from unmapped NROM address ${:04X}",
                addr
            ),
        }
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x6000..=0x7FFF => {
                self.prg_ram[(addr as usize - 0x6000) % PRG_RAM_SIZE] = value;
            }
            0x8000..=0xFFFF => {
                // No registers on this board; ROM writes fall on deaf ears
            }
            _ => panic!(
                "fatal: CPU write of ${:02X} to unmapped NROM address ${:04X}",
                value, addr
            ),
        }
    }

    fn ppu_read(&self, addr: u16) -> u8 {
        self.chr_mem[(addr & 0x1FFF) as usize]
    }

    fn ppu_write(&mut self, addr: u16, value: u8) {
        if self.chr_is_ram {
            self.chr_mem[(addr & 0x1FFF) as usize] = value;
        }
        // CHR-ROM writes are silently ignored
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
