// Mappers module - Cartridge mapper implementations
//
// This module contains the mapper factory and the individual boards.
// Each mapper translates CPU/PPU addresses into bank-switched ROM/RAM
// accesses for its cartridge type.

mod mapper0;
mod mapper1;
mod mapper2;

use super::{Cartridge, Mapper};
use mapper0::Mapper0;
use mapper1::Mapper1;
use mapper2::Mapper2;

/// Error type for mapper creation
#[derive(Debug)]
pub enum MapperError {
    /// The requested mapper number is not supported
    UnsupportedMapper(u8),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::UnsupportedMapper(num) => {
                write!(f, "mapper {} is not supported", num)
            }
        }
    }
}

impl std::error::Error for MapperError {}

/// Create a mapper instance from a parsed cartridge
///
/// The mapper number comes from the iNES header. Supported boards:
/// 0 (NROM), 1 (MMC1), 2 (UxROM).
///
/// # Errors
///
/// Returns `MapperError::UnsupportedMapper` for any other number.
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, MapperError> {
    match cartridge.header.mapper() {
        0 => Ok(Box::new(Mapper0::new(cartridge))),
        1 => Ok(Box::new(Mapper1::new(cartridge))),
        2 => Ok(Box::new(Mapper2::new(cartridge))),
        mapper_num => Err(MapperError::UnsupportedMapper(mapper_num)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{Mirroring, CHR_BANK_SIZE, PRG_BANK_SIZE, PRG_RAM_SIZE};

    fn cartridge_with_mapper(mapper: u8) -> Cartridge {
        Cartridge {
            header: crate::cartridge::INesHeader {
                prg_banks: 1,
                chr_banks: 1,
                flags6: (mapper & 0x0F) << 4,
                flags7: mapper & 0xF0,
            },
            prg_rom: vec![0; PRG_BANK_SIZE],
            chr_mem: vec![0; CHR_BANK_SIZE],
            chr_is_ram: false,
            prg_ram: vec![0; PRG_RAM_SIZE],
            mirroring: Mirroring::Horizontal,
        }
    }

    #[test]
    fn test_supported_mappers() {
        for n in [0u8, 1, 2] {
            assert!(
                create_mapper(cartridge_with_mapper(n)).is_ok(),
                "mapper {} should be supported",
                n
            );
        }
    }

    #[test]
    fn test_unsupported_mapper() {
        let result = create_mapper(cartridge_with_mapper(4));
        assert!(matches!(result, Err(MapperError::UnsupportedMapper(4))));
    }

    #[test]
    fn test_factory_preserves_mirroring() {
        let mapper = create_mapper(cartridge_with_mapper(0)).unwrap();
        assert_eq!(mapper.mirroring(), Mirroring::Horizontal);
    }
}
