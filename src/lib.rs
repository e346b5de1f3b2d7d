// famicore - a cycle-driven NES emulator core
//
// The simulated machine: a Ricoh 2A03 CPU (6502 without decimal mode)
// and a 2C02 PPU stepped at three PPU dots per CPU cycle, glued to the
// cartridge through NROM/MMC1/UxROM mappers. The `Console` type owns
// the whole machine; the `display` module is a thin winit/pixels host
// around it.

pub mod apu;
#[cfg(feature = "audio")]
pub mod audio;
pub mod bus;
pub mod cartridge;
pub mod config;
pub mod console;
pub mod cpu;
pub mod display;
pub mod input;
pub mod ppu;

// Re-export the main types
pub use apu::{Apu, SampleQueue};
#[cfg(feature = "audio")]
pub use audio::AudioPlayback;
pub use bus::{CpuBus, MemoryBus};
pub use cartridge::{Cartridge, INesError, INesHeader, Mapper, MapperError, Mirroring};
pub use config::Config;
pub use console::{Console, ConsoleError};
pub use cpu::Cpu;
pub use display::{run_window, FrameBuffer, WindowConfig};
pub use input::{Controller, Gamepad};
pub use ppu::Ppu;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_components_construct() {
        let _cpu = Cpu::new();
        let _ppu = Ppu::new();
        let _apu = Apu::new();
        let _gamepad = Gamepad::new();
        let _frame = FrameBuffer::new();
    }
}
