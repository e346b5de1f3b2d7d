// Console module - the machine as a whole
//
// Owns the CPU and the bus (which owns everything else) and enforces
// the clock ratio: one CPU cycle, then three PPU dots, then one APU
// tick. The host drives it either dot-precisely with `tick`, per frame
// with `run_frame`, or with wall-clock batches through `update`.

use crate::apu::SampleQueue;
use crate::bus::CpuBus;
use crate::cartridge::{create_mapper, Cartridge, INesError, MapperError};
use crate::cpu::Cpu;
use crate::display::FrameBuffer;
use crate::input::Controller;
use std::path::Path;
use std::sync::Arc;

/// NTSC CPU clock in cycles per millisecond (1.789773 MHz)
const CPU_CYCLES_PER_MS: f64 = 1789.773;

/// Largest time delta honored by `update`
///
/// A stalled host (debugger, dragged window) hands us a huge delta;
/// past this point the session can't catch up in real time anyway.
const MAX_UPDATE_MS: f64 = 100.0;

/// Errors that prevent a console from being built
#[derive(Debug)]
pub enum ConsoleError {
    /// The iNES image failed to parse
    Load(INesError),
    /// The image names a mapper this core does not implement
    Mapper(MapperError),
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleError::Load(e) => write!(f, "{}", e),
            ConsoleError::Mapper(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<INesError> for ConsoleError {
    fn from(e: INesError) -> Self {
        ConsoleError::Load(e)
    }
}

impl From<MapperError> for ConsoleError {
    fn from(e: MapperError) -> Self {
        ConsoleError::Mapper(e)
    }
}

/// The assembled machine
pub struct Console {
    /// 2A03 CPU core
    cpu: Cpu,

    /// System bus: RAM, PPU, APU, gamepad, mapper
    bus: CpuBus,

    /// Fractional cycles carried between `update` batches
    cycle_remainder: f64,
}

impl Console {
    /// Build a console around a parsed cartridge and reset it
    pub fn new(cartridge: Cartridge) -> Result<Self, ConsoleError> {
        let mapper = create_mapper(cartridge)?;
        let mut console = Console {
            cpu: Cpu::new(),
            bus: CpuBus::new(mapper),
            cycle_remainder: 0.0,
        };
        console.reset();
        Ok(console)
    }

    /// Build a console from an iNES blob
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, ConsoleError> {
        Ok(Self::new(Cartridge::from_ines_bytes(data)?)?)
    }

    /// Build a console from an iNES file on disk
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, ConsoleError> {
        Ok(Self::new(Cartridge::from_ines_file(path)?)?)
    }

    /// Reset the machine, as if the reset button was pressed
    pub fn reset(&mut self) {
        self.bus.ppu_mut().reset();
        self.cpu.reset(&mut self.bus);
        self.cycle_remainder = 0.0;
        log::info!("console reset, PC = ${:04X}", self.cpu.pc);
    }

    /// Advance the machine by one CPU cycle
    ///
    /// The fixed sequence: deliver any PPU interrupt, one CPU cycle,
    /// three PPU dots, one APU tick.
    pub fn tick(&mut self) {
        if self.bus.ppu_mut().take_nmi() {
            self.cpu.trigger_nmi();
        }

        self.cpu.tick(&mut self.bus);
        for _ in 0..3 {
            self.bus.ppu_mut().step();
        }
        self.bus.apu_mut().tick();
    }

    /// Execute one whole CPU instruction, keeping the PPU and APU
    /// phase-locked at three dots and one tick per CPU cycle.
    ///
    /// Returns the CPU cycles the instruction consumed.
    pub fn step_instruction(&mut self) -> u8 {
        if self.bus.ppu_mut().take_nmi() {
            self.cpu.trigger_nmi();
        }

        let cycles = self.cpu.step(&mut self.bus);
        for _ in 0..cycles {
            for _ in 0..3 {
                self.bus.ppu_mut().step();
            }
            self.bus.apu_mut().tick();
        }
        cycles
    }

    /// Run until the PPU finishes the current frame
    pub fn run_frame(&mut self) {
        let frame = self.bus.ppu().frame_count();
        while self.bus.ppu().frame_count() == frame {
            self.tick();
        }
    }

    /// Consume a wall-clock delta, running `floor(dt_ms x 1789.773)`
    /// CPU cycles (the fractional part carries to the next call).
    pub fn update(&mut self, dt_ms: f64) {
        let dt_ms = dt_ms.clamp(0.0, MAX_UPDATE_MS);
        let exact = dt_ms * CPU_CYCLES_PER_MS + self.cycle_remainder;
        let cycles = exact.floor();
        self.cycle_remainder = exact - cycles;

        for _ in 0..cycles as u64 {
            self.tick();
        }
    }

    /// Latest frame as palette indices, row-major 256x240
    pub fn frame(&self) -> &[u8] {
        self.bus.ppu().frame()
    }

    /// Write the latest frame as packed R8G8B8 bytes
    ///
    /// `out` must hold at least 256 x 240 x 3 bytes.
    pub fn frame_rgb(&self, out: &mut [u8]) {
        let mut frame = FrameBuffer::new();
        frame.copy_from_indices(self.frame());
        frame.to_rgb(out);
    }

    /// Install the host's button snapshot
    pub fn set_buttons(&mut self, buttons: Controller) {
        self.bus.gamepad_mut().set_buttons(buttons);
    }

    /// Handle to the audio sample FIFO
    pub fn sample_queue(&self) -> Arc<SampleQueue> {
        self.bus.apu().sample_queue()
    }

    /// The CPU, for inspection and tests
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable CPU access
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// The bus, for inspection and tests
    pub fn bus(&self) -> &CpuBus {
        &self.bus
    }

    /// Mutable bus access
    pub fn bus_mut(&mut self) -> &mut CpuBus {
        &mut self.bus
    }

    /// Frames completed since power-on
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu().frame_count()
    }
}
