// Instruction fetch/decode/dispatch and trace logging

use crate::bus::MemoryBus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::{OpcodeInfo, OPCODE_TABLE};
use crate::cpu::Cpu;

impl Cpu {
    /// Execute one complete instruction
    ///
    /// Fetches the opcode at PC, resolves its addressing mode, runs the
    /// instruction to completion and returns the cycles consumed (base
    /// cost plus page-cross and branch penalties).
    ///
    /// # Panics
    ///
    /// Decoding an undocumented opcode is fatal: the tick path is
    /// infallible by contract, so this aborts with the opcode, PC, and
    /// the video beam position when the bus knows it.
    pub fn step<B: MemoryBus>(&mut self, bus: &mut B) -> u8 {
        let pc = self.pc;
        let opcode = bus.read(pc);
        let info = &OPCODE_TABLE[opcode as usize];

        if !info.legal {
            match bus.scan_position() {
                Some((scanline, dot)) => panic!(
                    "fatal decode error: undocumented opcode ${:02X} at PC ${:04X} (scanline {}, dot {})",
                    opcode, pc, scanline, dot
                ),
                None => panic!(
                    "fatal decode error: undocumented opcode ${:02X} at PC ${:04X}",
                    opcode, pc
                ),
            }
        }

        self.pc = self.pc.wrapping_add(1);

        let addr = match info.mode {
            AddressingMode::Implied => self.addr_implied(),
            AddressingMode::Accumulator => self.addr_accumulator(),
            AddressingMode::Immediate => self.addr_immediate(bus),
            AddressingMode::ZeroPage => self.addr_zero_page(bus),
            AddressingMode::ZeroPageX => self.addr_zero_page_x(bus),
            AddressingMode::ZeroPageY => self.addr_zero_page_y(bus),
            AddressingMode::Relative => self.addr_relative(bus),
            AddressingMode::Absolute => self.addr_absolute(bus),
            AddressingMode::AbsoluteX => self.addr_absolute_x(bus),
            AddressingMode::AbsoluteY => self.addr_absolute_y(bus),
            AddressingMode::Indirect => self.addr_indirect(bus),
            AddressingMode::IndexedIndirect => self.addr_indexed_indirect(bus),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(bus),
        };

        let extra = self.dispatch(opcode, &addr, bus);

        let mut cycles = info.cycles;
        if info.page_cycle && addr.page_crossed {
            cycles += 1;
        }
        cycles += extra;

        self.cycles = self.cycles.wrapping_add(cycles as u64);
        cycles
    }

    /// Route a decoded opcode to its instruction method
    ///
    /// Returns extra cycles, which only branches produce.
    #[allow(clippy::too_many_lines)]
    fn dispatch<B: MemoryBus>(
        &mut self,
        opcode: u8,
        addr: &crate::cpu::addressing::AddressingResult,
        bus: &mut B,
    ) -> u8 {
        match opcode {
            // Load/Store
            0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 => self.lda(bus, addr),
            0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => self.ldx(bus, addr),
            0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => self.ldy(bus, addr),
            0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 => self.sta(bus, addr),
            0x86 | 0x96 | 0x8E => self.stx(bus, addr),
            0x84 | 0x94 | 0x8C => self.sty(bus, addr),

            // Arithmetic
            0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 => self.adc(bus, addr),
            0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 => self.sbc(bus, addr),
            0xE6 | 0xF6 | 0xEE | 0xFE => self.inc(bus, addr),
            0xC6 | 0xD6 | 0xCE | 0xDE => self.dec(bus, addr),
            0xE8 => self.inx(),
            0xC8 => self.iny(),
            0xCA => self.dex(),
            0x88 => self.dey(),

            // Logic
            0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 => self.and(bus, addr),
            0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 => self.ora(bus, addr),
            0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 => self.eor(bus, addr),
            0x24 | 0x2C => self.bit(bus, addr),

            // Shift/Rotate (accumulator vs memory forms)
            0x0A => self.asl(bus, addr, true),
            0x06 | 0x16 | 0x0E | 0x1E => self.asl(bus, addr, false),
            0x4A => self.lsr(bus, addr, true),
            0x46 | 0x56 | 0x4E | 0x5E => self.lsr(bus, addr, false),
            0x2A => self.rol(bus, addr, true),
            0x26 | 0x36 | 0x2E | 0x3E => self.rol(bus, addr, false),
            0x6A => self.ror(bus, addr, true),
            0x66 | 0x76 | 0x6E | 0x7E => self.ror(bus, addr, false),

            // Compare
            0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 => self.cmp(bus, addr),
            0xE0 | 0xE4 | 0xEC => self.cpx(bus, addr),
            0xC0 | 0xC4 | 0xCC => self.cpy(bus, addr),

            // Branches report their extra cycles
            0x90 => return self.bcc(addr),
            0xB0 => return self.bcs(addr),
            0xF0 => return self.beq(addr),
            0xD0 => return self.bne(addr),
            0x30 => return self.bmi(addr),
            0x10 => return self.bpl(addr),
            0x50 => return self.bvc(addr),
            0x70 => return self.bvs(addr),

            // Jump/Subroutine
            0x4C | 0x6C => self.jmp(addr),
            0x20 => self.jsr(bus, addr),
            0x60 => self.rts(bus),

            // Stack
            0x48 => self.pha(bus),
            0x68 => self.pla(bus),
            0x08 => self.php(bus),
            0x28 => self.plp(bus),
            0x9A => self.txs(),
            0xBA => self.tsx(),

            // Transfers
            0xAA => self.tax(),
            0xA8 => self.tay(),
            0x8A => self.txa(),
            0x98 => self.tya(),

            // Flags
            0x18 => self.clc(),
            0x38 => self.sec(),
            0xD8 => self.cld(),
            0xF8 => self.sed(),
            0x58 => self.cli(),
            0x78 => self.sei(),
            0xB8 => self.clv(),

            // Interrupt / Misc
            0x00 => self.brk(bus),
            0x40 => self.rti(bus),
            0xEA => self.nop(),

            // step() rejected illegal opcodes before dispatch
            _ => unreachable!("dispatch on undocumented opcode ${:02X}", opcode),
        }
        0
    }

    /// Format the instruction at PC as a nestest-style trace line
    ///
    /// `PC  OP OP OP  MNEMONIC operand  A:XX X:XX Y:XX P:XX SP:XX CYC:n`
    pub fn trace<B: MemoryBus>(&self, bus: &mut B) -> String {
        let pc = self.pc;
        let opcode = bus.read(pc);
        let info = &OPCODE_TABLE[opcode as usize];

        let byte2 = if info.bytes >= 2 {
            bus.read(pc.wrapping_add(1))
        } else {
            0
        };
        let byte3 = if info.bytes >= 3 {
            bus.read(pc.wrapping_add(2))
        } else {
            0
        };

        let hex_bytes = match info.bytes {
            2 => format!("{:02X} {:02X}   ", opcode, byte2),
            3 => format!("{:02X} {:02X} {:02X}", opcode, byte2, byte3),
            _ => format!("{:02X}      ", opcode),
        };

        let disassembly = self.disassemble(pc, bus, info, byte2, byte3);

        format!(
            "{:04X}  {}  {:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, hex_bytes, disassembly, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }

    /// Disassemble one instruction with resolved operand values
    fn disassemble<B: MemoryBus>(
        &self,
        pc: u16,
        bus: &mut B,
        info: &OpcodeInfo,
        byte2: u8,
        byte3: u8,
    ) -> String {
        let mnemonic = info.mnemonic;

        match info.mode {
            AddressingMode::Implied => mnemonic.to_string(),
            AddressingMode::Accumulator => format!("{} A", mnemonic),
            AddressingMode::Immediate => format!("{} #${:02X}", mnemonic, byte2),
            AddressingMode::ZeroPage => {
                let value = bus.read(byte2 as u16);
                format!("{} ${:02X} = {:02X}", mnemonic, byte2, value)
            }
            AddressingMode::ZeroPageX => {
                let addr = byte2.wrapping_add(self.x);
                let value = bus.read(addr as u16);
                format!("{} ${:02X},X @ {:02X} = {:02X}", mnemonic, byte2, addr, value)
            }
            AddressingMode::ZeroPageY => {
                let addr = byte2.wrapping_add(self.y);
                let value = bus.read(addr as u16);
                format!("{} ${:02X},Y @ {:02X} = {:02X}", mnemonic, byte2, addr, value)
            }
            AddressingMode::Relative => {
                let target = pc.wrapping_add(2).wrapping_add_signed(byte2 as i8 as i16);
                format!("{} ${:04X}", mnemonic, target)
            }
            AddressingMode::Absolute => {
                let addr = u16::from_le_bytes([byte2, byte3]);
                if mnemonic == "JMP" || mnemonic == "JSR" {
                    format!("{} ${:04X}", mnemonic, addr)
                } else {
                    let value = bus.read(addr);
                    format!("{} ${:04X} = {:02X}", mnemonic, addr, value)
                }
            }
            AddressingMode::AbsoluteX => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.x as u16);
                let value = bus.read(addr);
                format!("{} ${:04X},X @ {:04X} = {:02X}", mnemonic, base, addr, value)
            }
            AddressingMode::AbsoluteY => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.y as u16);
                let value = bus.read(addr);
                format!("{} ${:04X},Y @ {:04X} = {:02X}", mnemonic, base, addr, value)
            }
            AddressingMode::Indirect => {
                let ptr = u16::from_le_bytes([byte2, byte3]);
                let lo = bus.read(ptr);
                let hi = bus.read((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF));
                let target = u16::from_le_bytes([lo, hi]);
                format!("{} (${:04X}) = {:04X}", mnemonic, ptr, target)
            }
            AddressingMode::IndexedIndirect => {
                let ptr = byte2.wrapping_add(self.x);
                let lo = bus.read(ptr as u16);
                let hi = bus.read(ptr.wrapping_add(1) as u16);
                let addr = u16::from_le_bytes([lo, hi]);
                let value = bus.read(addr);
                format!(
                    "{} (${:02X},X) @ {:02X} = {:04X} = {:02X}",
                    mnemonic, byte2, ptr, addr, value
                )
            }
            AddressingMode::IndirectIndexed => {
                let lo = bus.read(byte2 as u16);
                let hi = bus.read(byte2.wrapping_add(1) as u16);
                let base = u16::from_le_bytes([lo, hi]);
                let addr = base.wrapping_add(self.y as u16);
                let value = bus.read(addr);
                format!(
                    "{} (${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                    mnemonic, byte2, base, addr, value
                )
            }
        }
    }
}
