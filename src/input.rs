// Input module - NES standard controller
//
// The controller is an 8-bit shift register read serially through
// $4016. Writing bit 0 = 1 strobes the register, continuously reloading
// it from the pressed-state snapshot; writing 0 ends the strobe and
// freezes the snapshot for eight serial reads.
//
// Reading order: A, B, Select, Start, Up, Down, Left, Right.
// Reads past the eighth return 1, the standard controller signature.

/// Snapshot of the eight buttons on a standard controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controller {
    pub a: bool,
    pub b: bool,
    pub select: bool,
    pub start: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Controller {
    /// All buttons released
    pub fn new() -> Self {
        Controller::default()
    }

    /// Button state by shift order (0 = A .. 7 = Right)
    fn button(&self, index: u8) -> bool {
        match index {
            0 => self.a,
            1 => self.b,
            2 => self.select,
            3 => self.start,
            4 => self.up,
            5 => self.down,
            6 => self.left,
            7 => self.right,
            _ => false,
        }
    }
}

/// The $4016 shift-register interface around a controller snapshot
pub struct Gamepad {
    /// Host-supplied pressed-state snapshot
    buttons: Controller,

    /// Strobe state: while high, reads keep returning button A
    strobe: bool,

    /// Next button to shift out (0-7; 8 means exhausted)
    index: u8,
}

impl Gamepad {
    /// Create a gamepad with no buttons pressed
    pub fn new() -> Self {
        Gamepad {
            buttons: Controller::new(),
            strobe: false,
            index: 0,
        }
    }

    /// Replace the pressed-state snapshot
    ///
    /// The host sets this before each batch of CPU cycles; the shift
    /// register picks it up at the next strobe.
    pub fn set_buttons(&mut self, buttons: Controller) {
        self.buttons = buttons;
    }

    /// CPU write to $4016
    ///
    /// Bit 0 high starts the strobe (reload from the snapshot); the
    /// falling edge freezes the register for serial reading.
    pub fn write(&mut self, value: u8) {
        self.strobe = value & 0x01 != 0;
        if self.strobe {
            self.index = 0;
        }
    }

    /// CPU read from $4016
    ///
    /// Returns the current button in bit 0 and advances. While strobing,
    /// the register is pinned to button A.
    pub fn read(&mut self) -> u8 {
        if self.strobe {
            return self.buttons.a as u8;
        }

        if self.index >= 8 {
            // Exhausted: official pads report 1
            return 0x01;
        }

        let bit = self.buttons.button(self.index) as u8;
        self.index += 1;
        bit
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}
