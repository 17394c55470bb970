//! NES controller input handling.
//!
//! Implements the standard NES controller shift register protocol on $4016: while bit 0 of the
//! last write is 1 the register keeps reloading the live button state; writing 0 latches it.
//! Each read then shifts out one button (A, B, Select, Start, Up, Down, Left, Right), and every
//! read after the eighth returns 1 until the next latch.

/// The eight buttons of a standard controller, in shift-out order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Represents a single NES controller connected to port 1 ($4016).
#[derive(Debug, Default)]
pub struct Controller {
    /// Current button states: bit 0 = A, 1 = B, 2 = Select, 3 = Start, 4 = Up, 5 = Down, 6 = Left, 7 = Right.
    state: u8,
    /// Shift register: latched from `state`; shifted out LSB-first, refilled with 1s.
    shift: u8,
    strobe: bool,
}

impl Controller {
    /// Create a new controller with no buttons pressed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.state |= button.mask();
    }

    pub fn release(&mut self, button: Button) {
        self.state &= !button.mask();
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.press(button);
        } else {
            self.release(button);
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.state & button.mask() != 0
    }

    /// Read one button state from $4016. Returns LSB of shift register OR'd with open bus ($40).
    pub fn read(&mut self) -> u8 {
        if self.strobe {
            self.shift = self.state;
        }
        let bit = self.shift & 1;
        self.shift = (self.shift >> 1) | 0x80;
        bit | 0x40
    }

    /// Write to $4016. Bit 0 high keeps reloading; the write that drops it latches the state.
    pub fn write(&mut self, data: u8) {
        if self.strobe || data & 1 != 0 {
            self.shift = self.state;
        }
        self.strobe = data & 1 != 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latch(pad: &mut Controller) {
        pad.write(1);
        pad.write(0);
    }

    #[test]
    fn buttons_shift_out_in_order() {
        let mut pad = Controller::new();
        pad.press(Button::A);
        pad.press(Button::Start);
        pad.press(Button::Right);
        latch(&mut pad);

        let bits: Vec<u8> = (0..8).map(|_| pad.read()).collect();
        assert_eq!(bits, [0x41, 0x40, 0x40, 0x41, 0x40, 0x40, 0x40, 0x41]);
    }

    #[test]
    fn reads_after_the_eighth_return_one() {
        let mut pad = Controller::new();
        latch(&mut pad);
        for _ in 0..8 {
            assert_eq!(pad.read(), 0x40);
        }
        assert_eq!(pad.read(), 0x41);
        assert_eq!(pad.read(), 0x41);
    }

    #[test]
    fn strobe_high_keeps_returning_a() {
        let mut pad = Controller::new();
        pad.write(1);
        pad.press(Button::A);
        assert_eq!(pad.read(), 0x41);
        assert_eq!(pad.read(), 0x41);
        pad.release(Button::A);
        assert_eq!(pad.read(), 0x40);
    }

    #[test]
    fn latched_state_ignores_later_presses() {
        let mut pad = Controller::new();
        latch(&mut pad);
        pad.press(Button::A);
        assert_eq!(pad.read(), 0x40);
        latch(&mut pad);
        assert_eq!(pad.read(), 0x41);
        assert!(pad.is_pressed(Button::A));
    }

    #[test]
    fn low_write_without_strobe_keeps_shift_position() {
        let mut pad = Controller::new();
        pad.press(Button::B);
        latch(&mut pad);
        assert_eq!(pad.read(), 0x40); // A

        pad.write(0);
        assert_eq!(pad.read(), 0x41); // B
        assert_eq!(pad.read(), 0x40); // Select
    }
}
