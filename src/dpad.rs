use crate::devices::xbox_elite2_layout::XboxElite2Layout;
use crate::sink::{OutputSink, key_event};
use evdev::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HatAxis {
    X,
    Y,
}

/// Turns the pad's hat (two -1/0/1 axes) into four d-pad keys. Only keys
/// whose state differs from what was last sent are written.
#[derive(Debug, Default)]
pub struct DpadSynthesizer {
    hat_x: i32,
    hat_y: i32,
    /// left, right, up, down as last sent.
    sent: [bool; 4],
}

const DIRECTIONS: [Key; 4] = [
    Key::BTN_DPAD_LEFT,
    Key::BTN_DPAD_RIGHT,
    Key::BTN_DPAD_UP,
    Key::BTN_DPAD_DOWN,
];

impl DpadSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn hat(&self) -> (i32, i32) {
        (self.hat_x, self.hat_y)
    }

    fn targets(&self) -> [bool; 4] {
        // Negative Y is up on the target pad. Do not flip.
        [
            self.hat_x == -1,
            self.hat_x == 1,
            self.hat_y == -1,
            self.hat_y == 1,
        ]
    }

    /// Applies one hat axis update and writes the changed keys to `sink`.
    /// Returns how many keys were written.
    pub fn update<S: OutputSink>(&mut self, axis: HatAxis, value: i32, sink: &mut S) -> usize {
        let value = XboxElite2Layout::clamp_hat(value);
        match axis {
            HatAxis::X => self.hat_x = value,
            HatAxis::Y => self.hat_y = value,
        }

        let targets = self.targets();
        let mut written = 0;
        for ((key, sent), target) in DIRECTIONS.iter().zip(self.sent.iter_mut()).zip(targets) {
            if *sent != target {
                sink.write(key_event(*key, target as i32));
                *sent = target;
                written += 1;
            }
        }
        written
    }
}
