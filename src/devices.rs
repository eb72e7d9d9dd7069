pub mod gamepad;
pub mod xbox_elite2_layout;

pub use gamepad::VirtualPad;
