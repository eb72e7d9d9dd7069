use crate::error::BridgeError;
use evdev::{AbsoluteAxisType, EventType, InputEvent, Key};

/// Where translated events go. Writes are queued until `commit`, which makes
/// everything since the previous commit visible to readers as one frame.
pub trait OutputSink {
    fn write(&mut self, event: InputEvent);

    fn commit(&mut self) -> Result<(), BridgeError>;
}

pub fn key_event(key: Key, value: i32) -> InputEvent {
    InputEvent::new(EventType::KEY, key.0, value)
}

pub fn abs_event(axis: AbsoluteAxisType, value: i32) -> InputEvent {
    InputEvent::new(EventType::ABSOLUTE, axis.0, value)
}
