use crate::dpad::HatAxis;
use crate::filter::Stick;
use evdev::{AbsoluteAxisType, Key};
use std::collections::HashMap;

/// What to do with one evdev absolute axis from the physical pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRoute {
    /// Filter with the stick's profile and write to the given output axis.
    Stick(Stick, AbsoluteAxisType),
    /// Already 0..1023; forward on change.
    LeftTrigger,
    Hat(HatAxis),
    /// Noise on this pad.
    Ignore,
}

/// Immutable input-to-output mapping, built once at startup.
#[derive(Debug, Clone)]
pub struct InputMapping {
    buttons: HashMap<Key, Key>,
    /// Keyed by raw axis code; `AbsoluteAxisType` is not `Hash`.
    axes: HashMap<u16, AxisRoute>,
}

impl InputMapping {
    pub fn new(
        buttons: impl IntoIterator<Item = (Key, Key)>,
        axes: impl IntoIterator<Item = (AbsoluteAxisType, AxisRoute)>,
    ) -> Self {
        Self {
            buttons: buttons.into_iter().collect(),
            axes: axes.into_iter().map(|(axis, route)| (axis.0, route)).collect(),
        }
    }

    /// SCUF Envision Pro, as seen through its evdev node.
    ///
    /// The right trigger is not here: it only shows up on hidraw.
    pub fn envision_pro() -> Self {
        Self::new(
            [
                (Key::BTN_SOUTH, Key::BTN_SOUTH), // A
                (Key::BTN_EAST, Key::BTN_EAST),   // B
                (Key::BTN_NORTH, Key::BTN_NORTH), // Y
                (Key::BTN_C, Key::BTN_WEST),      // X
                (Key::BTN_WEST, Key::BTN_TL),     // LB
                (Key::BTN_Z, Key::BTN_TR),        // RB
                (Key::BTN_TR, Key::BTN_START),
                (Key::BTN_TL, Key::BTN_SELECT),
                (Key::BTN_MODE, Key::BTN_MODE),
                (Key::BTN_TL2, Key::BTN_THUMBL), // L3
                (Key::BTN_TR2, Key::BTN_THUMBR), // R3
            ],
            [
                (
                    AbsoluteAxisType::ABS_X,
                    AxisRoute::Stick(Stick::Left, AbsoluteAxisType::ABS_X),
                ),
                (
                    AbsoluteAxisType::ABS_Y,
                    AxisRoute::Stick(Stick::Left, AbsoluteAxisType::ABS_Y),
                ),
                (AbsoluteAxisType::ABS_RX, AxisRoute::LeftTrigger),
                (
                    AbsoluteAxisType::ABS_Z,
                    AxisRoute::Stick(Stick::Right, AbsoluteAxisType::ABS_RX),
                ),
                (
                    AbsoluteAxisType::ABS_RZ,
                    AxisRoute::Stick(Stick::Right, AbsoluteAxisType::ABS_RY),
                ),
                (AbsoluteAxisType::ABS_RY, AxisRoute::Ignore),
                (AbsoluteAxisType::ABS_HAT0X, AxisRoute::Hat(HatAxis::X)),
                (AbsoluteAxisType::ABS_HAT0Y, AxisRoute::Hat(HatAxis::Y)),
            ],
        )
    }

    pub fn button(&self, input: Key) -> Option<Key> {
        self.buttons.get(&input).copied()
    }

    pub fn axis(&self, input: AbsoluteAxisType) -> Option<AxisRoute> {
        self.axes.get(&input.0).copied()
    }

    #[cfg(test)]
    pub fn buttons(&self) -> impl Iterator<Item = (Key, Key)> + '_ {
        self.buttons.iter().map(|(&from, &to)| (from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::xbox_elite2_layout::XboxElite2Layout;

    #[test]
    fn every_remap_target_is_a_declared_button() {
        let mapping = InputMapping::envision_pro();
        for (_, to) in mapping.buttons() {
            assert!(XboxElite2Layout::has_button(to), "{to:?} not declared");
        }
    }

    #[test]
    fn swapped_face_and_shoulder_buttons() {
        let mapping = InputMapping::envision_pro();
        assert_eq!(mapping.button(Key::BTN_C), Some(Key::BTN_WEST));
        assert_eq!(mapping.button(Key::BTN_WEST), Some(Key::BTN_TL));
        assert_eq!(mapping.button(Key::BTN_TL), Some(Key::BTN_SELECT));
        assert_eq!(mapping.button(Key::BTN_SELECT), None);
    }

    #[test]
    fn stick_axes_are_rerouted() {
        let mapping = InputMapping::envision_pro();
        assert_eq!(
            mapping.axis(AbsoluteAxisType::ABS_Z),
            Some(AxisRoute::Stick(Stick::Right, AbsoluteAxisType::ABS_RX))
        );
        assert_eq!(mapping.axis(AbsoluteAxisType::ABS_RX), Some(AxisRoute::LeftTrigger));
        assert_eq!(mapping.axis(AbsoluteAxisType::ABS_RY), Some(AxisRoute::Ignore));
        assert_eq!(mapping.axis(AbsoluteAxisType::ABS_MISC), None);
    }

    #[test]
    fn axis_lookup_by_code() {
        let mapping = InputMapping::envision_pro();
        // ABS_HAT0X is code 0x10 on the wire.
        assert_eq!(mapping.axis(AbsoluteAxisType(0x10)), Some(AxisRoute::Hat(HatAxis::X)));
        assert_eq!(mapping.axis(AbsoluteAxisType(0x05)), mapping.axis(AbsoluteAxisType::ABS_RZ));
    }
}
