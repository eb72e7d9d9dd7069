use evdev::{AbsInfo, AbsoluteAxisType, Key};

/// Layout of a real Xbox Elite 2 pad as the xpad driver exposes it.
/// The virtual device is built from these values so games see the same
/// ranges and button set they would on the genuine controller.
pub struct XboxElite2Layout;

impl XboxElite2Layout {
    pub const NAME: &'static str = "Virtual SCUF Envision Pro";

    pub const VENDOR_ID: u16 = 0x045e;
    pub const PRODUCT_ID: u16 = 0x02ea;
    pub const VERSION: u16 = 0x0301;

    pub const BUTTON_COUNT: usize = 15;

    /// A, B, Y, X, LB, RB, Back, Start, Guide, L3, R3 and the four d-pad
    /// directions. The pad reports its d-pad as a hat; we expose it as keys.
    pub const BUTTONS: [Key; Self::BUTTON_COUNT] = [
        Key::BTN_SOUTH,
        Key::BTN_EAST,
        Key::BTN_NORTH,
        Key::BTN_WEST,
        Key::BTN_TL,
        Key::BTN_TR,
        Key::BTN_SELECT,
        Key::BTN_START,
        Key::BTN_MODE,
        Key::BTN_THUMBL,
        Key::BTN_THUMBR,
        Key::BTN_DPAD_UP,
        Key::BTN_DPAD_DOWN,
        Key::BTN_DPAD_LEFT,
        Key::BTN_DPAD_RIGHT,
    ];

    // ----- AXES -----
    //   ABS_X / ABS_Y    left stick   (-32768..32767)
    //   ABS_RX / ABS_RY  right stick  (-32768..32767)
    //   ABS_Z            left trigger (0..1023)
    //   ABS_RZ           right trigger(0..1023)
    pub const STICK_AXES: [AbsoluteAxisType; 4] = [
        AbsoluteAxisType::ABS_X,
        AbsoluteAxisType::ABS_Y,
        AbsoluteAxisType::ABS_RX,
        AbsoluteAxisType::ABS_RY,
    ];

    pub const TRIGGER_AXES: [AbsoluteAxisType; 2] =
        [AbsoluteAxisType::ABS_Z, AbsoluteAxisType::ABS_RZ];

    pub const STICK_MIN: i32 = i16::MIN as i32;
    pub const STICK_MAX: i32 = i16::MAX as i32;
    pub const STICK_FUZZ: i32 = 16;
    pub const STICK_FLAT: i32 = 128;

    pub const TRIGGER_MIN: i32 = 0;
    pub const TRIGGER_MAX: i32 = 1023;

    pub const HAT_MIN: i32 = -1;
    pub const HAT_MAX: i32 = 1;

    /// Rumble slots advertised to the kernel. Nothing is ever played.
    pub const FF_EFFECTS_MAX: u32 = 16;

    pub fn has_button(key: Key) -> bool {
        Self::BUTTONS.contains(&key)
    }

    pub fn stick_info() -> AbsInfo {
        AbsInfo::new(0, Self::STICK_MIN, Self::STICK_MAX, Self::STICK_FUZZ, Self::STICK_FLAT, 0)
    }

    pub fn trigger_info() -> AbsInfo {
        AbsInfo::new(0, Self::TRIGGER_MIN, Self::TRIGGER_MAX, 0, 0, 0)
    }

    pub fn clamp_stick(value: i32) -> i32 {
        value.clamp(Self::STICK_MIN, Self::STICK_MAX)
    }

    pub fn clamp_trigger(value: i32) -> i32 {
        value.clamp(Self::TRIGGER_MIN, Self::TRIGGER_MAX)
    }

    pub fn clamp_hat(value: i32) -> i32 {
        value.clamp(Self::HAT_MIN, Self::HAT_MAX)
    }
}
