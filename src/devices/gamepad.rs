use super::xbox_elite2_layout::XboxElite2Layout;
use crate::error::BridgeError;
use crate::sink::{OutputSink, abs_event};
use evdev::{
    AttributeSet, BusType, FFEffectType, InputEvent, InputId, Key, UinputAbsSetup,
    uinput::{VirtualDevice, VirtualDeviceBuilder},
};
use tracing::info;

/// uinput pad that looks like an Xbox Elite 2. Writes queue locally and go
/// to the kernel as one SYN_REPORT-terminated frame on `commit`.
pub struct VirtualPad {
    device: VirtualDevice,
    pending: Vec<InputEvent>,
}

impl VirtualPad {
    /// Creates the device and leaves every axis at rest.
    pub fn create() -> Result<Self, BridgeError> {
        let device = build_device().map_err(BridgeError::CreateDevice)?;
        let mut pad = Self {
            device,
            pending: Vec::with_capacity(32),
        };

        for axis in XboxElite2Layout::STICK_AXES
            .into_iter()
            .chain(XboxElite2Layout::TRIGGER_AXES)
        {
            pad.write(abs_event(axis, 0));
        }
        pad.commit()?;

        info!(
            "virtual pad \"{}\" ready ({:04x}:{:04x})",
            XboxElite2Layout::NAME,
            XboxElite2Layout::VENDOR_ID,
            XboxElite2Layout::PRODUCT_ID
        );
        Ok(pad)
    }
}

impl OutputSink for VirtualPad {
    fn write(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    fn commit(&mut self) -> Result<(), BridgeError> {
        let result = self.device.emit(&self.pending);
        self.pending.clear();
        result.map_err(BridgeError::Output)
    }
}

fn build_device() -> std::io::Result<VirtualDevice> {
    let mut keys = AttributeSet::<Key>::new();
    for key in XboxElite2Layout::BUTTONS {
        keys.insert(key);
    }

    // Advertised for compatibility only; no effect is ever played.
    let mut ff = AttributeSet::<FFEffectType>::new();
    ff.insert(FFEffectType::FF_RUMBLE);

    let mut builder = VirtualDeviceBuilder::new()?
        .name(XboxElite2Layout::NAME)
        .input_id(InputId::new(
            BusType::BUS_USB,
            XboxElite2Layout::VENDOR_ID,
            XboxElite2Layout::PRODUCT_ID,
            XboxElite2Layout::VERSION,
        ))
        .with_keys(&keys)?
        .with_ff(&ff)?
        .with_ff_effects_max(XboxElite2Layout::FF_EFFECTS_MAX);

    for axis in XboxElite2Layout::STICK_AXES {
        builder = builder.with_absolute_axis(&UinputAbsSetup::new(axis, XboxElite2Layout::stick_info()))?;
    }
    for axis in XboxElite2Layout::TRIGGER_AXES {
        builder = builder.with_absolute_axis(&UinputAbsSetup::new(axis, XboxElite2Layout::trigger_info()))?;
    }

    builder.build()
}
