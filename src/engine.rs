use crate::config::BridgeConfig;
use crate::devices::xbox_elite2_layout::XboxElite2Layout;
use crate::dpad::DpadSynthesizer;
use crate::error::BridgeError;
use crate::filter::AxisFilter;
use crate::logger::log_report;
use crate::mapping::{AxisRoute, InputMapping};
use crate::protocol::{centered_to_trigger, parse_trigger_report};
use crate::sink::{OutputSink, abs_event, key_event};
use evdev::{AbsoluteAxisType, InputEvent, InputEventKind, Key};
use tracing::{debug, trace};

/// Merges the evdev batch stream and the hidraw report stream into writes on
/// one output sink. All cross-event state lives here or in the filter and
/// d-pad components it owns.
pub struct TranslationEngine<S: OutputSink> {
    sink: S,
    mapping: InputMapping,
    filter: AxisFilter,
    dpad: DpadSynthesizer,
    last_left_trigger: i32,
    last_right_trigger: i32,
}

impl<S: OutputSink> TranslationEngine<S> {
    /// `sink` is expected to sit at rest (all axes 0, no keys held), which is
    /// how the virtual pad is created.
    pub fn new(sink: S, mapping: InputMapping, config: &BridgeConfig) -> Self {
        let mut filter = AxisFilter::new(config.left_stick, config.right_stick);
        for axis in XboxElite2Layout::STICK_AXES {
            filter.seed(axis, 0);
        }

        Self {
            sink,
            mapping,
            filter,
            dpad: DpadSynthesizer::new(),
            last_left_trigger: 0,
            last_right_trigger: 0,
        }
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[cfg(test)]
    pub fn triggers(&self) -> (i32, i32) {
        (self.last_left_trigger, self.last_right_trigger)
    }

    /// Translates one evdev batch and commits exactly one frame for it, even
    /// when nothing in the batch produced a write.
    pub fn handle_event_batch(&mut self, events: &[InputEvent]) -> Result<(), BridgeError> {
        for event in events {
            self.handle_event(event);
        }
        self.sink.commit()
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event.kind() {
            InputEventKind::Key(key) => self.handle_button(key, event.value()),
            InputEventKind::AbsAxis(axis) => self.handle_axis(axis, event.value()),
            _ => {}
        }
    }

    fn handle_button(&mut self, input: Key, value: i32) {
        match self.mapping.button(input) {
            Some(out) if XboxElite2Layout::has_button(out) => {
                trace!("button {:?} -> {:?} = {}", input, out, value);
                self.sink.write(key_event(out, value));
            }
            _ => debug!("dropping unmapped button {:?}", input),
        }
    }

    fn handle_axis(&mut self, input: AbsoluteAxisType, value: i32) {
        let Some(route) = self.mapping.axis(input) else {
            debug!("dropping unmapped axis {:?}", input);
            return;
        };

        match route {
            AxisRoute::Stick(stick, out) => {
                if let Some(filtered) = self.filter.apply(stick, out, value) {
                    trace!("stick {:?} -> {:?} = {}", input, out, filtered);
                    self.sink.write(abs_event(out, filtered));
                }
            }
            AxisRoute::LeftTrigger => {
                let value = XboxElite2Layout::clamp_trigger(value);
                if value != self.last_left_trigger {
                    trace!("left trigger = {}", value);
                    self.sink.write(abs_event(AbsoluteAxisType::ABS_Z, value));
                    self.last_left_trigger = value;
                }
            }
            AxisRoute::Hat(axis) => {
                self.dpad.update(axis, value, &mut self.sink);
            }
            AxisRoute::Ignore => {}
        }
    }

    /// Handles one hidraw read. Anything that is not a trigger report is
    /// skipped; a changed right trigger is written and committed on its own.
    pub fn handle_report(&mut self, report: &[u8]) -> Result<(), BridgeError> {
        log_report("hidraw report", report);

        let Some(raw) = parse_trigger_report(report) else {
            return Ok(());
        };

        let value = i32::from(centered_to_trigger(raw, XboxElite2Layout::TRIGGER_MAX as u16));
        if value == self.last_right_trigger {
            return Ok(());
        }

        trace!("right trigger raw=0x{:04X} -> {}", raw, value);
        self.sink.write(abs_event(AbsoluteAxisType::ABS_RZ, value));
        self.last_right_trigger = value;
        self.sink.commit()
    }
}
