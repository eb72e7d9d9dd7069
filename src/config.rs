use crate::filter::FilterProfile;
use crate::logger::Verbosity;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_EVDEV_PATH: &str = "/dev/input/event3";
pub const DEFAULT_HIDRAW_PATH: &str = "/dev/hidraw0";

// Stick filtering, raw signed units (-32768..32767)
pub const LEFT_DEADZONE: i32 = 3500;
pub const LEFT_JITTER: i32 = 300;
pub const RIGHT_DEADZONE: i32 = 2000;
pub const RIGHT_JITTER: i32 = 300;

#[derive(Debug, Parser)]
#[command(
    name = "scuf-bridge",
    version,
    about = "Expose a SCUF Envision Pro as a virtual Xbox Elite 2 controller"
)]
pub struct Args {
    /// evdev node of the pad (buttons, sticks, left trigger, hat)
    #[arg(long, default_value = DEFAULT_EVDEV_PATH)]
    pub evdev: PathBuf,

    /// hidraw node of the pad (right trigger)
    #[arg(long, default_value = DEFAULT_HIDRAW_PATH)]
    pub hidraw: PathBuf,

    #[arg(long, default_value_t = LEFT_DEADZONE)]
    pub left_deadzone: i32,

    #[arg(long, default_value_t = LEFT_JITTER)]
    pub left_jitter: i32,

    #[arg(long, default_value_t = RIGHT_DEADZONE)]
    pub right_deadzone: i32,

    #[arg(long, default_value_t = RIGHT_JITTER)]
    pub right_jitter: i32,

    /// Leave the evdev node shared with other readers
    #[arg(long)]
    pub no_grab: bool,

    /// -v for debug, -vv for per-event trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_u8(self.verbose)
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            left_stick: FilterProfile {
                deadzone: self.left_deadzone,
                jitter: self.left_jitter,
            },
            right_stick: FilterProfile {
                deadzone: self.right_deadzone,
                jitter: self.right_jitter,
            },
        }
    }
}

/// Tuning handed to the engine. Fixed for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    pub left_stick: FilterProfile,
    pub right_stick: FilterProfile,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            left_stick: FilterProfile {
                deadzone: LEFT_DEADZONE,
                jitter: LEFT_JITTER,
            },
            right_stick: FilterProfile {
                deadzone: RIGHT_DEADZONE,
                jitter: RIGHT_JITTER,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_config() {
        let args = Args::try_parse_from(["scuf-bridge"]).unwrap();
        assert_eq!(args.evdev, PathBuf::from(DEFAULT_EVDEV_PATH));
        assert_eq!(args.hidraw, PathBuf::from(DEFAULT_HIDRAW_PATH));
        assert!(!args.no_grab);
        assert_eq!(args.bridge_config(), BridgeConfig::default());
        assert!(args.verbosity() == Verbosity::Low);
    }

    #[test]
    fn overrides_and_verbosity() {
        let args = Args::try_parse_from([
            "scuf-bridge",
            "--evdev",
            "/dev/input/event7",
            "--right-deadzone",
            "1500",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.evdev, PathBuf::from("/dev/input/event7"));
        assert_eq!(args.bridge_config().right_stick.deadzone, 1500);
        assert_eq!(args.bridge_config().left_stick, BridgeConfig::default().left_stick);
        assert!(args.verbosity() == Verbosity::High);
    }
}
