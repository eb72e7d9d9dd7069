use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("cannot open event device {path}: {err}")]
    OpenEvdev {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    #[error("cannot grab event device {path}: {err}")]
    Grab {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    #[error("cannot open hidraw device {path}: {err}")]
    OpenHidraw {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    #[error("cannot create virtual gamepad: {0}")]
    CreateDevice(#[source] io::Error),

    #[error("write to virtual gamepad failed: {0}")]
    Output(#[source] io::Error),

    /// The device node went away (unplugged, driver unbound). Needs a restart.
    #[error("{channel} input is gone: {err}")]
    SourceLost {
        channel: &'static str,
        #[source]
        err: io::Error,
    },
}

/// Whether a read error means the device is gone for good, as opposed to a
/// hiccup that just yields no events this cycle.
pub fn is_source_gone(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(libc::ENODEV) | Some(libc::ENXIO) | Some(libc::ESHUTDOWN) | Some(libc::EIO)
    )
}
