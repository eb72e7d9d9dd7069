use crate::engine::TranslationEngine;
use crate::error::{BridgeError, is_source_gone};
use crate::hidraw::HidrawReader;
use crate::sink::OutputSink;
use evdev::{Device, EventStream, InputEvent, InputEventKind, Synchronization};
use std::io;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Opens the pad's evdev node and, unless `grab` is false, takes it
/// exclusively so nothing else sees the raw layout.
pub fn open_evdev(path: &Path, grab: bool) -> Result<EventStream, BridgeError> {
    let mut device = Device::open(path).map_err(|err| BridgeError::OpenEvdev {
        path: path.to_path_buf(),
        err,
    })?;
    info!(
        "evdev {} opened: {}",
        path.display(),
        device.name().unwrap_or("(unnamed)")
    );

    if grab {
        device.grab().map_err(|err| BridgeError::Grab {
            path: path.to_path_buf(),
            err,
        })?;
        info!("evdev {} grabbed", path.display());
    }

    device.into_event_stream().map_err(|err| BridgeError::OpenEvdev {
        path: path.to_path_buf(),
        err,
    })
}

/// Collects evdev events into the frames the kernel delimits with
/// SYN_REPORT. SYN_DROPPED never reaches here: the event stream resyncs
/// device state itself and hands over the compensating events as a normal
/// frame.
#[derive(Default)]
pub struct FrameAssembler {
    events: Vec<InputEvent>,
}

impl FrameAssembler {
    /// Returns the finished frame when `event` closes one.
    pub fn push(&mut self, event: InputEvent) -> Option<Vec<InputEvent>> {
        match event.kind() {
            InputEventKind::Synchronization(Synchronization::SYN_REPORT) => {
                Some(std::mem::take(&mut self.events))
            }
            InputEventKind::Synchronization(_) => None,
            _ => {
                self.events.push(event);
                None
            }
        }
    }
}

/// Services both inputs until Ctrl-C or until one of them disappears.
///
/// Runs on one thread: whichever source is ready is handled to completion
/// before the other is looked at again. On the evdev side a batch is one
/// kernel frame (up to SYN_REPORT), so a wakeup that carries several frames
/// commits once per frame.
pub async fn run<S: OutputSink>(
    mut events: EventStream,
    hidraw: HidrawReader,
    engine: &mut TranslationEngine<S>,
) -> Result<(), BridgeError> {
    let mut frames = FrameAssembler::default();
    let mut evdev_errors = ReadErrors::new("evdev");
    let mut hidraw_errors = ReadErrors::new("hidraw");
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("bridge running");
    loop {
        tokio::select! {
            event = events.next_event() => match event {
                Ok(event) => {
                    evdev_errors.recovered();
                    if let Some(frame) = frames.push(event) {
                        engine.handle_event_batch(&frame)?;
                    }
                }
                Err(err) => evdev_errors.check(err)?,
            },
            report = hidraw.read_report() => match report {
                Ok(Some(report)) => {
                    hidraw_errors.recovered();
                    engine.handle_report(report.as_bytes())?;
                }
                Ok(None) => {}
                Err(err) => hidraw_errors.check(err)?,
            },
            _ = &mut shutdown => {
                info!("shutting down");
                return Ok(());
            }
        }
    }
}

/// Read-error policy for one input. A device that is gone ends the loop;
/// anything else is skipped, with one warning per run of failures.
struct ReadErrors {
    channel: &'static str,
    failing: u64,
}

impl ReadErrors {
    fn new(channel: &'static str) -> Self {
        Self { channel, failing: 0 }
    }

    fn check(&mut self, err: io::Error) -> Result<(), BridgeError> {
        if is_source_gone(&err) {
            error!("{} input lost: {}", self.channel, err);
            return Err(BridgeError::SourceLost {
                channel: self.channel,
                err,
            });
        }
        if err.kind() == io::ErrorKind::WouldBlock {
            return Ok(());
        }

        self.failing += 1;
        if self.failing == 1 {
            warn!("{} read failed, skipping: {}", self.channel, err);
        } else {
            debug!("{} read failed ({} in a row): {}", self.channel, self.failing, err);
        }
        Ok(())
    }

    fn recovered(&mut self) {
        if self.failing > 0 {
            info!("{} reads recovered after {} failures", self.channel, self.failing);
            self.failing = 0;
        }
    }

    #[cfg(test)]
    fn should_warn_next(&self) -> bool {
        self.failing == 0
    }
}
