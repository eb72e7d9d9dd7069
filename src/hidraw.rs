use crate::error::BridgeError;
use crate::protocol::{BinaryReport, REPORT_MAX_LEN};
use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tokio::io::Interest;
use tokio::io::unix::AsyncFd;
use tracing::info;

/// Non-blocking reader for a hidraw node, driven by the tokio reactor.
pub struct HidrawReader {
    fd: AsyncFd<File>,
}

impl HidrawReader {
    pub fn open(path: &Path) -> Result<Self, BridgeError> {
        let open_err = |err| BridgeError::OpenHidraw {
            path: path.to_path_buf(),
            err,
        };

        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(open_err)?;
        let fd = AsyncFd::with_interest(file, Interest::READABLE).map_err(open_err)?;

        info!("hidraw {} opened", path.display());
        Ok(Self { fd })
    }

    /// Waits for readability and reads one report. `Ok(None)` means the wakeup
    /// was spurious and there was nothing to read.
    pub async fn read_report(&self) -> io::Result<Option<BinaryReport>> {
        let mut guard = self.fd.readable().await?;
        let mut buf = [0u8; REPORT_MAX_LEN];

        match guard.try_io(|inner| {
            let mut file = inner.get_ref();
            file.read(&mut buf)
        }) {
            Ok(Ok(len)) => Ok(Some(BinaryReport::new(&buf[..len]))),
            Ok(Err(err)) => Err(err),
            Err(_would_block) => Ok(None),
        }
    }
}
