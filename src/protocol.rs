// Layout of the hidraw input report that carries the right trigger.
//
// The pad sends several report types on its hidraw node. Only type 0x06
// matters here; the right trigger (R2) sits at bytes 9..11 as a little-endian
// u16 centered on 0x8000. Everything else in that report is also available
// via evdev and is ignored.

use bytemuck::{Pod, Zeroable};

pub const REPORT_ID_TRIGGERS: u8 = 0x06;
pub const REPORT_MIN_LEN: usize = 14;
pub const REPORT_MAX_LEN: usize = 64;
pub const RIGHT_TRIGGER_OFFSET: usize = 9;

pub const TRIGGER_CENTER: u16 = 0x8000;
pub const TRIGGER_MAX_DELTA: u16 = 0x7FFF;

/// First `REPORT_MIN_LEN` bytes of a type 0x06 report.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct TriggerReportHeader {
    report_id: u8,
    _reserved: [u8; RIGHT_TRIGGER_OFFSET - 1],
    right_trigger: [u8; 2],
    _tail: [u8; REPORT_MIN_LEN - RIGHT_TRIGGER_OFFSET - 2],
}

/// One read from the hidraw node. Fixed capacity, `len` bytes valid.
#[derive(Clone, Copy)]
pub struct BinaryReport {
    bytes: [u8; REPORT_MAX_LEN],
    len: usize,
}

impl BinaryReport {
    /// Copies at most `REPORT_MAX_LEN` bytes out of `data`.
    pub fn new(data: &[u8]) -> Self {
        let len = data.len().min(REPORT_MAX_LEN);
        let mut bytes = [0u8; REPORT_MAX_LEN];
        bytes[..len].copy_from_slice(&data[..len]);
        Self { bytes, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Raw centered right-trigger reading, or `None` for anything that is not a
/// complete type 0x06 report. `None` just means "skip this one".
pub fn parse_trigger_report(report: &[u8]) -> Option<u16> {
    let header: TriggerReportHeader =
        bytemuck::try_pod_read_unaligned(report.get(..REPORT_MIN_LEN)?).ok()?;
    if header.report_id != REPORT_ID_TRIGGERS {
        return None;
    }
    Some(u16::from_le_bytes(header.right_trigger))
}

/// Maps a centered reading (0x8000 = released) onto `0..=max`, rounding to
/// nearest. Readings below center are released; deltas past 0x7FFF saturate.
pub fn centered_to_trigger(raw: u16, max: u16) -> u16 {
    let delta = raw.saturating_sub(TRIGGER_CENTER).min(TRIGGER_MAX_DELTA) as u32;
    let full = TRIGGER_MAX_DELTA as u32;
    // 0x7FFF is odd, so there is never an exact .5 to break a tie on.
    ((delta * max as u32 + full / 2) / full) as u16
}
