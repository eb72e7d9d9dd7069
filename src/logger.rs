use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Verbosity {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Verbosity {
    pub fn from_u8(level: u8) -> Self {
        match level {
            0 => Verbosity::Low,
            1 => Verbosity::Medium,
            _ => Verbosity::High,
        }
    }

    pub fn level(self) -> Level {
        match self {
            Verbosity::Low => Level::INFO,
            Verbosity::Medium => Level::DEBUG,
            Verbosity::High => Level::TRACE,
        }
    }
}

/// Installs the global fmt subscriber. Call once, before anything logs.
pub fn init(verbosity: Verbosity) {
    tracing_subscriber::fmt()
        .with_max_level(verbosity.level())
        .with_target(false)
        .init();
}

/// Hex dump of a raw report at trace level.
pub fn log_report(title: &str, data: &[u8]) {
    if tracing::enabled!(Level::TRACE) {
        tracing::trace!("{} [{}]: {}", title, data.len(), hex(data));
    }
}

fn hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
}
