mod bridge;
mod config;
mod devices;
mod dpad;
mod engine;
mod error;
mod filter;
mod hidraw;
mod logger;
mod mapping;
mod protocol;
mod sink;

use clap::Parser;
use config::Args;
use devices::VirtualPad;
use engine::TranslationEngine;
use hidraw::HidrawReader;
use mapping::InputMapping;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init(args.verbosity());

    info!("starting SCUF bridge");
    let config = args.bridge_config();
    info!(
        "stick filter: left dz={} jitter={}, right dz={} jitter={}",
        config.left_stick.deadzone,
        config.left_stick.jitter,
        config.right_stick.deadzone,
        config.right_stick.jitter
    );

    let events = bridge::open_evdev(&args.evdev, !args.no_grab)?;
    let hidraw = HidrawReader::open(&args.hidraw)?;
    let pad = VirtualPad::create()?;

    let mut engine = TranslationEngine::new(pad, InputMapping::envision_pro(), &config);

    if let Err(e) = bridge::run(events, hidraw, &mut engine).await {
        error!("bridge stopped: {}", e);
        return Err(e.into());
    }

    Ok(())
}
