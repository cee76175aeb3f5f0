// src/main.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use anyhow::Context;
use signal_hook::consts::SIGINT;
use streamplot::config::PlotterConfig;
use streamplot::drivers::{ChannelSource, PlotController};
use streamplot::gui;
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = PlotterConfig::from_home().context("resolving the snapshot folder")?;
    let interrupted = Arc::new(AtomicBool::new(false));
    // a second Ctrl-C while the first one is pending terminates right away
    signal_hook::flag::register_conditional_shutdown(SIGINT, 1, Arc::clone(&interrupted))
        .context("installing the interrupt handler")?;
    signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))
        .context("installing the interrupt handler")?;
    let source = ChannelSource::stdin().context("starting the stdin reader")?;
    let controller = PlotController::new(source, &config);
    log::info!(
        "plotting stdin, snapshots go to {}",
        config.output_dir.display()
    );
    gui::run_loop(controller, &config, Arc::clone(&interrupted))
        .context("running the plot window")?;
    if interrupted.load(Ordering::Relaxed) {
        println!("Plot interrupted by user.");
    }
    Ok(())
}
