#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Car Dodger.

mod app;
mod logging;

use anyhow::{Context, Result};
use car_dodger_core::WINDOW_TITLE;
use car_dodger_rendering::{palette, Presentation, RenderingBackend};
use car_dodger_rendering_macroquad::MacroquadBackend;
use clap::Parser;

use self::app::App;

/// Dodge the oncoming traffic for as long as you can.
///
/// Steer with the arrow keys or A/D. On the game over screen press Enter to
/// play again or Escape to quit.
#[derive(Debug, Parser)]
#[command(name = "car-dodger", version)]
struct Cli {}

/// Entry point for the Car Dodger command-line interface.
fn main() -> Result<()> {
    let _cli = Cli::parse();
    logging::init();

    let seed: u64 = rand::random();
    log::info!("starting run with seed {seed:#018x}");

    let mut app = App::new(seed)?;
    let presentation = Presentation::new(WINDOW_TITLE, palette::BACKGROUND, app.scene());

    MacroquadBackend::new()
        .with_vsync(true)
        .run(presentation, move |dt, input, scene| app.frame(dt, input, scene))
        .context("render loop failed")?;

    log::info!("goodbye");
    Ok(())
}
