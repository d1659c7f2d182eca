#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Car Dodger.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Drawing primitives live in the local `canvas` module and keyboard sampling
//! in `input`, so the loop below only sequences a frame: sample input, update
//! the scene, draw it, present, then wait for the next frame boundary.

mod canvas;
mod input;

pub use self::input::KeyObservations;

use self::canvas::MacroquadCanvas;
use anyhow::{Context, Result};
use car_dodger_rendering::{
    draw_scene, FrameInput, FramePacer, LoopControl, Presentation, RenderingBackend, Scene,
};
use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as the frame pacer allows.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = if enabled { Some(1) } else { Some(0) };
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average rate once one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> Result<LoopControl> + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let window_width = i32::try_from(scene.arena.width())
            .context("arena width does not fit a window dimension")?;
        let window_height = i32::try_from(scene.arena.height())
            .context("arena height does not fit a window dimension")?;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        log::info!(
            "opening {window_width}x{window_height} window \"{}\"",
            config.window_title
        );

        let failure = Rc::new(RefCell::new(None));
        let loop_failure = Rc::clone(&failure);

        macroquad::Window::from_config(config, async move {
            // Window close is reported through the frame input instead of
            // tearing the loop down underneath the game.
            macroquad::input::prevent_quit();

            let background = canvas::to_macroquad_color(clear_color);
            let mut scene = scene;
            let mut pacer = FramePacer::new();
            let mut fps_counter = FpsCounter::default();
            let mut last_frame = Instant::now();

            loop {
                let now = Instant::now();
                let frame_dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                let frame_input = KeyObservations::poll().frame_input();
                match update_scene(frame_dt, frame_input, &mut scene) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => {
                        log::info!("render loop exiting");
                        break;
                    }
                    Err(error) => {
                        log::error!("render loop stopped: {error:#}");
                        *loop_failure.borrow_mut() = Some(error);
                        break;
                    }
                }

                macroquad::window::clear_background(background);
                draw_scene(&scene, &mut MacroquadCanvas);

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    log::debug!("FPS: {per_second:.2} (target {})", scene.target_fps());
                }

                macroquad::window::next_frame().await;

                let delay = pacer.delay(Instant::now(), scene.target_fps());
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }
        });

        let failure = failure.borrow_mut().take();
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
