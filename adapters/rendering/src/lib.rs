#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Car Dodger adapters.
//!
//! Backends implement [`Canvas`] for their drawing primitives and
//! [`RenderingBackend`] for the window loop. Everything the game puts on
//! screen is described by a [`Scene`] and drawn by [`draw_scene`], so the
//! look of the road stays identical across backends.

pub mod pacing;

use anyhow::Result as AnyResult;
use car_dodger_core::{Arena, Rect};
use glam::Vec2;
use std::time::Duration;

pub use pacing::FramePacer;

/// Refresh rate used while a session is running.
pub const PLAYING_FPS: u32 = 60;
/// Refresh rate used on the static game-over screen.
pub const GAME_OVER_FPS: u32 = 15;

/// Distance between the tops of two consecutive lane markers.
pub const LANE_MARKER_PERIOD: f32 = 60.0;
/// Length of a single lane marker.
pub const LANE_MARKER_LENGTH: f32 = 40.0;
/// Width of a single lane marker.
pub const LANE_MARKER_WIDTH: f32 = 6.0;

const LANE_MARKER_RADIUS: f32 = 3.0;
const PLAYER_RADIUS: f32 = 8.0;
const WINDSHIELD_RADIUS: f32 = 4.0;
const OBSTACLE_RADIUS: f32 = 6.0;
const OBSTACLE_WINDOW_RADIUS: f32 = 3.0;

const HUD_SCORE_CENTER: Vec2 = Vec2::new(70.0, 20.0);
const GAME_OVER_HEADLINE: &str = "GAME OVER";
const GAME_OVER_PROMPT: &str = "Press ENTER to play again or ESC to quit";

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            red as f32 / 255.0,
            green as f32 / 255.0,
            blue as f32 / 255.0,
            1.0,
        )
    }
}

/// Colors used by the road renderer.
pub mod palette {
    use super::Color;

    /// Verge color filling the whole frame.
    pub const BACKGROUND: Color = Color::from_rgb_u8(30, 30, 30);
    /// Asphalt between the verges.
    pub const ROAD: Color = Color::from_rgb_u8(50, 50, 50);
    /// Dashed centre line.
    pub const LANE_MARKER: Color = Color::from_rgb_u8(230, 230, 230);
    /// Side borders drawn over the verges during play.
    pub const BORDER: Color = Color::from_rgb_u8(40, 40, 40);
    /// Player vehicle body.
    pub const PLAYER_BODY: Color = Color::from_rgb_u8(40, 160, 200);
    /// Player vehicle windshield.
    pub const PLAYER_WINDSHIELD: Color = Color::from_rgb_u8(200, 240, 255);
    /// Obstacle body.
    pub const OBSTACLE_BODY: Color = Color::from_rgb_u8(180, 40, 40);
    /// Obstacle window.
    pub const OBSTACLE_WINDOW: Color = Color::from_rgb_u8(200, 230, 255);
    /// Score text.
    pub const TEXT: Color = Color::from_rgb_u8(255, 255, 255);
    /// Game-over headline.
    pub const HEADLINE: Color = Color::from_rgb_u8(255, 80, 80);
    /// Restart/quit prompt.
    pub const PROMPT: Color = Color::from_rgb_u8(200, 200, 200);
}

/// Font sizes available to scene text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontSize {
    /// HUD and prompt text.
    Small,
    /// Headline text.
    Large,
}

impl FontSize {
    /// Glyph height in pixels.
    #[must_use]
    pub const fn pixels(self) -> u16 {
        match self {
            Self::Small => 20,
            Self::Large => 48,
        }
    }
}

/// Drawing primitives a backend provides to the scene renderer.
pub trait Canvas {
    /// Fills an axis-aligned rectangle, rounding its corners by `corner_radius`.
    fn fill_rect(&mut self, rect: Rect, color: Color, corner_radius: f32);

    /// Draws a single line of text centred on `center`.
    fn draw_text(&mut self, text: &str, font: FontSize, color: Color, center: Vec2);
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether the window was asked to close since the previous frame.
    pub quit_requested: bool,
    /// Whether a move-left binding is currently held.
    pub move_left: bool,
    /// Whether a move-right binding is currently held.
    pub move_right: bool,
    /// Whether the confirm binding was pressed on this frame.
    pub confirm: bool,
    /// Whether the cancel binding was pressed on this frame.
    pub cancel: bool,
}

/// Decision returned by the scene update closure after every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    /// Render the scene and keep running.
    Continue,
    /// Stop the backend loop and return control to the caller.
    Exit,
}

/// Content specific to the active game state.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneView {
    /// A session is running.
    Playing {
        /// Area covered by the player's vehicle.
        player: Rect,
        /// Areas covered by the obstacles on the road.
        obstacles: Vec<Rect>,
        /// Current score shown on the HUD.
        score: u32,
    },
    /// The last session ended in a collision.
    GameOver {
        /// Score reached by the session that just ended.
        final_score: u32,
    },
}

/// Describes everything drawn on a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Screen and road dimensions.
    pub arena: Arena,
    /// Distance the lane markers have scrolled.
    pub lane_offset: f32,
    /// State specific content.
    pub view: SceneView,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub const fn new(arena: Arena, lane_offset: f32, view: SceneView) -> Self {
        Self {
            arena,
            lane_offset,
            view,
        }
    }

    /// Refresh rate the backend should cap presentation of this scene to.
    #[must_use]
    pub const fn target_fps(&self) -> u32 {
        match self.view {
            SceneView::Playing { .. } => PLAYING_FPS,
            SceneView::GameOver { .. } => GAME_OVER_FPS,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Car Dodger scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure asks it to exit.
    ///
    /// The provided `update_scene` closure receives the wall-clock time since
    /// the previous frame and the input captured by the adapter, and mutates
    /// the scene before it is rendered. The backend caps presentation to the
    /// scene's [`Scene::target_fps`]. An error from the closure stops the loop
    /// and is returned from `run`.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> AnyResult<LoopControl> + 'static;
}

/// Converts time since start-up into the lane marker scroll distance.
#[must_use]
pub fn lane_offset_for(elapsed: Duration) -> f32 {
    (elapsed.as_millis() / 10) as f32
}

/// Top edges of the lane markers visible for the given scroll distance.
pub fn lane_marker_tops(lane_offset: f32, screen_height: f32) -> impl Iterator<Item = f32> {
    let first = (-lane_offset).rem_euclid(LANE_MARKER_PERIOD);
    std::iter::successors(Some(first), |top| Some(top + LANE_MARKER_PERIOD))
        .take_while(move |top| *top < screen_height)
}

/// Draws the scene through the provided canvas.
pub fn draw_scene<C>(scene: &Scene, canvas: &mut C)
where
    C: Canvas + ?Sized,
{
    match &scene.view {
        SceneView::Playing {
            player,
            obstacles,
            score,
        } => {
            draw_road(scene.arena, scene.lane_offset, canvas);
            draw_borders(scene.arena, canvas);
            draw_player(*player, canvas);
            for obstacle in obstacles {
                draw_obstacle(*obstacle, canvas);
            }
            canvas.draw_text(
                &format!("Score: {score}"),
                FontSize::Small,
                palette::TEXT,
                HUD_SCORE_CENTER,
            );
        }
        SceneView::GameOver { final_score } => {
            draw_road(scene.arena, 0.0, canvas);
            let center = Vec2::new(
                (scene.arena.width() / 2) as f32,
                (scene.arena.height() / 2) as f32,
            );
            canvas.draw_text(
                GAME_OVER_HEADLINE,
                FontSize::Large,
                palette::HEADLINE,
                center - Vec2::new(0.0, 60.0),
            );
            canvas.draw_text(
                &format!("Score: {final_score}"),
                FontSize::Small,
                palette::TEXT,
                center,
            );
            canvas.draw_text(
                GAME_OVER_PROMPT,
                FontSize::Small,
                palette::PROMPT,
                center + Vec2::new(0.0, 60.0),
            );
        }
    }
}

fn draw_road<C>(arena: Arena, lane_offset: f32, canvas: &mut C)
where
    C: Canvas + ?Sized,
{
    let width = arena.width() as f32;
    let height = arena.height() as f32;
    canvas.fill_rect(
        Rect::new(0.0, 0.0, width, height),
        palette::BACKGROUND,
        0.0,
    );
    canvas.fill_rect(
        Rect::new(
            arena.road_left() as f32,
            0.0,
            arena.road_width() as f32,
            height,
        ),
        palette::ROAD,
        0.0,
    );

    let lane_x = (arena.width() / 2) as f32 - LANE_MARKER_WIDTH / 2.0;
    for top in lane_marker_tops(lane_offset, height) {
        canvas.fill_rect(
            Rect::new(lane_x, top, LANE_MARKER_WIDTH, LANE_MARKER_LENGTH),
            palette::LANE_MARKER,
            LANE_MARKER_RADIUS,
        );
    }
}

fn draw_borders<C>(arena: Arena, canvas: &mut C)
where
    C: Canvas + ?Sized,
{
    let margin = arena.road_margin() as f32;
    let height = arena.height() as f32;
    canvas.fill_rect(Rect::new(0.0, 0.0, margin, height), palette::BORDER, 0.0);
    canvas.fill_rect(
        Rect::new(arena.road_right() as f32, 0.0, margin, height),
        palette::BORDER,
        0.0,
    );
}

fn draw_player<C>(player: Rect, canvas: &mut C)
where
    C: Canvas + ?Sized,
{
    canvas.fill_rect(player, palette::PLAYER_BODY, PLAYER_RADIUS);
    canvas.fill_rect(
        player.inset(10.0, 10.0, player.width() - 20.0, 18.0),
        palette::PLAYER_WINDSHIELD,
        WINDSHIELD_RADIUS,
    );
}

fn draw_obstacle<C>(obstacle: Rect, canvas: &mut C)
where
    C: Canvas + ?Sized,
{
    canvas.fill_rect(obstacle, palette::OBSTACLE_BODY, OBSTACLE_RADIUS);
    canvas.fill_rect(
        obstacle.inset(8.0, 10.0, obstacle.width() - 16.0, 24.0),
        palette::OBSTACLE_WINDOW,
        OBSTACLE_WINDOW_RADIUS,
    );
}
