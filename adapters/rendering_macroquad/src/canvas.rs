//! Macroquad implementation of the scene [`Canvas`].

use car_dodger_core::Rect;
use car_dodger_rendering::{Canvas, Color, FontSize};
use glam::Vec2;
use macroquad::{
    shapes::{draw_circle, draw_rectangle},
    text::measure_text,
};

/// Canvas drawing into macroquad's current frame.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MacroquadCanvas;

impl Canvas for MacroquadCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color, corner_radius: f32) {
        let color = to_macroquad_color(color);
        let (x, y, width, height) = (rect.x(), rect.y(), rect.width(), rect.height());
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let radius = corner_radius.min(width * 0.5).min(height * 0.5);
        if radius <= 0.0 {
            draw_rectangle(x, y, width, height, color);
            return;
        }

        // A cross of two rectangles plus one disc per corner.
        draw_rectangle(x + radius, y, width - 2.0 * radius, height, color);
        draw_rectangle(x, y + radius, width, height - 2.0 * radius, color);
        for (cx, cy) in [
            (x + radius, y + radius),
            (x + width - radius, y + radius),
            (x + radius, y + height - radius),
            (x + width - radius, y + height - radius),
        ] {
            draw_circle(cx, cy, radius, color);
        }
    }

    fn draw_text(&mut self, text: &str, font: FontSize, color: Color, center: Vec2) {
        let size = font.pixels();
        let dimensions = measure_text(text, None, size, 1.0);
        let left = center.x - dimensions.width * 0.5;
        let baseline = center.y - dimensions.height * 0.5 + dimensions.offset_y;
        let _ = macroquad::text::draw_text(
            text,
            left,
            baseline,
            f32::from(size),
            to_macroquad_color(color),
        );
    }
}

pub(crate) fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
