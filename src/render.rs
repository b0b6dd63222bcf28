use crate::canvas::PixelCanvas;
use crate::model::{Color, StrokePoint};

/// Receives the finished geometry one primitive at a time, in path order,
/// after the pipeline has run to completion.
pub trait StrokeRenderer {
    fn draw_segment(&mut self, from: StrokePoint, to: StrokePoint, width: f32);
    fn draw_arc(&mut self, center: StrokePoint, radius: f32, start_deg: f32, end_deg: f32);
}

/// Rasterizing renderer stamping capsule segments into a `PixelCanvas`.
pub struct CanvasRenderer<'a> {
    canvas: &'a mut PixelCanvas,
    color: Color,
}

impl<'a> CanvasRenderer<'a> {
    pub fn new(canvas: &'a mut PixelCanvas, color: Color) -> Self {
        Self { canvas, color }
    }
}

impl StrokeRenderer for CanvasRenderer<'_> {
    fn draw_segment(&mut self, from: StrokePoint, to: StrokePoint, width: f32) {
        let radius = (width * 0.5).max(0.5);
        let radius_sq = radius * radius;
        let pad = radius.ceil() as i32 + 1;

        let x0 = (from.x.min(to.x).floor() as i32 - pad).max(0);
        let y0 = (from.y.min(to.y).floor() as i32 - pad).max(0);
        let x1 = (from.x.max(to.x).ceil() as i32 + pad).min(self.canvas.width() as i32 - 1);
        let y1 = (from.y.max(to.y).ceil() as i32 + pad).min(self.canvas.height() as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                if point_segment_distance_sq((x as f32, y as f32), from, to) <= radius_sq {
                    self.canvas.set_pixel(x, y, self.color);
                }
            }
        }
    }

    fn draw_arc(&mut self, center: StrokePoint, radius: f32, start_deg: f32, end_deg: f32) {
        let radius = radius.max(0.5);
        let radius_sq = radius * radius;
        let pad = radius.ceil() as i32 + 1;
        let full_circle = (end_deg - start_deg).abs() >= 360.0;

        let cx = center.x.round() as i32;
        let cy = center.y.round() as i32;
        for y in (cy - pad)..=(cy + pad) {
            for x in (cx - pad)..=(cx + pad) {
                let dx = x as f32 - center.x;
                let dy = y as f32 - center.y;
                if dx * dx + dy * dy > radius_sq {
                    continue;
                }
                if !full_circle && !angle_in_sector(dy.atan2(dx).to_degrees(), start_deg, end_deg) {
                    continue;
                }
                self.canvas.set_pixel(x, y, self.color);
            }
        }
    }
}

fn angle_in_sector(angle_deg: f32, start_deg: f32, end_deg: f32) -> bool {
    let span = (end_deg - start_deg).rem_euclid(360.0);
    let offset = (angle_deg - start_deg).rem_euclid(360.0);
    offset <= span
}

fn point_segment_distance_sq(point: (f32, f32), start: StrokePoint, end: StrokePoint) -> f32 {
    let vx = end.x - start.x;
    let vy = end.y - start.y;
    let wx = point.0 - start.x;
    let wy = point.1 - start.y;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f32::EPSILON {
        return wx * wx + wy * wy;
    }
    let t = ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0);
    let dx = point.0 - (start.x + vx * t);
    let dy = point.1 - (start.y + vy * t);
    dx * dx + dy * dy
}
