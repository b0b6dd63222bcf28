use serde::{Deserialize, Serialize};

/// One device sample of an in-progress stroke. `width` is the
/// pressure-derived pen thickness at this sample; geometry stages carry it
/// through as opaque payload and never average it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl StrokePoint {
    pub const fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width }
    }

    pub fn distance_sq_to(self, other: StrokePoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn distance_to(self, other: StrokePoint) -> f32 {
        self.distance_sq_to(other).sqrt()
    }
}

/// Ordered samples of one pointer-down-to-pointer-up gesture, in path
/// order. Owned by the caller for the duration of the gesture; pipeline
/// stages mutate it in place or replace it wholesale.
pub type StrokeList = Vec<StrokePoint>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_rgba_array(color: [u8; 4]) -> Self {
        Self::rgba(color[0], color[1], color[2], color[3])
    }
}

/// How the pointer-up pipeline rewrites a finished gesture. Smoothing and
/// orthogonalizing are mutually exclusive per tool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
    /// Simplified polyline drawn as-is.
    Freehand,
    /// Resampled and replaced with a Catmull-Rom interpolation.
    Smoothed,
    /// Near-cardinal runs snapped to the axes, corners rounded.
    Orthogonal,
}

/// Fully-resolved tool description handed to the pipeline. Producing this
/// from named tool definitions is the config layer's job, not ours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ToolConfig {
    pub style: PathStyle,
    pub color: Color,
    pub width: f32,
    pub arrow_start: bool,
    pub arrow_end: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            style: PathStyle::Freehand,
            color: Color::rgba(255, 64, 64, 255),
            width: 4.0,
            arrow_start: false,
            arrow_end: false,
        }
    }
}
