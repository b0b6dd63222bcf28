use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_CAPACITY;

/// Tunables for the pointer-up geometry pipeline and the snapshot ring.
///
/// Every field carries a serde default so settings files written by older
/// builds keep loading; unknown values are clamped by `sanitize` rather
/// than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlaySettings {
    /// Corridor half-width for the pre-pass simplifier, in pixels.
    #[serde(default = "default_simplify_epsilon")]
    pub simplify_epsilon: f32,
    /// Endpoints closer than this snap together to close the shape.
    #[serde(default = "default_snap_distance")]
    pub snap_distance: f32,
    /// Maximum gap between control points fed to the smoother.
    #[serde(default = "default_resample_spacing")]
    pub resample_spacing: f32,
    /// Interpolated points emitted per smoothing segment.
    #[serde(default = "default_catmull_steps")]
    pub catmull_steps: u32,
    /// Maximum deviation from a cardinal direction, in degrees, for a run
    /// of segments to count as axis-aligned.
    #[serde(default = "default_ortho_max_angle_deg")]
    pub ortho_max_angle_deg: f32,
    /// Shorter runs are treated as noise and merged into their neighbors.
    #[serde(default = "default_ortho_min_section_len")]
    pub ortho_min_section_len: f32,
    /// Corner rounding radius; capped per corner by the adjoining legs.
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    /// Points per rounded corner arc.
    #[serde(default = "default_corner_steps")]
    pub corner_steps: u32,
    /// Arrow anchor search radius per unit of tool width; the pipeline
    /// multiplies this by the tool's width before searching.
    #[serde(
        default = "default_arrow_search_radius_per_width",
        alias = "arrow_search_radius"
    )]
    pub arrow_search_radius_per_width: f32,
    /// Snapshot slots per drawing session.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// When enabled the logger initialises at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_simplify_epsilon() -> f32 {
    1.5
}

fn default_snap_distance() -> f32 {
    12.0
}

fn default_resample_spacing() -> f32 {
    8.0
}

fn default_catmull_steps() -> u32 {
    12
}

fn default_ortho_max_angle_deg() -> f32 {
    15.0
}

fn default_ortho_min_section_len() -> f32 {
    60.0
}

fn default_corner_radius() -> f32 {
    20.0
}

fn default_corner_steps() -> u32 {
    6
}

fn default_arrow_search_radius_per_width() -> f32 {
    5.0
}

fn default_history_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            simplify_epsilon: default_simplify_epsilon(),
            snap_distance: default_snap_distance(),
            resample_spacing: default_resample_spacing(),
            catmull_steps: default_catmull_steps(),
            ortho_max_angle_deg: default_ortho_max_angle_deg(),
            ortho_min_section_len: default_ortho_min_section_len(),
            corner_radius: default_corner_radius(),
            corner_steps: default_corner_steps(),
            arrow_search_radius_per_width: default_arrow_search_radius_per_width(),
            history_capacity: default_history_capacity(),
            debug_logging: false,
        }
    }
}

impl OverlaySettings {
    /// Clamp hand-edited values back into usable ranges. Returns whether
    /// anything changed so callers can rewrite the settings file.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;

        changed |= clamp_finite(&mut self.simplify_epsilon, 0.0, default_simplify_epsilon());
        changed |= clamp_finite(&mut self.snap_distance, 0.0, default_snap_distance());
        changed |= clamp_finite(&mut self.resample_spacing, 0.1, default_resample_spacing());
        changed |= clamp_finite(
            &mut self.ortho_max_angle_deg,
            0.0,
            default_ortho_max_angle_deg(),
        );
        changed |= clamp_finite(
            &mut self.ortho_min_section_len,
            0.0,
            default_ortho_min_section_len(),
        );
        changed |= clamp_finite(&mut self.corner_radius, 0.0, default_corner_radius());
        changed |= clamp_finite(
            &mut self.arrow_search_radius_per_width,
            0.0,
            default_arrow_search_radius_per_width(),
        );

        if self.catmull_steps == 0 {
            self.catmull_steps = 1;
            changed = true;
        }
        if self.corner_steps == 0 {
            self.corner_steps = 1;
            changed = true;
        }
        if self.history_capacity == 0 {
            self.history_capacity = 1;
            changed = true;
        }

        changed
    }
}

/// Non-finite values fall back to the default; finite ones are clamped to
/// the lower bound.
fn clamp_finite(value: &mut f32, min: f32, fallback: f32) -> bool {
    if !value.is_finite() {
        *value = fallback;
        return true;
    }
    if *value < min {
        *value = min;
        return true;
    }
    false
}
