use crate::compress::DeflateCompressor;
use crate::geometry::{
    add_points, catmull_rom, find_arrow_anchor, orthogonalize, round_corners, simplify, snap_ends,
    ArrowAnchor, StrokeEnd,
};
use crate::history::SnapshotRing;
use crate::model::{PathStyle, StrokeList, StrokePoint, ToolConfig};
use crate::render::StrokeRenderer;
use crate::settings::OverlaySettings;
use tracing::debug;

/// Angle between an arrowhead barb and the shaft, in radians.
const BARB_SPREAD: f32 = 0.4;

/// What `finish_stroke` produced, for callers that update UI state or
/// decide whether the canvas changed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeOutcome {
    /// Points in the final path handed to the renderer.
    pub emitted_points: usize,
    /// Whether the endpoints snapped together into a closed shape.
    pub closed: bool,
    /// Arrowheads drawn (0 to 2).
    pub arrows: usize,
}

/// One drawing session: owns the tunables and runs the pointer-up pipeline
/// over each finished gesture.
pub struct OverlaySession {
    settings: OverlaySettings,
}

impl OverlaySession {
    pub fn new(mut settings: OverlaySettings) -> Self {
        settings.sanitize();
        Self { settings }
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Fresh snapshot ring sized from the settings. One per session; the
    /// ring holds the canvas states, the session holds the geometry knobs.
    pub fn history(&self) -> SnapshotRing<DeflateCompressor> {
        SnapshotRing::new(self.settings.history_capacity, DeflateCompressor::new())
    }

    /// Run the full pointer-up pipeline over a raw gesture and hand the
    /// result to the renderer: simplify, snap the ends, apply the tool's
    /// path style, then emit segments and any arrowheads.
    pub fn finish_stroke(
        &self,
        mut list: StrokeList,
        tool: &ToolConfig,
        renderer: &mut impl StrokeRenderer,
    ) -> StrokeOutcome {
        let raw_points = list.len();
        if list.is_empty() {
            return StrokeOutcome {
                emitted_points: 0,
                closed: false,
                arrows: 0,
            };
        }
        if list.len() == 1 {
            // A tap leaves a dot sized by the pen width at that sample.
            let p = list[0];
            renderer.draw_arc(p, (p.width * 0.5).max(0.5), 0.0, 360.0);
            return StrokeOutcome {
                emitted_points: 1,
                closed: false,
                arrows: 0,
            };
        }

        simplify(&mut list, self.settings.simplify_epsilon);
        let closed = snap_ends(&mut list, self.settings.snap_distance);

        match tool.style {
            PathStyle::Freehand => {}
            PathStyle::Smoothed => {
                add_points(&mut list, self.settings.resample_spacing);
                list = catmull_rom(&list, self.settings.catmull_steps as usize, closed);
            }
            PathStyle::Orthogonal => {
                let sections = orthogonalize(
                    &mut list,
                    self.settings.ortho_max_angle_deg,
                    self.settings.ortho_min_section_len,
                );
                round_corners(
                    &mut list,
                    &sections,
                    self.settings.corner_radius,
                    self.settings.corner_steps as usize,
                    closed,
                );
            }
        }

        for pair in list.windows(2) {
            renderer.draw_segment(pair[0], pair[1], pair[0].width);
        }

        // Closed shapes have no free ends to decorate.
        let mut arrows = 0;
        if !closed {
            let search_radius = self.settings.arrow_search_radius_per_width * tool.width.max(1.0);
            if tool.arrow_start {
                if let Some(anchor) = find_arrow_anchor(&list, search_radius, StrokeEnd::Start) {
                    draw_arrowhead(renderer, list[0], &anchor);
                    arrows += 1;
                }
            }
            if tool.arrow_end {
                if let Some(anchor) = find_arrow_anchor(&list, search_radius, StrokeEnd::End) {
                    draw_arrowhead(renderer, list[list.len() - 1], &anchor);
                    arrows += 1;
                }
            }
        }

        debug!(
            raw_points,
            emitted_points = list.len(),
            closed,
            arrows,
            style = ?tool.style,
            "stroke finished"
        );
        StrokeOutcome {
            emitted_points: list.len(),
            closed,
            arrows,
        }
    }
}

/// Two barb segments sweeping back from the tip along the anchor
/// direction, sized by the pen width at the anchor.
fn draw_arrowhead(renderer: &mut impl StrokeRenderer, tip: StrokePoint, anchor: &ArrowAnchor) {
    let length = (anchor.width * 2.0).max(4.0);
    let back = anchor.direction + std::f32::consts::PI;
    for spread in [BARB_SPREAD, -BARB_SPREAD] {
        let angle = back + spread;
        let barb = StrokePoint::new(
            tip.x + angle.cos() * length,
            tip.y + angle.sin() * length,
            anchor.width,
        );
        renderer.draw_segment(tip, barb, anchor.width);
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlaySession, StrokeOutcome};
    use crate::model::{PathStyle, StrokeList, StrokePoint, ToolConfig};
    use crate::render::StrokeRenderer;
    use crate::settings::OverlaySettings;

    /// Records every primitive the pipeline emits, in order.
    #[derive(Default)]
    struct RecordingRenderer {
        segments: Vec<(StrokePoint, StrokePoint, f32)>,
        arcs: Vec<(StrokePoint, f32, f32, f32)>,
    }

    impl StrokeRenderer for RecordingRenderer {
        fn draw_segment(&mut self, from: StrokePoint, to: StrokePoint, width: f32) {
            self.segments.push((from, to, width));
        }
        fn draw_arc(&mut self, center: StrokePoint, radius: f32, start_deg: f32, end_deg: f32) {
            self.arcs.push((center, radius, start_deg, end_deg));
        }
    }

    fn session() -> OverlaySession {
        OverlaySession::new(OverlaySettings::default())
    }

    fn freehand() -> ToolConfig {
        ToolConfig {
            style: PathStyle::Freehand,
            ..ToolConfig::default()
        }
    }

    /// Zigzag with enough amplitude to survive simplification.
    fn zigzag(n: usize) -> StrokeList {
        (0..n)
            .map(|i| StrokePoint::new(i as f32 * 10.0, (i % 2) as f32 * 4.0, 4.0))
            .collect()
    }

    #[test]
    fn empty_stroke_emits_nothing() {
        let mut renderer = RecordingRenderer::default();
        let outcome = session().finish_stroke(Vec::new(), &freehand(), &mut renderer);
        assert_eq!(
            outcome,
            StrokeOutcome {
                emitted_points: 0,
                closed: false,
                arrows: 0
            }
        );
        assert!(renderer.segments.is_empty());
        assert!(renderer.arcs.is_empty());
    }

    #[test]
    fn single_tap_emits_a_dot() {
        let mut renderer = RecordingRenderer::default();
        let outcome = session().finish_stroke(
            vec![StrokePoint::new(10.0, 20.0, 6.0)],
            &freehand(),
            &mut renderer,
        );
        assert_eq!(outcome.emitted_points, 1);
        assert!(renderer.segments.is_empty());
        assert_eq!(renderer.arcs.len(), 1);
        let (center, radius, start, end) = renderer.arcs[0];
        assert_eq!((center.x, center.y), (10.0, 20.0));
        assert_eq!(radius, 3.0);
        assert!((end - start).abs() >= 360.0);
    }

    #[test]
    fn freehand_polyline_emits_one_segment_per_window() {
        let mut renderer = RecordingRenderer::default();
        let outcome = session().finish_stroke(zigzag(8), &freehand(), &mut renderer);
        assert!(!outcome.closed);
        assert_eq!(renderer.segments.len(), outcome.emitted_points - 1);
        // Path order: each segment starts where the previous ended.
        for pair in renderer.segments.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        // Endpoints survive untouched.
        assert_eq!((renderer.segments[0].0.x, renderer.segments[0].0.y), (0.0, 0.0));
        let last = renderer.segments.last().expect("segments").1;
        assert_eq!(last.x, 70.0);
    }

    #[test]
    fn collinear_input_collapses_to_a_single_segment() {
        let line: StrokeList = (0..20)
            .map(|i| StrokePoint::new(i as f32 * 5.0, 0.0, 4.0))
            .collect();
        let mut renderer = RecordingRenderer::default();
        let outcome = session().finish_stroke(line, &freehand(), &mut renderer);
        assert_eq!(outcome.emitted_points, 2);
        assert_eq!(renderer.segments.len(), 1);
    }

    #[test]
    fn nearly_closed_square_snaps_shut() {
        let square = vec![
            StrokePoint::new(0.0, 0.0, 4.0),
            StrokePoint::new(100.0, 0.0, 4.0),
            StrokePoint::new(100.0, 100.0, 4.0),
            StrokePoint::new(0.0, 100.0, 4.0),
            StrokePoint::new(4.0, 3.0, 4.0),
        ];
        let mut renderer = RecordingRenderer::default();
        let outcome = session().finish_stroke(square, &freehand(), &mut renderer);
        assert!(outcome.closed);
        let first = renderer.segments.first().expect("segments").0;
        let last = renderer.segments.last().expect("segments").1;
        assert_eq!((first.x, first.y), (last.x, last.y));
    }

    #[test]
    fn smoothing_densifies_the_path() {
        let stroke = zigzag(8);
        let tool = ToolConfig {
            style: PathStyle::Smoothed,
            ..ToolConfig::default()
        };
        let mut plain = RecordingRenderer::default();
        let mut smooth = RecordingRenderer::default();
        let session = session();
        let freehand_outcome = session.finish_stroke(stroke.clone(), &freehand(), &mut plain);
        let smoothed_outcome = session.finish_stroke(stroke, &tool, &mut smooth);
        assert!(smoothed_outcome.emitted_points > freehand_outcome.emitted_points);
        assert_eq!(smooth.segments.len(), smoothed_outcome.emitted_points - 1);
    }

    #[test]
    fn orthogonal_l_emits_axis_aligned_legs_around_a_rounded_corner() {
        let mut list: StrokeList = (0..=10)
            .map(|i| StrokePoint::new(i as f32 * 10.0, 0.0, 4.0))
            .collect();
        list.extend((1..=10).map(|i| StrokePoint::new(100.0, i as f32 * 10.0, 4.0)));
        let tool = ToolConfig {
            style: PathStyle::Orthogonal,
            ..ToolConfig::default()
        };
        let mut renderer = RecordingRenderer::default();
        session().finish_stroke(list, &tool, &mut renderer);
        // Both legs survive as axis-aligned segments; the corner itself is
        // replaced by short arc chords.
        let first = renderer.segments.first().expect("segments");
        let last = renderer.segments.last().expect("segments");
        assert!((first.0.y - first.1.y).abs() < 1e-3, "first leg not horizontal");
        assert!((last.0.x - last.1.x).abs() < 1e-3, "last leg not vertical");
        assert!(renderer.segments.len() > 2, "corner was not rounded");
        // The sharp corner vertex is gone.
        assert!(!renderer
            .segments
            .iter()
            .any(|(from, _, _)| from.x == 100.0 && from.y == 0.0));
    }

    #[test]
    fn end_arrow_adds_two_barbs() {
        let tool = ToolConfig {
            style: PathStyle::Freehand,
            arrow_end: true,
            ..ToolConfig::default()
        };
        let mut plain = RecordingRenderer::default();
        let mut with_arrow = RecordingRenderer::default();
        let session = session();
        session.finish_stroke(zigzag(12), &freehand(), &mut plain);
        let outcome = session.finish_stroke(zigzag(12), &tool, &mut with_arrow);
        assert_eq!(outcome.arrows, 1);
        assert_eq!(with_arrow.segments.len(), plain.segments.len() + 2);
        // Barbs share the stroke tip.
        let tip = plain.segments.last().expect("segments").1;
        let barbs = &with_arrow.segments[with_arrow.segments.len() - 2..];
        for (from, _, _) in barbs {
            assert_eq!((from.x, from.y), (tip.x, tip.y));
        }
    }

    #[test]
    fn arrows_on_both_ends() {
        let tool = ToolConfig {
            style: PathStyle::Freehand,
            arrow_start: true,
            arrow_end: true,
            ..ToolConfig::default()
        };
        let mut renderer = RecordingRenderer::default();
        let outcome = session().finish_stroke(zigzag(12), &tool, &mut renderer);
        assert_eq!(outcome.arrows, 2);
    }

    #[test]
    fn closed_shapes_never_grow_arrows() {
        let tool = ToolConfig {
            style: PathStyle::Freehand,
            arrow_start: true,
            arrow_end: true,
            ..ToolConfig::default()
        };
        let square = vec![
            StrokePoint::new(0.0, 0.0, 4.0),
            StrokePoint::new(100.0, 0.0, 4.0),
            StrokePoint::new(100.0, 100.0, 4.0),
            StrokePoint::new(0.0, 100.0, 4.0),
            StrokePoint::new(2.0, 2.0, 4.0),
        ];
        let mut renderer = RecordingRenderer::default();
        let outcome = session().finish_stroke(square, &tool, &mut renderer);
        assert!(outcome.closed);
        assert_eq!(outcome.arrows, 0);
    }

    #[test]
    fn history_ring_is_sized_from_settings() {
        let mut settings = OverlaySettings::default();
        settings.history_capacity = 7;
        let session = OverlaySession::new(settings);
        assert_eq!(session.history().capacity(), 7);
    }
}
