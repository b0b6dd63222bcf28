use crate::model::StrokeList;

/// Which end of the stroke carries the arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEnd {
    Start,
    End,
}

/// Tail reference for an arrowhead: where it anchors, how wide the pen was
/// there, and the direction from the anchor toward the stroke tip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowAnchor {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Radians, anchor toward tip.
    pub direction: f32,
}

/// Find the point anchoring an arrowhead at the requested end.
///
/// Walks inward from the tip while the straight-line distance back to the
/// tip stays within `search_radius`. Among visited points whose width
/// doubled still fits inside that distance, the widest wins (widest is the
/// most confident pressure sample; ties go to the farthest). Returns
/// `None` when the stroke has fewer than two points or never escapes the
/// search radius.
pub fn find_arrow_anchor(
    list: &StrokeList,
    search_radius: f32,
    end: StrokeEnd,
) -> Option<ArrowAnchor> {
    if list.len() < 2 {
        return None;
    }
    let radius_sq = search_radius * search_radius;
    let tip = match end {
        StrokeEnd::Start => list[0],
        StrokeEnd::End => list[list.len() - 1],
    };

    let mut best: Option<(f32, f32, f32)> = None;
    let mut escaped = false;
    let mut visit = |index: usize| -> bool {
        let p = list[index];
        let dist_sq = p.distance_sq_to(tip);
        if dist_sq > radius_sq {
            escaped = true;
            return false;
        }
        if p.width * p.width * 4.0 <= dist_sq && best.map_or(true, |(_, _, w)| p.width >= w) {
            best = Some((p.x, p.y, p.width));
        }
        true
    };

    match end {
        StrokeEnd::Start => {
            for i in 1..list.len() {
                if !visit(i) {
                    break;
                }
            }
        }
        StrokeEnd::End => {
            for i in (0..list.len() - 1).rev() {
                if !visit(i) {
                    break;
                }
            }
        }
    }

    if !escaped {
        return None;
    }
    let (x, y, width) = best?;
    Some(ArrowAnchor {
        x,
        y,
        width,
        direction: (tip.y - y).atan2(tip.x - x),
    })
}
