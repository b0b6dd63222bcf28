use crate::model::{StrokeList, StrokePoint};

/// Contiguous span of the stroke list awaiting processing. Kept on an
/// explicit stack so long strokes cannot overflow the call stack.
#[derive(Debug, Clone, Copy)]
struct ListRange {
    first: usize,
    last: usize,
}

/// Douglas-Peucker simplification, in place.
///
/// Removes interior points whose perpendicular distance to the chord of
/// their retained neighbors is at most `epsilon`. The first and last point
/// are always kept, so removal never averages or invents width payload.
pub fn simplify(list: &mut StrokeList, epsilon: f32) {
    if list.len() < 3 {
        return;
    }

    let mut kept = vec![false; list.len()];
    kept[0] = true;
    kept[list.len() - 1] = true;

    let mut pending = vec![ListRange {
        first: 0,
        last: list.len() - 1,
    }];
    while let Some(range) = pending.pop() {
        // Spans of two points carry no interior to drop.
        if range.last <= range.first + 1 {
            continue;
        }

        let chord_a = list[range.first];
        let chord_b = list[range.last];
        let mut max_dist = 0.0f32;
        let mut split = range.first;
        for i in (range.first + 1)..range.last {
            let d = perpendicular_distance(list[i], chord_a, chord_b);
            if d > max_dist {
                max_dist = d;
                split = i;
            }
        }

        if max_dist > epsilon {
            kept[split] = true;
            pending.push(ListRange {
                first: range.first,
                last: split,
            });
            pending.push(ListRange {
                first: split,
                last: range.last,
            });
        }
    }

    let mut index = 0;
    list.retain(|_| {
        let keep = kept[index];
        index += 1;
        keep
    });
}

/// Distance from `p` to the chord *segment* `a`-`b`. The projection is
/// clamped to the segment, so points past either chord endpoint measure
/// against that endpoint, not the infinite line; a zero-length chord
/// degenerates to point distance.
fn perpendicular_distance(p: StrokePoint, a: StrokePoint, b: StrokePoint) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f32::EPSILON {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    let px = p.x - (a.x + dx * t);
    let py = p.y - (a.y + dy * t);
    (px * px + py * py).sqrt()
}
