use crate::model::{StrokeList, StrokePoint};

/// Floor on knot spacing so coincident samples cannot collapse a segment's
/// parameter range.
const MIN_KNOT_INTERVAL: f32 = 1e-3;

/// Insert linearly interpolated points so no gap between consecutive
/// samples exceeds `max_spacing`.
///
/// Fast pointer motion produces sparse samples; without this the spline
/// fit shows visible polygon facets. Inserted points take the width of the
/// nearest real sample of the gap being filled, never an average.
pub fn add_points(list: &mut StrokeList, max_spacing: f32) {
    if list.len() < 2 || max_spacing <= 0.0 {
        return;
    }

    let mut out = Vec::with_capacity(list.len());
    for pair in list.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        out.push(a);
        let gap = a.distance_to(b);
        if gap > max_spacing {
            let extra = (gap / max_spacing).ceil() as usize - 1;
            for k in 1..=extra {
                let t = k as f32 / (extra + 1) as f32;
                out.push(StrokePoint {
                    x: a.x + (b.x - a.x) * t,
                    y: a.y + (b.y - a.y) * t,
                    width: if t < 0.5 { a.width } else { b.width },
                });
            }
        }
    }
    out.push(list[list.len() - 1]);
    *list = out;
}

/// Replace the control polygon with a centripetal Catmull-Rom
/// interpolation, `steps` emitted points per control segment.
///
/// The curve passes through every control point. Open paths get phantom
/// end controls by reflecting the first/last real points, so the real
/// endpoints stay interpolation endpoints; closed paths (last point equal
/// to the first) wrap their controls around the loop instead. Widths are
/// taken from the nearest control point so no pressure data is invented.
pub fn catmull_rom(list: &StrokeList, steps: usize, closed: bool) -> StrokeList {
    let n = list.len();
    if n < 2 || steps == 0 {
        return list.clone();
    }

    let control = |i: isize| -> StrokePoint {
        if closed {
            // list[n - 1] duplicates list[0]; wrap across the seam.
            if i < 0 {
                list[n - 2]
            } else if i as usize > n - 1 {
                list[(i as usize - (n - 1)) % (n - 1)]
            } else {
                list[i as usize]
            }
        } else if i < 0 {
            reflect(list[0], list[1])
        } else if i as usize > n - 1 {
            reflect(list[n - 1], list[n - 2])
        } else {
            list[i as usize]
        }
    };

    let mut out = Vec::with_capacity((n - 1) * steps + 1);
    for seg in 0..(n - 1) as isize {
        emit_segment(
            control(seg - 1),
            control(seg),
            control(seg + 1),
            control(seg + 2),
            steps,
            &mut out,
        );
    }
    out.push(list[n - 1]);
    out
}

/// Phantom control: `pivot` mirrored across itself from `inner`.
fn reflect(pivot: StrokePoint, inner: StrokePoint) -> StrokePoint {
    StrokePoint {
        x: pivot.x * 2.0 - inner.x,
        y: pivot.y * 2.0 - inner.y,
        width: pivot.width,
    }
}

/// Centripetal knot spacing: sqrt of inter-point distance (alpha 0.5).
fn knot_interval(a: StrokePoint, b: StrokePoint) -> f32 {
    a.distance_to(b).sqrt().max(MIN_KNOT_INTERVAL)
}

/// Barry-Goldman evaluation of the span `p1`..`p2`, emitting `steps`
/// points starting at `p1` and stopping short of `p2` (the next segment,
/// or the final push, supplies it).
fn emit_segment(
    p0: StrokePoint,
    p1: StrokePoint,
    p2: StrokePoint,
    p3: StrokePoint,
    steps: usize,
    out: &mut StrokeList,
) {
    let t0 = 0.0f32;
    let t1 = t0 + knot_interval(p0, p1);
    let t2 = t1 + knot_interval(p1, p2);
    let t3 = t2 + knot_interval(p2, p3);

    for step in 0..steps {
        let u = step as f32 / steps as f32;
        let t = t1 + (t2 - t1) * u;

        let a1 = lerp(p0, p1, t0, t1, t);
        let a2 = lerp(p1, p2, t1, t2, t);
        let a3 = lerp(p2, p3, t2, t3, t);
        let b1 = lerp_xy(a1, a2, t0, t2, t);
        let b2 = lerp_xy(a2, a3, t1, t3, t);
        let c = lerp_xy(b1, b2, t1, t2, t);

        out.push(StrokePoint {
            x: c.0,
            y: c.1,
            width: if u < 0.5 { p1.width } else { p2.width },
        });
    }
}

fn lerp(a: StrokePoint, b: StrokePoint, ta: f32, tb: f32, t: f32) -> (f32, f32) {
    let w = (t - ta) / (tb - ta);
    (a.x + (b.x - a.x) * w, a.y + (b.y - a.y) * w)
}

fn lerp_xy(a: (f32, f32), b: (f32, f32), ta: f32, tb: f32, t: f32) -> (f32, f32) {
    let w = (t - ta) / (tb - ta);
    (a.0 + (b.0 - a.0) * w, a.1 + (b.1 - a.1) * w)
}
