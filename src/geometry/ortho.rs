use crate::model::{StrokeList, StrokePoint};

/// Chords shorter than this carry no usable direction.
const MIN_CHORD: f32 = 1e-3;

/// Cardinal axis a section snaps to, in standard math orientation
/// (East = 0 degrees, North = 90, West = 180, South = 270), or `NonOrtho`
/// for runs left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionDirection {
    East,
    North,
    West,
    South,
    NonOrtho,
}

impl SectionDirection {
    fn from_angle_deg(angle: f32) -> Self {
        let cardinal = (nearest_cardinal_deg(angle) as i32).rem_euclid(360);
        match cardinal {
            0 => Self::East,
            90 => Self::North,
            180 => Self::West,
            _ => Self::South,
        }
    }

    pub fn angle_deg(self) -> Option<f32> {
        match self {
            Self::East => Some(0.0),
            Self::North => Some(90.0),
            Self::West => Some(180.0),
            Self::South => Some(270.0),
            Self::NonOrtho => None,
        }
    }

    fn unit(self) -> Option<(f32, f32)> {
        match self {
            Self::East => Some((1.0, 0.0)),
            Self::North => Some((0.0, 1.0)),
            Self::West => Some((-1.0, 0.0)),
            Self::South => Some((0.0, -1.0)),
            Self::NonOrtho => None,
        }
    }
}

/// Maximal run of stroke segments classified against one cardinal
/// direction. `start`/`end` are point indices into the stroke list;
/// consecutive sections share their boundary point, so the segment
/// partition is contiguous and in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub start: usize,
    pub end: usize,
    pub direction: SectionDirection,
}

impl Section {
    fn chord_len(&self, list: &StrokeList) -> f32 {
        list[self.start].distance_to(list[self.end])
    }
}

fn nearest_cardinal_deg(angle: f32) -> f32 {
    (angle / 90.0).round() * 90.0
}

fn cardinal_deviation_deg(angle: f32) -> f32 {
    (angle - nearest_cardinal_deg(angle)).abs()
}

/// Whether the vector from the section's running start to point `i` still
/// tracks a cardinal direction. Points too close to the start carry no
/// direction yet and are accepted.
fn tracks_cardinal(list: &StrokeList, start: usize, i: usize, max_dev_deg: f32) -> bool {
    let dx = list[i].x - list[start].x;
    let dy = list[i].y - list[start].y;
    if (dx * dx + dy * dy).sqrt() < MIN_CHORD {
        return true;
    }
    cardinal_deviation_deg(dy.atan2(dx).to_degrees()) <= max_dev_deg
}

/// Partition the stroke into sections by scanning with a running start.
///
/// A run stays open while each point's chord from the run's start remains
/// within `max_dev_deg` of a cardinal (inclusive). Runs whose final chord
/// is shorter than `min_section_len` are demoted to `NonOrtho`, and
/// consecutive `NonOrtho` runs merge.
pub fn build_sections(list: &StrokeList, max_dev_deg: f32, min_section_len: f32) -> Vec<Section> {
    let n = list.len();
    let mut sections: Vec<Section> = Vec::new();
    if n < 2 {
        return sections;
    }

    let mut start = 0;
    while start + 1 < n {
        let mut end = start + 1;
        let mut aligned = tracks_cardinal(list, start, end, max_dev_deg);
        if aligned {
            while end + 1 < n && tracks_cardinal(list, start, end + 1, max_dev_deg) {
                end += 1;
            }
        }

        let chord_x = list[end].x - list[start].x;
        let chord_y = list[end].y - list[start].y;
        let chord_len = (chord_x * chord_x + chord_y * chord_y).sqrt();
        aligned = aligned && chord_len >= min_section_len && chord_len >= MIN_CHORD;

        let direction = if aligned {
            SectionDirection::from_angle_deg(chord_y.atan2(chord_x).to_degrees())
        } else {
            SectionDirection::NonOrtho
        };

        match sections.last_mut() {
            Some(prev)
                if prev.direction == SectionDirection::NonOrtho
                    && direction == SectionDirection::NonOrtho =>
            {
                prev.end = end;
            }
            _ => sections.push(Section {
                start,
                end,
                direction,
            }),
        }
        start = end;
    }
    sections
}

/// Snap near-cardinal runs exactly onto the axes.
///
/// Each orthogonal section is rotated rigidly about its start point so its
/// chord lies on the snapped cardinal, preserving the section's length and
/// per-point width payload. A running translation keeps later sections
/// attached to the moved end of earlier ones; `NonOrtho` sections are only
/// translated. Returns the section partition for corner rounding.
pub fn orthogonalize(
    list: &mut StrokeList,
    max_dev_deg: f32,
    min_section_len: f32,
) -> Vec<Section> {
    let sections = build_sections(list, max_dev_deg, min_section_len);
    if sections.is_empty() {
        return sections;
    }

    let orig = list.clone();
    let mut offset = (0.0f32, 0.0f32);
    for section in &sections {
        let anchor = (
            orig[section.start].x + offset.0,
            orig[section.start].y + offset.1,
        );

        let rotation = section.direction.angle_deg().and_then(|target_deg| {
            let chord_x = orig[section.end].x - orig[section.start].x;
            let chord_y = orig[section.end].y - orig[section.start].y;
            if (chord_x * chord_x + chord_y * chord_y).sqrt() < MIN_CHORD {
                return None;
            }
            Some(target_deg.to_radians() - chord_y.atan2(chord_x))
        });

        for i in (section.start + 1)..=section.end {
            let rel_x = orig[i].x - orig[section.start].x;
            let rel_y = orig[i].y - orig[section.start].y;
            let (nx, ny) = match rotation {
                Some(theta) => {
                    let (sin, cos) = theta.sin_cos();
                    (rel_x * cos - rel_y * sin, rel_x * sin + rel_y * cos)
                }
                None => (rel_x, rel_y),
            };
            list[i].x = anchor.0 + nx;
            list[i].y = anchor.1 + ny;
        }
        offset = (
            list[section.end].x - orig[section.end].x,
            list[section.end].y - orig[section.end].y,
        );
    }
    sections
}

struct CornerArc {
    radius: f32,
    points: Vec<StrokePoint>,
}

/// Replace the sharp vertex between adjacent perpendicular orthogonal
/// sections with a circular arc tangent to both, approximated by `steps`
/// line segments. The radius is capped at half the shorter adjacent
/// section so arcs never overlap. With `closed` the junction between the
/// last and first section is rounded like any internal corner; otherwise
/// both path endpoints stay sharp.
pub fn round_corners(
    list: &mut StrokeList,
    sections: &[Section],
    radius: f32,
    steps: usize,
    closed: bool,
) {
    if sections.len() < 2 || radius <= 0.0 || steps == 0 {
        return;
    }

    let junctions = if closed {
        sections.len()
    } else {
        sections.len() - 1
    };
    let arcs: Vec<Option<CornerArc>> = (0..junctions)
        .map(|j| {
            let incoming = &sections[j];
            let outgoing = &sections[(j + 1) % sections.len()];
            build_corner_arc(list, incoming, outgoing, radius, steps)
        })
        .collect();
    if arcs.iter().all(Option::is_none) {
        return;
    }

    let mut out: StrokeList = Vec::with_capacity(list.len() + junctions * (steps + 1));
    for (k, section) in sections.iter().enumerate() {
        let trim_before = if k == 0 {
            if closed {
                arcs[junctions - 1].as_ref().map_or(0.0, |a| a.radius)
            } else {
                0.0
            }
        } else {
            arcs[k - 1].as_ref().map_or(0.0, |a| a.radius)
        };
        let trim_after = if k < junctions {
            arcs[k].as_ref().map_or(0.0, |a| a.radius)
        } else {
            0.0
        };

        let corner_before = list[section.start];
        let corner_after = list[section.end];
        for i in section.start..section.end {
            let p = list[i];
            if trim_before > 0.0 && p.distance_to(corner_before) <= trim_before {
                continue;
            }
            if trim_after > 0.0 && p.distance_to(corner_after) <= trim_after {
                continue;
            }
            out.push(p);
        }
        if k < junctions {
            if let Some(arc) = &arcs[k] {
                out.extend_from_slice(&arc.points);
            }
        }
    }

    if closed {
        // Close the loop back onto the first emitted point.
        if let Some(first) = out.first().copied() {
            out.push(first);
        }
    } else {
        out.push(list[sections[sections.len() - 1].end]);
    }
    *list = out;
}

fn build_corner_arc(
    list: &StrokeList,
    incoming: &Section,
    outgoing: &Section,
    radius: f32,
    steps: usize,
) -> Option<CornerArc> {
    let u = incoming.direction.unit()?;
    let v = outgoing.direction.unit()?;
    // Only right-angle junctions get an arc; straight or reversing
    // junctions have no tangent circle.
    if (u.0 * v.0 + u.1 * v.1).abs() > f32::EPSILON {
        return None;
    }

    let r = radius
        .min(incoming.chord_len(list) * 0.5)
        .min(outgoing.chord_len(list) * 0.5);
    if r < MIN_CHORD {
        return None;
    }

    let corner = list[incoming.end];
    let tangent_in = (corner.x - u.0 * r, corner.y - u.1 * r);
    let center = (tangent_in.0 + v.0 * r, tangent_in.1 + v.1 * r);

    let start_angle = (tangent_in.1 - center.1).atan2(tangent_in.0 - center.0);
    let tangent_out = (corner.x + v.0 * r, corner.y + v.1 * r);
    let end_angle = (tangent_out.1 - center.1).atan2(tangent_out.0 - center.0);
    let mut sweep = end_angle - start_angle;
    while sweep > std::f32::consts::PI {
        sweep -= std::f32::consts::TAU;
    }
    while sweep < -std::f32::consts::PI {
        sweep += std::f32::consts::TAU;
    }

    let points = (0..=steps)
        .map(|i| {
            let angle = start_angle + sweep * (i as f32 / steps as f32);
            StrokePoint {
                x: center.0 + angle.cos() * r,
                y: center.1 + angle.sin() * r,
                width: corner.width,
            }
        })
        .collect();
    Some(CornerArc { radius: r, points })
}
