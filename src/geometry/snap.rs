use crate::model::StrokeList;

/// Join a near-closed loop.
///
/// When the first and last point are within `max_distance` of each other
/// the last point takes the first point's exact coordinates and `true` is
/// returned, so closed shapes render without a visible gap. Widths are
/// left alone. Otherwise the list is untouched.
pub fn snap_ends(list: &mut StrokeList, max_distance: f32) -> bool {
    if list.len() < 2 {
        return false;
    }
    let first = list[0];
    let last_index = list.len() - 1;
    if first.distance_to(list[last_index]) > max_distance {
        return false;
    }
    list[last_index].x = first.x;
    list[last_index].y = first.y;
    true
}
