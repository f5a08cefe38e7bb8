//! Which bin, if any, an item is over.

use crate::catalog::Category;
use crate::layout::TargetZone;

/// First zone (in list order) whose interval holds `center_x`, or `None` when the item's
/// bottom edge is above the band or no interval matches.
pub fn zone_at<'a>(
    center_x: f32,
    bottom_y: f32,
    zones: &'a [TargetZone],
    field_height: f32,
    band_height: f32,
) -> Option<&'a TargetZone> {
    if !in_bottom_band(bottom_y, field_height, band_height) {
        return None;
    }
    zones.iter().find(|z| z.contains(center_x))
}

#[inline]
pub fn in_bottom_band(bottom_y: f32, field_height: f32, band_height: f32) -> bool {
    bottom_y >= field_height - band_height
}

/// `+points` for the matching bin; `-points` for a wrong bin or no bin at all.
pub fn score_delta(item: Category, zone: Option<Category>, points: i64) -> i64 {
    match zone {
        Some(c) if c == item => points,
        _ => -points,
    }
}
