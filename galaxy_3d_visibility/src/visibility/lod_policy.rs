/// Distance → band → LOD level policy.

/// Index of the first band whose upper bound is at or above `distance`.
///
/// `None` when there are no bands, when the distance lies past the last
/// band, or when the distance is NaN.
pub fn band_index(distance: f32, bands: &[f32]) -> Option<usize> {
    bands.iter().position(|&upper| upper >= distance)
}

/// LOD level to show for `distance`, clamped to `level_count - 1`.
///
/// Without bands every entity uses level 0. Past the last band the
/// coarsest level is used. `None` only when there are no levels at all.
pub fn lod_level_for_distance(distance: f32, bands: &[f32], level_count: usize) -> Option<usize> {
    if level_count == 0 {
        return None;
    }
    let band = if bands.is_empty() {
        0
    } else {
        band_index(distance, bands).unwrap_or(bands.len())
    };
    Some(band.min(level_count - 1))
}
