/// Computes the Euclidean distance between two points.
pub fn dist((x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    (dx * dx + dy * dy).sqrt()
}

/// Clamps a normalized coordinate into `[0, 1]`.
pub fn clamp_unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Rounds a channel value and clamps it into byte range, mirroring clamped-byte
/// pixel storage. NaN collapses to zero.
pub fn clamp_byte(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
