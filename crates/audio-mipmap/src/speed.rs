//! Mapping from playback speed to pyramid level.

/// Fractional parts below this count as an exact integer speed.
const INTEGER_SPEED_EPSILON: f64 = 0.0001;

/// Pick the pyramid level to read from when playing back at `speed`.
///
/// The sign is ignored. Speeds at (or a hair above) an integer `k > 0` map to
/// level `k - 1` instead of `k`; otherwise the level is the integer part of
/// the speed. The result is unbounded above and must be clamped against the
/// pyramid depth, see [`clamp_level`].
pub fn speed_to_depth(speed: f64) -> usize {
    let speed = speed.abs();
    let whole = speed.trunc();
    let frac = speed - whole;
    let mut depth = whole as usize;

    if frac < INTEGER_SPEED_EPSILON && depth > 0 {
        depth -= 1;
    }

    depth
}

/// Clamp a level into `[0, depth - 1]`.
#[inline]
pub fn clamp_level(level: usize, depth: usize) -> usize {
    level.min(depth.saturating_sub(1))
}
