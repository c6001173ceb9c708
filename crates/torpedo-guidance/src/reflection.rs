//! Planar reflection math.

use glam::Vec2;

/// 2D dot product.
#[inline]
pub fn dot2(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

/// Reflect `incident` about the unit `normal`: `r = d - 2(d·n)n`.
///
/// Preserves the magnitude of `incident` as long as `normal` is unit length.
pub fn reflect(incident: Vec2, normal: Vec2) -> Vec2 {
    let dot = dot2(incident, normal);
    Vec2::new(
        incident.x - 2.0 * dot * normal.x,
        incident.y - 2.0 * dot * normal.y,
    )
}
